//! Per-room session state and its transition function.
//!
//! A [`Session`] is created when the candidate joins a room and dropped
//! when they leave. It only changes through [`Session::apply`] (driven by
//! agent messages) and the two gallery interactions
//! [`Session::select_exhibit`] and [`Session::set_exhibit_panel_visible`].
//!
//! # Invariants
//!
//! - `exhibits` never shrinks and never holds two entries with the same
//!   `image_url`.
//! - When `exhibits` is non-empty, `active_exhibit_index` is a valid
//!   index into it.
//! - `feedback` is set at most once.

use acecase_types::{Exhibit, Feedback};
use serde::Serialize;

use crate::message::SessionMessage;

/// Client-side state for one interview room connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Session {
    generating: bool,
    feedback: Option<Feedback>,
    exhibits: Vec<Exhibit>,
    active_exhibit_index: usize,
    exhibit_panel_visible: bool,
}

/// What applying a message did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEffect {
    /// The agent is generating the report.
    GenerationStarted,
    /// A new exhibit was appended at `index`.
    ExhibitAdded {
        /// Position of the new exhibit.
        index: usize,
    },
    /// A known exhibit was brought back into view.
    ExhibitReselected {
        /// Position of the existing exhibit.
        index: usize,
    },
    /// The exhibit panel was collapsed.
    ExhibitPanelHidden,
    /// The feedback report was stored.
    ReportReceived,
    /// A report arrived after one was already stored, and was dropped.
    DuplicateReport,
}

/// Which of the three room views should be on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveView<'a> {
    /// The report card.
    Report(&'a Feedback),
    /// The "analyzing your performance" spinner.
    Generating,
    /// The live interview room.
    Room,
}

impl Session {
    /// A fresh session for a newly joined room.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the agent is generating the report.
    pub const fn generating(&self) -> bool {
        self.generating
    }

    /// The feedback report, once received.
    pub const fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Every exhibit seen so far, in order of first appearance.
    pub fn exhibits(&self) -> &[Exhibit] {
        &self.exhibits
    }

    /// Index of the exhibit in focus. Meaningless while `exhibits` is empty.
    pub const fn active_exhibit_index(&self) -> usize {
        self.active_exhibit_index
    }

    /// Whether the exhibit panel is expanded.
    pub const fn exhibit_panel_visible(&self) -> bool {
        self.exhibit_panel_visible
    }

    /// The exhibit in focus, if any has been shown.
    pub fn active_exhibit(&self) -> Option<&Exhibit> {
        self.exhibits.get(self.active_exhibit_index)
    }

    /// Select the view to render. A received report always wins.
    pub fn active_view(&self) -> ActiveView<'_> {
        match (&self.feedback, self.generating) {
            (Some(feedback), _) => ActiveView::Report(feedback),
            (None, true) => ActiveView::Generating,
            (None, false) => ActiveView::Room,
        }
    }

    /// Apply an agent message.
    ///
    /// Every variant has a total handler; applying never fails.
    pub fn apply(&mut self, message: SessionMessage) -> SessionEffect {
        match message {
            SessionMessage::Status => {
                self.generating = true;
                SessionEffect::GenerationStarted
            }
            SessionMessage::ShowGraph(exhibit) => self.show_exhibit(exhibit),
            SessionMessage::HideGraph => {
                self.exhibit_panel_visible = false;
                SessionEffect::ExhibitPanelHidden
            }
            SessionMessage::Report { feedback, .. } => {
                if self.feedback.is_some() {
                    return SessionEffect::DuplicateReport;
                }
                self.generating = false;
                self.feedback = Some(feedback);
                SessionEffect::ReportReceived
            }
        }
    }

    /// The candidate clicked a gallery thumbnail.
    ///
    /// Returns `false` and leaves the session untouched if `index` is out
    /// of range.
    pub fn select_exhibit(&mut self, index: usize) -> bool {
        if index >= self.exhibits.len() {
            return false;
        }
        self.active_exhibit_index = index;
        self.exhibit_panel_visible = true;
        true
    }

    /// The candidate collapsed or expanded the exhibit panel.
    pub const fn set_exhibit_panel_visible(&mut self, visible: bool) {
        self.exhibit_panel_visible = visible;
    }

    fn show_exhibit(&mut self, exhibit: Exhibit) -> SessionEffect {
        self.exhibit_panel_visible = true;

        if let Some(index) = self
            .exhibits
            .iter()
            .position(|e| e.image_url == exhibit.image_url)
        {
            self.active_exhibit_index = index;
            return SessionEffect::ExhibitReselected { index };
        }

        self.exhibits.push(exhibit);
        let index = self.exhibits.len().saturating_sub(1);
        self.active_exhibit_index = index;
        SessionEffect::ExhibitAdded { index }
    }
}

/// Pure transition: the session that results from applying `message`.
pub fn transition(session: &Session, message: &SessionMessage) -> Session {
    let mut next = session.clone();
    next.apply(message.clone());
    next
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use acecase_types::BucketScore;

    use super::*;

    fn show(url: &str) -> SessionMessage {
        SessionMessage::ShowGraph(Exhibit::new(url, "prompt"))
    }

    fn report(score: f64) -> SessionMessage {
        let mut buckets = BTreeMap::new();
        buckets.insert(
            String::from("Structure"),
            BucketScore {
                score: 8.0,
                comment: String::from("Clear"),
            },
        );
        SessionMessage::Report {
            feedback: Feedback {
                score,
                summary: String::from("Good structuring"),
                buckets,
            },
            legacy: false,
        }
    }

    fn urls(session: &Session) -> Vec<&str> {
        session
            .exhibits()
            .iter()
            .map(|e| e.image_url.as_str())
            .collect()
    }

    #[test]
    fn new_session_shows_room() {
        let session = Session::new();
        assert_eq!(session.active_view(), ActiveView::Room);
        assert!(session.active_exhibit().is_none());
        assert!(!session.exhibit_panel_visible());
    }

    #[test]
    fn status_then_report() {
        let mut session = Session::new();
        assert_eq!(
            session.apply(SessionMessage::Status),
            SessionEffect::GenerationStarted
        );
        assert!(session.generating());
        assert!(session.feedback().is_none());
        assert_eq!(session.active_view(), ActiveView::Generating);

        assert_eq!(session.apply(report(7.0)), SessionEffect::ReportReceived);
        assert!(!session.generating());
        assert!(matches!(session.active_view(), ActiveView::Report(f) if f.summary == "Good structuring"));
    }

    #[test]
    fn feedback_takes_precedence_over_generating() {
        let mut session = Session::new();
        session.apply(report(6.0));
        session.apply(SessionMessage::Status);
        assert!(session.generating());
        assert!(matches!(session.active_view(), ActiveView::Report(_)));
    }

    #[test]
    fn second_report_is_dropped() {
        let mut session = Session::new();
        session.apply(report(6.0));
        let before = session.clone();
        assert_eq!(session.apply(report(9.0)), SessionEffect::DuplicateReport);
        assert_eq!(session, before);
    }

    #[test]
    fn exhibits_deduplicate_by_url() {
        let mut session = Session::new();
        assert_eq!(
            session.apply(show("a.png")),
            SessionEffect::ExhibitAdded { index: 0 }
        );
        assert_eq!(
            session.apply(show("b.png")),
            SessionEffect::ExhibitAdded { index: 1 }
        );
        assert_eq!(
            session.apply(show("a.png")),
            SessionEffect::ExhibitReselected { index: 0 }
        );
        assert_eq!(urls(&session), vec!["a.png", "b.png"]);
        assert_eq!(session.active_exhibit_index(), 0);
    }

    #[test]
    fn repeated_show_is_idempotent() {
        let mut once = Session::new();
        once.apply(show("a.png"));

        let mut twice = Session::new();
        twice.apply(show("a.png"));
        twice.apply(show("a.png"));

        assert_eq!(once, twice);
        assert_eq!(twice.active_exhibit_index(), 0);
    }

    #[test]
    fn hide_then_show_restores_original_position() {
        let mut session = Session::new();
        session.apply(show("a.png"));
        session.apply(show("b.png"));
        session.apply(show("c.png"));
        session.apply(SessionMessage::HideGraph);
        assert!(!session.exhibit_panel_visible());
        assert_eq!(session.active_exhibit_index(), 2);
        assert_eq!(session.exhibits().len(), 3);

        session.apply(show("b.png"));
        assert!(session.exhibit_panel_visible());
        assert_eq!(session.active_exhibit_index(), 1);
        assert_eq!(session.exhibits().len(), 3);
    }

    #[test]
    fn same_url_keeps_first_prompt() {
        let mut session = Session::new();
        session.apply(SessionMessage::ShowGraph(Exhibit::new("a.png", "first")));
        session.apply(SessionMessage::ShowGraph(Exhibit::new("a.png", "second")));
        assert_eq!(
            session.active_exhibit().map(|e| e.display_prompt.as_str()),
            Some("first")
        );
    }

    #[test]
    fn select_exhibit_bounds() {
        let mut session = Session::new();
        assert!(!session.select_exhibit(0));

        session.apply(show("a.png"));
        session.apply(show("b.png"));
        session.set_exhibit_panel_visible(false);

        assert!(session.select_exhibit(0));
        assert_eq!(session.active_exhibit_index(), 0);
        assert!(session.exhibit_panel_visible());

        let before = session.clone();
        assert!(!session.select_exhibit(2));
        assert_eq!(session, before);
    }

    #[test]
    fn pure_transition_leaves_input_untouched() {
        let session = Session::new();
        let next = transition(&session, &SessionMessage::Status);
        assert!(!session.generating());
        assert!(next.generating());
    }

    #[test]
    fn gallery_never_shrinks_or_duplicates() {
        let script = [
            show("a.png"),
            SessionMessage::HideGraph,
            show("b.png"),
            SessionMessage::Status,
            show("a.png"),
            show("c.png"),
            SessionMessage::HideGraph,
            show("b.png"),
            report(5.0),
            show("d.png"),
        ];

        let mut session = Session::new();
        let mut last_len = 0;
        for message in script {
            session.apply(message);
            let len = session.exhibits().len();
            assert!(len >= last_len);
            last_len = len;

            let mut seen = urls(&session);
            seen.sort_unstable();
            seen.dedup();
            assert_eq!(seen.len(), len);
            assert!(session.active_exhibit_index() < len);
        }
        assert_eq!(urls(&session), vec!["a.png", "b.png", "c.png", "d.png"]);
    }
}
