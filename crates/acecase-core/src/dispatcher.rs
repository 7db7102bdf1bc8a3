//! The session event dispatcher.
//!
//! [`SessionDispatcher`] owns a [`Session`] and is handed every raw
//! data-channel payload in arrival order. It decodes, applies, and logs.
//! Malformed payloads are logged and discarded without touching the
//! session; no error ever propagates to the transport callback.
//!
//! The dispatcher is synchronous and never blocks. It is meant to be
//! driven from the single callback the real-time client invokes per
//! message, so it takes `&mut self` and needs no locking.

use tracing::{debug, warn};

use crate::message::{DecodeError, decode};
use crate::session::{Session, SessionEffect};

/// What happened to a single payload.
#[derive(Debug)]
pub enum DispatchOutcome {
    /// A recognized message was applied.
    Applied(SessionEffect),
    /// A message in a deprecated wire shape was applied.
    Deprecated(SessionEffect),
    /// A well-formed object that is not a recognized message.
    Ignored,
    /// The payload could not be decoded; the session is unchanged.
    Discarded(DecodeError),
}

impl DispatchOutcome {
    /// Whether the payload reached the session.
    pub const fn was_applied(&self) -> bool {
        matches!(self, Self::Applied(_) | Self::Deprecated(_))
    }
}

/// Running counters over every payload the dispatcher has seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DispatchStats {
    /// Payloads received.
    pub received: u64,
    /// Messages applied in their current wire shape.
    pub applied: u64,
    /// Messages applied in a deprecated wire shape.
    pub deprecated: u64,
    /// Well-formed but unrecognized objects.
    pub ignored: u64,
    /// Malformed payloads.
    pub discarded: u64,
}

impl DispatchStats {
    fn record(&mut self, outcome: &DispatchOutcome) {
        self.received = self.received.saturating_add(1);
        let counter = match outcome {
            DispatchOutcome::Applied(_) => &mut self.applied,
            DispatchOutcome::Deprecated(_) => &mut self.deprecated,
            DispatchOutcome::Ignored => &mut self.ignored,
            DispatchOutcome::Discarded(_) => &mut self.discarded,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Feeds raw payloads into a [`Session`].
#[derive(Debug, Default)]
pub struct SessionDispatcher {
    session: Session,
    stats: DispatchStats,
}

impl SessionDispatcher {
    /// A dispatcher over a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one inbound payload.
    pub fn on_data(&mut self, payload: &[u8]) -> DispatchOutcome {
        debug!(bytes = payload.len(), "data-channel payload received");

        let outcome = match decode(payload) {
            Ok(Some(message)) => {
                let kind = message.kind();
                let legacy = message.is_legacy();
                let effect = self.session.apply(message);

                if effect == SessionEffect::DuplicateReport {
                    warn!("report received after feedback was already set; dropped");
                }

                if legacy {
                    warn!(
                        kind = %kind,
                        "untyped report accepted via deprecated score-only shape; \
                         agent should send type \"REPORT\""
                    );
                    DispatchOutcome::Deprecated(effect)
                } else {
                    debug!(kind = %kind, ?effect, "message applied");
                    DispatchOutcome::Applied(effect)
                }
            }
            Ok(None) => {
                debug!("unrecognized message ignored");
                DispatchOutcome::Ignored
            }
            Err(e) => {
                warn!(error = %e, "malformed data-channel payload discarded");
                DispatchOutcome::Discarded(e)
            }
        };

        self.stats.record(&outcome);
        outcome
    }

    /// The current session state.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access for gallery interactions.
    pub const fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Counters over every payload seen so far.
    pub const fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Consume the dispatcher, keeping the final session.
    pub fn into_session(self) -> Session {
        self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ActiveView;

    fn feed(dispatcher: &mut SessionDispatcher, s: &str) -> DispatchOutcome {
        dispatcher.on_data(s.as_bytes())
    }

    #[test]
    fn scenario_status_then_legacy_report() {
        let mut d = SessionDispatcher::new();

        let outcome = feed(&mut d, r#"{"type":"STATUS"}"#);
        assert!(matches!(
            outcome,
            DispatchOutcome::Applied(SessionEffect::GenerationStarted)
        ));
        assert!(d.session().generating());
        assert!(d.session().feedback().is_none());

        let outcome = feed(
            &mut d,
            r#"{"score":7,"feedback_text":"Good structuring","buckets":{"Structure":{"score":8,"comment":"Clear"}}}"#,
        );
        assert!(matches!(
            outcome,
            DispatchOutcome::Deprecated(SessionEffect::ReportReceived)
        ));
        assert!(!d.session().generating());
        let score = d.session().feedback().map(|f| f.score).unwrap_or_default();
        assert!((score - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn scenario_gallery_reselect() {
        let mut d = SessionDispatcher::new();
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png","display_prompt":"A"}"#);
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"b.png","display_prompt":"B"}"#);
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png","display_prompt":"A"}"#);

        let urls: Vec<&str> = d
            .session()
            .exhibits()
            .iter()
            .map(|e| e.image_url.as_str())
            .collect();
        assert_eq!(urls, vec!["a.png", "b.png"]);
        assert_eq!(d.session().active_exhibit_index(), 0);
    }

    #[test]
    fn scenario_invalid_utf8_leaves_session_unchanged() {
        let mut d = SessionDispatcher::new();
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png"}"#);
        let before = d.session().clone();

        let outcome = d.on_data(&[0xc3, 0x28, 0xa0, 0xa1]);
        assert!(matches!(
            outcome,
            DispatchOutcome::Discarded(DecodeError::Utf8(_))
        ));
        assert_eq!(d.session(), &before);
    }

    #[test]
    fn malformed_inputs_never_change_state() {
        let mut d = SessionDispatcher::new();
        feed(&mut d, r#"{"type":"STATUS"}"#);
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png"}"#);
        let before = d.session().clone();

        let payloads: [&[u8]; 7] = [
            br#"{"type":"SHOW_GRAPH","image_url":"b.p"#,
            b"not json at all",
            b"[1, 2, 3]",
            b"\"STATUS\"",
            br#"{"type":"REPORT","score":11}"#,
            br#"{"type":"SHOW_GRAPH"}"#,
            &[0xff],
        ];
        for payload in payloads {
            let outcome = d.on_data(payload);
            assert!(matches!(outcome, DispatchOutcome::Discarded(_)));
            assert_eq!(d.session(), &before);
        }
        assert_eq!(d.stats().discarded, 7);
    }

    #[test]
    fn typed_report_is_applied_not_deprecated() {
        let mut d = SessionDispatcher::new();
        let outcome = feed(&mut d, r#"{"type":"REPORT","score":4,"feedback_text":"Keep practicing"}"#);
        assert!(matches!(
            outcome,
            DispatchOutcome::Applied(SessionEffect::ReportReceived)
        ));
        assert!(matches!(d.session().active_view(), ActiveView::Report(_)));
    }

    #[test]
    fn stats_track_every_outcome() {
        let mut d = SessionDispatcher::new();
        feed(&mut d, r#"{"type":"STATUS"}"#);
        feed(&mut d, r#"{"type":"UNKNOWN"}"#);
        feed(&mut d, r#"{"score":3}"#);
        feed(&mut d, "garbage");

        assert_eq!(
            d.stats(),
            DispatchStats {
                received: 4,
                applied: 1,
                deprecated: 1,
                ignored: 1,
                discarded: 1,
            }
        );
    }

    #[test]
    fn string_score_without_type_is_ignored() {
        let mut d = SessionDispatcher::new();
        let outcome = feed(&mut d, r#"{"score":"7","feedback_text":"x"}"#);

        assert!(matches!(outcome, DispatchOutcome::Ignored));
        assert_eq!(d.stats().ignored, 1);
        assert_eq!(d.stats().discarded, 0);
        assert_eq!(d.session(), &Session::default());
    }

    #[test]
    fn hide_then_show_known_exhibit() {
        let mut d = SessionDispatcher::new();
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png"}"#);
        feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"b.png"}"#);
        feed(&mut d, r#"{"type":"HIDE_GRAPH"}"#);
        assert!(!d.session().exhibit_panel_visible());

        let outcome = feed(&mut d, r#"{"type":"SHOW_GRAPH","image_url":"a.png"}"#);
        assert!(matches!(
            outcome,
            DispatchOutcome::Applied(SessionEffect::ExhibitReselected { index: 0 })
        ));
        assert!(d.session().exhibit_panel_visible());
        assert_eq!(d.into_session().exhibits().len(), 2);
    }
}
