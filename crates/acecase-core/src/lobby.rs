//! Case selection and room entry.
//!
//! The candidate stays on the selection screen until a credential for the
//! chosen case has been issued. A failed issuance leaves the credential
//! unset, so the candidate simply stays on the selection screen.

use acecase_types::Case;
use tracing::warn;

/// Which top-level screen to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen<'a> {
    /// The case picker.
    Selection,
    /// The interview room for `case`, joined with `token`.
    Room {
        /// The selected case.
        case: &'a Case,
        /// The room access credential.
        token: &'a str,
    },
}

/// Selection and credential state for the landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lobby {
    selected: Option<Case>,
    credential: Option<String>,
}

impl Lobby {
    /// An empty lobby on the selection screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// The candidate picked a case; a credential request is now in flight.
    pub fn select(&mut self, case: Case) {
        self.selected = Some(case);
        self.credential = None;
    }

    /// The credential request finished.
    ///
    /// Ignored if no case is selected.
    pub fn credential_issued<E: std::fmt::Display>(&mut self, result: Result<String, E>) {
        if self.selected.is_none() {
            return;
        }
        match result {
            Ok(token) if !token.is_empty() => self.credential = Some(token),
            Ok(_) => {
                warn!("credential issuer returned an empty token");
                self.credential = None;
            }
            Err(e) => {
                warn!(error = %e, "credential request failed");
                self.credential = None;
            }
        }
    }

    /// Leave the room and return to the case picker.
    pub fn leave(&mut self) {
        self.selected = None;
        self.credential = None;
    }

    /// The case picked most recently, if any.
    pub const fn selected(&self) -> Option<&Case> {
        self.selected.as_ref()
    }

    /// The screen to render.
    pub fn screen(&self) -> Screen<'_> {
        match (&self.selected, &self.credential) {
            (Some(case), Some(token)) => Screen::Room { case, token },
            _ => Screen::Selection,
        }
    }
}
