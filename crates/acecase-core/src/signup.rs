//! Mailing-list popup scheduling and sign-up form state.
//!
//! Whether the visitor already subscribed is injected by the caller
//! (the browser persists it locally); nothing here reads ambient state,
//! so every decision is a pure function of its inputs.

use std::time::Duration;

use acecase_types::SubscribeRequest;

/// Default delay after page load before the popup opens.
pub const DEFAULT_POPUP_DELAY: Duration = Duration::from_millis(1000);

/// Default time the success message stays up before the popup closes.
pub const DEFAULT_SUCCESS_CLOSE_DELAY: Duration = Duration::from_millis(2000);

/// Whether the popup should be open `elapsed` after the page mounted.
pub fn popup_should_open(has_subscribed: bool, elapsed: Duration, delay: Duration) -> bool {
    !has_subscribed && elapsed >= delay
}

/// Status of the sign-up form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignupStatus {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Request in flight.
    Loading,
    /// The server accepted the address.
    Success,
    /// The request failed.
    Error,
    /// The confirmation did not match.
    Mismatch,
}

/// The two-field sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    /// Address as typed.
    pub email: String,
    /// Confirmation as typed.
    pub confirm_email: String,
    status: SignupStatus,
}

impl SignupForm {
    /// An empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status.
    pub const fn status(&self) -> SignupStatus {
        self.status
    }

    /// Whether the submit button should be disabled.
    pub const fn is_busy(&self) -> bool {
        matches!(self.status, SignupStatus::Loading)
    }

    /// Submit the form.
    ///
    /// Returns the request body to send, or `None` when the confirmation
    /// does not match or a request is already in flight.
    pub fn submit(&mut self) -> Option<SubscribeRequest> {
        if self.is_busy() {
            return None;
        }
        if self.email != self.confirm_email {
            self.status = SignupStatus::Mismatch;
            return None;
        }
        self.status = SignupStatus::Loading;
        Some(SubscribeRequest {
            email: self.email.clone(),
        })
    }

    /// The request finished. On success the caller persists the
    /// has-subscribed flag.
    pub fn finish(&mut self, ok: bool) {
        self.status = if ok {
            SignupStatus::Success
        } else {
            SignupStatus::Error
        };
    }

    /// Whether the popup should close, `since_success` after success.
    pub fn should_close(&self, since_success: Duration, close_delay: Duration) -> bool {
        self.status == SignupStatus::Success && since_success >= close_delay
    }
}
