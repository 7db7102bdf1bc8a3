//! Shared application state for the API server.
//!
//! [`AppState`] is built once at startup and shared read-only across
//! handlers. The subscriber store does its own locking.

use acecase_core::config::{AppConfig, SignupSettings};
use acecase_core::credential::CredentialIssuer;
use acecase_db::SubscriberStore;
use acecase_types::CaseCatalog;

use crate::landing::LandingPage;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug)]
pub struct AppState {
    /// Cases a candidate may select.
    pub catalog: CaseCatalog,
    /// Signs room credentials.
    pub issuer: CredentialIssuer,
    /// Waitlist persistence.
    pub subscribers: SubscriberStore,
    /// Real-time server the browser joins with an issued credential.
    pub livekit_url: String,
    /// Popup timing rendered into the landing page.
    pub signup: SignupSettings,
    /// Compiled landing template.
    pub landing: LandingPage,
}

impl AppState {
    /// Assemble state from loaded configuration and ready backends.
    pub fn new(
        config: &AppConfig,
        issuer: CredentialIssuer,
        subscribers: SubscriberStore,
    ) -> Result<Self, minijinja::Error> {
        Ok(Self {
            catalog: config.catalog(),
            issuer,
            subscribers,
            livekit_url: config.livekit.url.clone(),
            signup: config.signup.clone(),
            landing: LandingPage::new()?,
        })
    }
}
