//! Shared type definitions for the Ace Case interview service.
//!
//! This crate is the single source of truth for the payloads exchanged
//! between the interviewer agent, the browser client, and the HTTP API.
//! Types defined here flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`cases`] -- The business-case catalog offered on the landing page
//! - [`exhibit`] -- Images surfaced by the interviewer mid-session
//! - [`report`] -- The end-of-interview feedback report and bucket grading
//! - [`api`] -- Request and response bodies for the HTTP endpoints

pub mod api;
pub mod cases;
pub mod exhibit;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use api::{ErrorBody, SubscribeRequest, SubscribeResponse, TokenRequest, TokenResponse};
pub use cases::{Case, CaseCatalog};
pub use exhibit::Exhibit;
pub use report::{BucketGrade, BucketScore, Feedback, MAX_SCORE, MIN_SCORE, is_valid_score};
