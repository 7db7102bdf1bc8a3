//! HTTP API server for Ace Case.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **Landing page** (`GET /`) listing the case catalog, with the
//!   waitlist popup script
//! - **Credential endpoint** (`POST /api/token`) that signs a room
//!   access token carrying the selected case
//! - **Waitlist endpoint** (`POST /api/subscribe`) backed by
//!   [`acecase_db::SubscriberStore`]
//! - **Catalog and health** (`GET /api/cases`, `GET /health`)
//!
//! # Architecture
//!
//! All state is assembled once at startup into an [`AppState`] and shared
//! behind an [`Arc`](std::sync::Arc). Handlers never hold locks across
//! requests; the file-backed store serializes its own writes.

pub mod error;
pub mod handlers;
pub mod landing;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::AppState;
