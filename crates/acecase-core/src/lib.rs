//! Session event handling, client view logic, and credential issuing for
//! the Ace Case interview service.
//!
//! Everything in this crate is synchronous and transport-independent. The
//! real-time client hands raw data-channel payloads to a
//! [`SessionDispatcher`]; the HTTP server uses the [`CredentialIssuer`]
//! and [`config`] types.
//!
//! # Modules
//!
//! - [`message`] -- Decoding raw payloads into [`SessionMessage`]s.
//! - [`session`] -- The per-room [`Session`] state and its pure transition.
//! - [`dispatcher`] -- Feeds payloads through decode and transition,
//!   swallowing malformed input.
//! - [`lobby`] -- Case selection and room entry.
//! - [`timer`] -- Interview clock formatting.
//! - [`signup`] -- Mailing-list popup scheduling and form state.
//! - [`credential`] -- Signed room access tokens.
//! - [`config`] -- Configuration loading from `acecase-config.yaml`.
//!
//! [`SessionDispatcher`]: dispatcher::SessionDispatcher
//! [`CredentialIssuer`]: credential::CredentialIssuer
//! [`SessionMessage`]: message::SessionMessage
//! [`Session`]: session::Session

pub mod config;
pub mod credential;
pub mod dispatcher;
pub mod lobby;
pub mod message;
pub mod session;
pub mod signup;
pub mod timer;

pub use dispatcher::{DispatchOutcome, DispatchStats, SessionDispatcher};
pub use message::{DecodeError, MessageKind, SessionMessage, decode};
pub use session::{ActiveView, Session, SessionEffect, transition};
