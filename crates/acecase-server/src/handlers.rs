//! REST API endpoint handlers.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Landing page with the case catalog |
//! | `GET` | `/health` | Liveness probe |
//! | `GET` | `/api/cases` | Case catalog as JSON |
//! | `POST` | `/api/token` | Sign a room credential for a case |
//! | `POST` | `/api/subscribe` | Add an address to the waitlist |
//!
//! The two `POST` handlers take the raw body instead of `Json<T>` so a
//! request without a `Content-Type` header is still accepted.

use std::sync::Arc;

use acecase_db::{DbError, InsertOutcome};
use acecase_types::{SubscribeRequest, SubscribeResponse, TokenRequest, TokenResponse};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use validator::Validate;

use crate::error::ApiError;
use crate::landing::LandingContext;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- landing page
// ---------------------------------------------------------------------------

/// Serve the landing page listing every case.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let html = state.landing.render(&LandingContext {
        cases: state.catalog.as_slice(),
        livekit_url: &state.livekit_url,
        popup_delay_ms: state.signup.popup_delay_ms,
        success_close_ms: state.signup.success_close_ms,
    })?;
    Ok(Html(html))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// GET /api/cases
// ---------------------------------------------------------------------------

/// List the case catalog.
pub async fn list_cases(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "count": state.catalog.len(),
        "cases": state.catalog,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/token
// ---------------------------------------------------------------------------

/// Sign a room credential for the selected case.
///
/// The case id travels inside the token as session metadata; the
/// participant identity is random per request.
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, ApiError> {
    let request: TokenRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("caseId is required: {e}")))?;

    let case_id = request.case_id.trim();
    if case_id.is_empty() {
        return Err(ApiError::BadRequest(String::from("caseId is required")));
    }

    let case = state
        .catalog
        .get(case_id)
        .ok_or_else(|| ApiError::UnknownCase(case_id.to_owned()))?;

    let credential = state.issuer.issue(&case.case_id)?;
    tracing::info!(
        case_id = %case.case_id,
        identity = %credential.identity,
        room = state.issuer.room(),
        "issued room credential"
    );

    Ok(Json(TokenResponse {
        token: credential.token,
    }))
}

// ---------------------------------------------------------------------------
// POST /api/subscribe
// ---------------------------------------------------------------------------

/// Add an address to the waitlist. Repeats succeed with a message.
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SubscribeResponse>, ApiError> {
    let mut request: SubscribeRequest =
        serde_json::from_slice(&body).map_err(|_e| ApiError::InvalidEmail)?;
    request.email = request.email.trim().to_owned();
    request.validate().map_err(|_e| ApiError::InvalidEmail)?;

    let outcome = state
        .subscribers
        .insert(&request.email)
        .await
        .map_err(|e| match e {
            DbError::InvalidEmail(_) => ApiError::InvalidEmail,
            other => ApiError::Storage(other),
        })?;

    Ok(Json(match outcome {
        InsertOutcome::Inserted => SubscribeResponse::subscribed(),
        InsertOutcome::AlreadySubscribed => SubscribeResponse::already_subscribed(),
    }))
}
