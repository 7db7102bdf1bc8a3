//! Decoding of raw data-channel payloads.
//!
//! The interviewer agent publishes UTF-8 JSON objects over the room's data
//! channel. Most carry a `type` discriminator. The final report may also
//! arrive in the legacy shape: an untyped object with a nonzero numeric
//! `score`.
//! That shape is still accepted, but decodes with
//! [`SessionMessage::is_legacy`] set so callers can flag it.

use std::fmt;

use acecase_types::{Exhibit, Feedback};
use serde_json::{Map, Value};

/// Errors that make a payload unusable.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The payload text is not valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The payload is valid JSON but not an object.
    #[error("payload is not a JSON object")]
    NotAnObject,

    /// A recognized message is missing a field or has one of the wrong shape.
    #[error("invalid {kind} message: {reason}")]
    InvalidField {
        /// The message the payload was recognized as.
        kind: MessageKind,
        /// What was wrong with it.
        reason: String,
    },
}

/// Discriminator of a recognized message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// The agent started generating the report.
    Status,
    /// The agent surfaced an exhibit.
    ShowGraph,
    /// The agent asked to collapse the exhibit panel.
    HideGraph,
    /// The final feedback report.
    Report,
}

impl MessageKind {
    /// Wire value of the `type` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "STATUS",
            Self::ShowGraph => "SHOW_GRAPH",
            Self::HideGraph => "HIDE_GRAPH",
            Self::Report => "REPORT",
        }
    }

    fn from_wire(value: &str) -> Option<Self> {
        match value {
            "STATUS" => Some(Self::Status),
            "SHOW_GRAPH" => Some(Self::ShowGraph),
            "HIDE_GRAPH" => Some(Self::HideGraph),
            "REPORT" => Some(Self::Report),
            _ => None,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded, validated data-channel message.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    /// Report generation has started.
    Status,
    /// Show (or re-show) an exhibit.
    ShowGraph(Exhibit),
    /// Collapse the exhibit panel.
    HideGraph,
    /// The final feedback report.
    Report {
        /// The parsed report.
        feedback: Feedback,
        /// Whether it arrived in the untyped legacy shape.
        legacy: bool,
    },
}

impl SessionMessage {
    /// Discriminator of this message.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Status => MessageKind::Status,
            Self::ShowGraph(_) => MessageKind::ShowGraph,
            Self::HideGraph => MessageKind::HideGraph,
            Self::Report { .. } => MessageKind::Report,
        }
    }

    /// Whether this message used a deprecated wire shape.
    pub const fn is_legacy(&self) -> bool {
        matches!(self, Self::Report { legacy: true, .. })
    }
}

/// Decode a raw payload.
///
/// Returns `Ok(None)` for a well-formed object that is not a recognized
/// message (an unknown `type` and no nonzero numeric `score`).
///
/// A typed discriminator always wins over the legacy `score` check, so a
/// `STATUS` object that happens to carry a score is still a status.
pub fn decode(payload: &[u8]) -> Result<Option<SessionMessage>, DecodeError> {
    let text = std::str::from_utf8(payload)?;
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(object) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(MessageKind::from_wire);

    let message = match kind {
        Some(MessageKind::Status) => SessionMessage::Status,
        Some(MessageKind::HideGraph) => SessionMessage::HideGraph,
        Some(MessageKind::ShowGraph) => SessionMessage::ShowGraph(parse_exhibit(object)?),
        Some(MessageKind::Report) => SessionMessage::Report {
            feedback: parse_feedback(object)?,
            legacy: false,
        },
        None if object.get("score").is_some_and(is_truthy_score) => SessionMessage::Report {
            feedback: parse_feedback(object)?,
            legacy: true,
        },
        None => return Ok(None),
    };

    Ok(Some(message))
}

fn parse_exhibit(object: Map<String, Value>) -> Result<Exhibit, DecodeError> {
    let exhibit: Exhibit =
        serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::InvalidField {
            kind: MessageKind::ShowGraph,
            reason: e.to_string(),
        })?;
    if exhibit.image_url.is_empty() {
        return Err(DecodeError::InvalidField {
            kind: MessageKind::ShowGraph,
            reason: String::from("image_url is empty"),
        });
    }
    Ok(exhibit)
}

fn parse_feedback(object: Map<String, Value>) -> Result<Feedback, DecodeError> {
    let feedback: Feedback =
        serde_json::from_value(Value::Object(object)).map_err(|e| DecodeError::InvalidField {
            kind: MessageKind::Report,
            reason: e.to_string(),
        })?;
    if !feedback.scores_in_range() {
        return Err(DecodeError::InvalidField {
            kind: MessageKind::Report,
            reason: String::from("score outside 0..=10"),
        });
    }
    Ok(feedback)
}

/// A legacy report is signalled only by a JSON number other than zero.
fn is_truthy_score(value: &Value) -> bool {
    value.as_f64().is_some_and(|f| f.abs() > 0.0)
}
