//! Exhibits surfaced by the interviewer during a case.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single image artifact with the prompt the interviewer attached to it.
///
/// Identity is the `image_url`: two exhibits with the same URL are the
/// same exhibit, regardless of prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Exhibit {
    /// Location of the rendered image.
    pub image_url: String,
    /// Descriptive prompt shown alongside the image.
    #[serde(default)]
    pub display_prompt: String,
}

impl Exhibit {
    /// Build an exhibit from borrowed parts.
    pub fn new(image_url: &str, display_prompt: &str) -> Self {
        Self {
            image_url: image_url.to_owned(),
            display_prompt: display_prompt.to_owned(),
        }
    }
}
