//! The end-of-interview feedback report.
//!
//! The interviewer agent sends exactly one report per session. Every
//! score, overall and per bucket, lives on a 0 to 10 scale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Lowest score the interviewer can award.
pub const MIN_SCORE: f64 = 0.0;

/// Highest score the interviewer can award.
pub const MAX_SCORE: f64 = 10.0;

/// Score floor for a [`BucketGrade::Strong`] bucket.
const STRONG_THRESHOLD: f64 = 8.0;

/// Score floor for a [`BucketGrade::Fair`] bucket.
const FAIR_THRESHOLD: f64 = 6.0;

/// Whether `score` is finite and on the 0 to 10 scale.
pub fn is_valid_score(score: f64) -> bool {
    score.is_finite() && (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Score and comment for a single assessment category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct BucketScore {
    /// Category score, 0 to 10.
    pub score: f64,
    /// Interviewer's remark for this category.
    #[serde(default)]
    pub comment: String,
}

impl BucketScore {
    /// Grade band for this bucket's score.
    pub fn grade(&self) -> BucketGrade {
        BucketGrade::from_score(self.score)
    }
}

/// Feedback report delivered when the interview ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Feedback {
    /// Overall score, 0 to 10.
    pub score: f64,
    /// Free-text summary of the candidate's performance.
    #[serde(rename = "feedback_text", default)]
    pub summary: String,
    /// Per-category scores keyed by category name.
    #[serde(default)]
    pub buckets: BTreeMap<String, BucketScore>,
}

impl Feedback {
    /// Whether the overall score and every bucket score are on scale.
    pub fn scores_in_range(&self) -> bool {
        is_valid_score(self.score) && self.buckets.values().all(|b| is_valid_score(b.score))
    }
}

/// Grade band used to color a bucket on the report card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum BucketGrade {
    /// 8 and above.
    Strong,
    /// 6 up to 8.
    Fair,
    /// Below 6.
    Weak,
}

impl BucketGrade {
    /// Classify a bucket score.
    pub fn from_score(score: f64) -> Self {
        if score >= STRONG_THRESHOLD {
            Self::Strong
        } else if score >= FAIR_THRESHOLD {
            Self::Fair
        } else {
            Self::Weak
        }
    }
}
