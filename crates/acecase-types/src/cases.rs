//! The catalog of business cases a candidate can practice.
//!
//! Each case carries a stable `caseId` that is embedded in the room
//! credential so the interviewer agent knows which case to run.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A single business case offered on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Case {
    /// Stable identifier read by the interviewer agent.
    #[serde(rename = "caseId", alias = "case_id")]
    pub case_id: String,
    /// Industry grouping shown above the case title.
    pub industry: String,
    /// Human-readable case title.
    pub label: String,
}

impl Case {
    /// Build a case from borrowed parts.
    pub fn new(case_id: &str, industry: &str, label: &str) -> Self {
        Self {
            case_id: case_id.to_owned(),
            industry: industry.to_owned(),
            label: label.to_owned(),
        }
    }
}

/// Ordered list of cases, looked up by `caseId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseCatalog(Vec<Case>);

impl CaseCatalog {
    /// Wrap an explicit list of cases.
    pub const fn new(cases: Vec<Case>) -> Self {
        Self(cases)
    }

    /// The five cases the service ships with.
    pub fn builtin() -> Self {
        Self(vec![
            Case::new(
                "phighting_phillies",
                "Sports",
                "Phighting Phillies Due Diligence",
            ),
            Case::new("kellogg_india", "Education", "Kellogg India Expansion"),
            Case::new(
                "pharmacy_supermarket",
                "Retail",
                "Supermarket Pharmacy Investment",
            ),
            Case::new(
                "rotisserie_ranch",
                "CPG",
                "Rotisserie Ranch Growth Strategy",
            ),
            Case::new("art_museum", "Arts", "NYC Art Museum Turnaround"),
        ])
    }

    /// Find a case by its identifier.
    pub fn get(&self, case_id: &str) -> Option<&Case> {
        self.0.iter().find(|c| c.case_id == case_id)
    }

    /// Iterate cases in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Case> {
        self.0.iter()
    }

    /// Number of cases in the catalog.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalog has no cases.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the cases as a slice.
    pub fn as_slice(&self) -> &[Case] {
        &self.0
    }
}

impl Default for CaseCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a CaseCatalog {
    type Item = &'a Case;
    type IntoIter = std::slice::Iter<'a, Case>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
