//! Analysis document returned by the case-analysis service.
//!
//! Every top-level field is optional. JSON `null` is treated the same as an
//! absent key, and unknown keys are ignored.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReportError;

/// Structured case analysis as produced by `POST /case/analyze`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    pub case_type: Option<String>,
    pub case_summary: Option<String>,
    pub key_facts: Option<Vec<String>>,
    pub legal_issues: Option<Vec<LegalIssue>>,
    pub applicable_laws: Option<Vec<ApplicableLaw>>,
    pub strengths: Option<Vec<Strength>>,
    pub weaknesses: Option<Vec<Weakness>>,
    pub recommended_actions: Option<Vec<RecommendedAction>>,
    pub evidence_needed: Option<Vec<String>>,
    pub precedents: Option<Vec<String>>,
    pub estimated_outcome: Option<String>,
    pub timeline_considerations: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalIssue {
    #[serde(deserialize_with = "null_as_empty")]
    pub issue: String,
    /// High / Medium / Low, as written by the service.
    pub importance: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicableLaw {
    /// Name of the statute or section, e.g. `IPC Section 420`.
    #[serde(deserialize_with = "null_as_empty")]
    pub law: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub relevance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strength {
    #[serde(deserialize_with = "null_as_empty")]
    pub point: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weakness {
    #[serde(deserialize_with = "null_as_empty")]
    pub point: String,
    pub severity: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub explanation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendedAction {
    #[serde(deserialize_with = "null_as_empty")]
    pub action: String,
    pub priority: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub rationale: String,
}

/// Response body exactly as received from the service, not yet parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument(String);

impl RawDocument {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the body into an [`AnalysisDocument`].
    ///
    /// Anything that is not a JSON object of the expected shape is rejected
    /// whole; there is no partial result.
    pub fn parse(&self) -> Result<AnalysisDocument, ReportError> {
        AnalysisDocument::from_json(&self.0)
    }
}

impl From<String> for RawDocument {
    fn from(body: String) -> Self {
        Self(body)
    }
}

/// Element text fields: `null` reads the same as a missing key.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnalysisDocument {
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json).map_err(ReportError::MalformedDocument)
    }
}
