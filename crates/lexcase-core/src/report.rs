//! Report assembly: turns an [`AnalysisDocument`] into the ordered list of
//! sections a results view renders.
//!
//! Section order is fixed by [`SectionKind`] and does not depend on the order
//! of keys in the source JSON. A section is emitted only when its field holds
//! data; there are never empty headings.

use serde::Serialize;
use tracing::debug;

use crate::classify::{Category, classify};
use crate::document::{AnalysisDocument, ApplicableLaw, RawDocument, Strength};
use crate::error::ReportError;

/// Section identity, declared in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    CaseType,
    Summary,
    KeyFacts,
    LegalIssues,
    ApplicableLaws,
    Strengths,
    Weaknesses,
    RecommendedActions,
    EvidenceNeeded,
    Precedents,
    EstimatedOutcome,
    Timeline,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::CaseType,
        SectionKind::Summary,
        SectionKind::KeyFacts,
        SectionKind::LegalIssues,
        SectionKind::ApplicableLaws,
        SectionKind::Strengths,
        SectionKind::Weaknesses,
        SectionKind::RecommendedActions,
        SectionKind::EvidenceNeeded,
        SectionKind::Precedents,
        SectionKind::EstimatedOutcome,
        SectionKind::Timeline,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::CaseType => "Case Type",
            SectionKind::Summary => "Case Summary",
            SectionKind::KeyFacts => "Key Facts",
            SectionKind::LegalIssues => "Legal Issues",
            SectionKind::ApplicableLaws => "Applicable Laws",
            SectionKind::Strengths => "Strengths",
            SectionKind::Weaknesses => "Weaknesses & Risks",
            SectionKind::RecommendedActions => "Recommended Actions",
            SectionKind::EvidenceNeeded => "Evidence Required",
            SectionKind::Precedents => "Relevant Precedents",
            SectionKind::EstimatedOutcome => "Estimated Outcome",
            SectionKind::Timeline => "Timeline Considerations",
        }
    }

    pub fn presentation(self) -> Presentation {
        match self {
            SectionKind::CaseType => Presentation::Badge,
            SectionKind::Summary => Presentation::Text,
            SectionKind::KeyFacts | SectionKind::EvidenceNeeded | SectionKind::Precedents => {
                Presentation::Bulleted
            }
            SectionKind::LegalIssues
            | SectionKind::Weaknesses
            | SectionKind::RecommendedActions => Presentation::Prioritized,
            SectionKind::ApplicableLaws | SectionKind::Strengths => Presentation::Detail,
            SectionKind::EstimatedOutcome | SectionKind::Timeline => Presentation::Narrative,
        }
    }
}

/// How a renderer should lay a section out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    Badge,
    Text,
    Bulleted,
    Prioritized,
    Detail,
    Narrative,
}

/// A list entry carrying a High / Medium / Low rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatedItem {
    pub title: String,
    /// Level text as supplied by the service.
    pub level: Option<String>,
    pub category: Category,
    /// Badge colour for `category`.
    pub color: &'static str,
    pub detail: String,
}

impl RatedItem {
    fn new(title: &str, level: Option<&str>, detail: &str) -> Self {
        let category = classify(level);
        Self {
            title: title.to_owned(),
            level: level.map(str::to_owned),
            category,
            color: category.color(),
            detail: detail.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section", content = "content", rename_all = "snake_case")]
pub enum Section {
    CaseType(String),
    Summary(String),
    KeyFacts(Vec<String>),
    LegalIssues(Vec<RatedItem>),
    ApplicableLaws(Vec<ApplicableLaw>),
    Strengths(Vec<Strength>),
    Weaknesses(Vec<RatedItem>),
    RecommendedActions(Vec<RatedItem>),
    EvidenceNeeded(Vec<String>),
    Precedents(Vec<String>),
    EstimatedOutcome(String),
    Timeline(String),
}

impl Section {
    pub fn kind(&self) -> SectionKind {
        match self {
            Section::CaseType(_) => SectionKind::CaseType,
            Section::Summary(_) => SectionKind::Summary,
            Section::KeyFacts(_) => SectionKind::KeyFacts,
            Section::LegalIssues(_) => SectionKind::LegalIssues,
            Section::ApplicableLaws(_) => SectionKind::ApplicableLaws,
            Section::Strengths(_) => SectionKind::Strengths,
            Section::Weaknesses(_) => SectionKind::Weaknesses,
            Section::RecommendedActions(_) => SectionKind::RecommendedActions,
            Section::EvidenceNeeded(_) => SectionKind::EvidenceNeeded,
            Section::Precedents(_) => SectionKind::Precedents,
            Section::EstimatedOutcome(_) => SectionKind::EstimatedOutcome,
            Section::Timeline(_) => SectionKind::Timeline,
        }
    }

    pub fn heading(&self) -> &'static str {
        self.kind().heading()
    }

    pub fn presentation(&self) -> Presentation {
        self.kind().presentation()
    }
}

/// Ordered sections for one analysis. Built fresh for every render.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    pub fn from_document(doc: &AnalysisDocument) -> Self {
        let mut sections = Vec::new();

        if let Some(v) = text(&doc.case_type) {
            sections.push(Section::CaseType(v));
        }
        if let Some(v) = text(&doc.case_summary) {
            sections.push(Section::Summary(v));
        }
        if let Some(v) = list(&doc.key_facts) {
            sections.push(Section::KeyFacts(v.to_vec()));
        }
        if let Some(v) = list(&doc.legal_issues) {
            let items = v
                .iter()
                .map(|i| RatedItem::new(&i.issue, i.importance.as_deref(), &i.description))
                .collect();
            sections.push(Section::LegalIssues(items));
        }
        if let Some(v) = list(&doc.applicable_laws) {
            sections.push(Section::ApplicableLaws(v.to_vec()));
        }
        if let Some(v) = list(&doc.strengths) {
            sections.push(Section::Strengths(v.to_vec()));
        }
        if let Some(v) = list(&doc.weaknesses) {
            let items = v
                .iter()
                .map(|w| RatedItem::new(&w.point, w.severity.as_deref(), &w.explanation))
                .collect();
            sections.push(Section::Weaknesses(items));
        }
        if let Some(v) = list(&doc.recommended_actions) {
            let items = v
                .iter()
                .map(|a| RatedItem::new(&a.action, a.priority.as_deref(), &a.rationale))
                .collect();
            sections.push(Section::RecommendedActions(items));
        }
        if let Some(v) = list(&doc.evidence_needed) {
            sections.push(Section::EvidenceNeeded(v.to_vec()));
        }
        if let Some(v) = list(&doc.precedents) {
            sections.push(Section::Precedents(v.to_vec()));
        }
        if let Some(v) = text(&doc.estimated_outcome) {
            sections.push(Section::EstimatedOutcome(v));
        }
        if let Some(v) = text(&doc.timeline_considerations) {
            sections.push(Section::Timeline(v));
        }

        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(Section::kind).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn get(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind() == kind)
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

/// Parse a raw response body and assemble its report.
///
/// A body that does not parse is rejected as a whole with
/// [`ReportError::MalformedDocument`].
pub fn assemble(raw: &RawDocument) -> Result<Report, ReportError> {
    let doc = raw.parse()?;
    let report = Report::from_document(&doc);
    debug!(sections = report.len(), "assembled report");
    Ok(report)
}

fn text(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_owned)
}

fn list<T>(value: &Option<Vec<T>>) -> Option<&[T]> {
    value.as_deref().filter(|v| !v.is_empty())
}
