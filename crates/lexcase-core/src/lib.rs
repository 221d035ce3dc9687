pub mod classify;
pub mod document;
mod error;
pub mod report;

pub use classify::{Category, classify};
pub use document::{
    AnalysisDocument, ApplicableLaw, LegalIssue, RawDocument, RecommendedAction, Strength,
    Weakness,
};
pub use error::ReportError;
pub use report::{Presentation, RatedItem, Report, Section, SectionKind, assemble};
