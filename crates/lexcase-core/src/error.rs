use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The body could not be read as an analysis document. Callers show the
    /// empty state instead of a partial report.
    #[error("malformed analysis document: {0}")]
    MalformedDocument(#[source] serde_json::Error),
}
