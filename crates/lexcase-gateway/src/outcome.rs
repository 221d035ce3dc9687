//! Terminal result of one analysis attempt.

use lexcase_core::RawDocument;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter case details.";
pub const NETWORK_MESSAGE: &str =
    "Unable to reach the analysis service. Check your connection and try again.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// 2xx; the body is passed through untouched.
    Success(RawDocument),
    /// Rejected locally before any request was made.
    ValidationError(String),
    /// HTTP 503.
    ServiceUnavailable,
    /// The configured time bound elapsed.
    Timeout,
    /// Error response carrying its own message, kept verbatim.
    ServerError(String),
    NetworkError(String),
}

impl RequestOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RequestOutcome::Success(_))
    }

    /// Short machine-friendly name, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestOutcome::Success(_) => "success",
            RequestOutcome::ValidationError(_) => "validation_error",
            RequestOutcome::ServiceUnavailable => "service_unavailable",
            RequestOutcome::Timeout => "timeout",
            RequestOutcome::ServerError(_) => "server_error",
            RequestOutcome::NetworkError(_) => "network_error",
        }
    }

    /// Title and body for the message shown to the user. `None` on success.
    pub fn user_message(&self) -> Option<(&'static str, String)> {
        let msg = match self {
            RequestOutcome::Success(_) => return None,
            RequestOutcome::ValidationError(m) => ("Validation Error", m.clone()),
            RequestOutcome::ServiceUnavailable => (
                "Service Unavailable",
                "The analysis backend is offline. Please try again later or contact support."
                    .to_string(),
            ),
            RequestOutcome::Timeout => (
                "Analysis Timed Out",
                "The analysis is taking unusually long. Please try again.".to_string(),
            ),
            RequestOutcome::ServerError(m) => ("Analysis Failed", m.clone()),
            RequestOutcome::NetworkError(m) => ("Connection Error", m.clone()),
        };
        Some(msg)
    }

    /// Whether resubmitting the same text could succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            RequestOutcome::Success(_) | RequestOutcome::ValidationError(_)
        )
    }
}
