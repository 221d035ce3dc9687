//! HTTP client for the case-analysis endpoint.

use lexcase_core::RawDocument;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::outcome::{EMPTY_INPUT_MESSAGE, NETWORK_MESSAGE, RequestOutcome};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Issues analysis requests. Holds no per-request state; concurrent calls are
/// independent and are not deduplicated.
pub struct Gateway {
    client: reqwest::Client,
    analyze_url: String,
}

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    case_text: &'a str,
}

/// Error body shape. FastAPI puts the message under `detail`, either as a
/// string or as a list of validation entries.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<Detail>,
    message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Entries(Vec<DetailEntry>),
    Other(serde_json::Value),
}

#[derive(Deserialize)]
struct DetailEntry {
    msg: Option<String>,
}

impl Gateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| GatewayError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| GatewayError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            analyze_url: config.analyze_url(),
        })
    }

    pub fn analyze_url(&self) -> &str {
        &self.analyze_url
    }

    /// Submit case text for analysis.
    ///
    /// Blank text is rejected without a request. Otherwise exactly one
    /// request is made and its result is classified; there is no retry.
    pub async fn analyze(&self, case_text: &str) -> RequestOutcome {
        if case_text.trim().is_empty() {
            return RequestOutcome::ValidationError(EMPTY_INPUT_MESSAGE.to_string());
        }

        info!(url = %self.analyze_url, chars = case_text.len(), "requesting case analysis");
        let sent = self
            .client
            .post(&self.analyze_url)
            .json(&AnalyzeRequest { case_text })
            .send()
            .await;

        let outcome = match sent {
            Ok(resp) => read_response(resp).await,
            Err(err) => transport_failure(&err),
        };

        if outcome.is_success() {
            info!(outcome = outcome.kind(), "analysis request complete");
        } else {
            warn!(outcome = outcome.kind(), "analysis request failed");
        }
        outcome
    }
}

async fn read_response(resp: reqwest::Response) -> RequestOutcome {
    let status = resp.status();
    info!(status = status.as_u16(), "analysis service responded");
    match resp.text().await {
        Ok(body) => classify_response(status, body),
        Err(err) => transport_failure(&err),
    }
}

fn transport_failure(err: &reqwest::Error) -> RequestOutcome {
    warn!(error = %err, timeout = err.is_timeout(), "analysis transport error");
    if err.is_timeout() {
        RequestOutcome::Timeout
    } else {
        RequestOutcome::NetworkError(NETWORK_MESSAGE.to_string())
    }
}

/// Map a completed HTTP exchange onto an outcome.
///
/// 503 is checked before the body so an offline backend is always reported
/// as such, whatever message it carries.
pub(crate) fn classify_response(status: StatusCode, body: String) -> RequestOutcome {
    if status.is_success() {
        return RequestOutcome::Success(RawDocument::new(body));
    }
    if status == StatusCode::SERVICE_UNAVAILABLE {
        return RequestOutcome::ServiceUnavailable;
    }
    match error_message(&body) {
        Some(message) => RequestOutcome::ServerError(message),
        None => RequestOutcome::NetworkError(NETWORK_MESSAGE.to_string()),
    }
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let detail = match parsed.detail {
        Some(Detail::Text(text)) => Some(text),
        Some(Detail::Entries(entries)) => {
            let msgs: Vec<String> = entries
                .into_iter()
                .filter_map(|e| e.msg)
                .filter(|m| !m.is_empty())
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        Some(Detail::Other(_)) | None => None,
    };
    let non_empty = |m: &String| !m.is_empty();
    detail
        .filter(non_empty)
        .or_else(|| parsed.message.filter(non_empty))
}
