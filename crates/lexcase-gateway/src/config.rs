use std::time::Duration;

/// Base URL of the reference deployment (backend on the local network).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/v1";

/// Analysis can take minutes on a local model.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Connection parameters for the analysis service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Service root including the API prefix, e.g. `http://host:8000/api/v1`.
    pub base_url: String,
    /// Upper bound on one request, connect through body.
    pub timeout: Duration,
    /// Fixed headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            headers: Vec::new(),
        }
    }
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// `POST` target for case analysis.
    pub fn analyze_url(&self) -> String {
        format!("{}/case/analyze", self.base_url.trim_end_matches('/'))
    }
}

/// Parse a `Name: value` header argument.
pub fn parse_header(arg: &str) -> Option<(String, String)> {
    let (name, value) = arg.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().to_string()))
}
