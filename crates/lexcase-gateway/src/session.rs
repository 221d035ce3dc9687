//! Caller-side guard allowing one outstanding analysis at a time.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::debug;

use crate::gateway::Gateway;
use crate::outcome::RequestOutcome;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an analysis is already in progress")]
    Busy,
}

/// Owns the "request outstanding" flag for one user session.
///
/// [`Gateway`] never deduplicates, so every submission goes through here.
#[derive(Debug, Default)]
pub struct AnalysisSession {
    in_flight: AtomicBool,
}

/// Held while a request is outstanding. The flag is cleared on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a submission is outstanding; callers disable their trigger.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn begin(&self) -> Result<InFlight<'_>, SessionError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SessionError::Busy)?;
        Ok(InFlight {
            flag: &self.in_flight,
        })
    }

    /// Run one analysis, or return [`SessionError::Busy`] without touching the
    /// gateway if another is outstanding.
    pub async fn analyze(
        &self,
        gateway: &Gateway,
        case_text: &str,
    ) -> Result<RequestOutcome, SessionError> {
        let _guard = self.begin().inspect_err(|_| {
            debug!("rejected submission while a request is outstanding");
        })?;
        Ok(gateway.analyze(case_text).await)
    }
}
