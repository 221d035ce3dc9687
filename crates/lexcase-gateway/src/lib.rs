//! Analysis request gateway: one bounded HTTP call per submission, classified
//! into a [`RequestOutcome`].

pub mod config;
pub mod gateway;
pub mod outcome;
pub mod session;

pub use config::{GatewayConfig, parse_header};
pub use gateway::{Gateway, GatewayError};
pub use outcome::RequestOutcome;
pub use session::{AnalysisSession, InFlight, SessionError};
