//! Remote contact acquisition for the import flow.
//!
//! # Responsibility
//! - Define the source contract the service imports from.
//! - Decode the remote JSON payload into candidate records.
//!
//! # Invariants
//! - Unknown payload fields are ignored.
//! - Missing `phone`/`email` fields decode to empty strings.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod http;

pub use http::HttpContactSource;

/// Result type for import source APIs.
pub type ImportResult<T> = Result<T, ImportError>;

/// Import-layer error for source construction, transport and decoding.
#[derive(Debug)]
pub enum ImportError {
    /// Source URL cannot be parsed or uses an unsupported scheme.
    InvalidUrl { url: String, message: String },
    /// Transport-level failure reported by the HTTP client.
    Http(reqwest::Error),
    /// Remote endpoint answered with a non-success status code.
    Status { status: u16, url: String },
    /// Response body is not a JSON array of contact objects.
    Payload(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidUrl { url, message } => {
                write!(f, "invalid import source url `{url}`: {message}")
            }
            Self::Http(err) => write!(f, "import fetch failed: {err}"),
            Self::Status { status, url } => {
                write!(f, "import source `{url}` answered with status {status}")
            }
            Self::Payload(message) => write!(f, "malformed import payload: {message}"),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ImportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// One record offered by a remote source.
///
/// The wire contract only promises `name`, `phone` and `email` string fields;
/// anything else in the payload is dropped during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CandidateContact {
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// Contract for anything the service can import contacts from.
pub trait ContactSource {
    /// Fetches the full candidate list from the source.
    fn fetch(&self) -> ImportResult<Vec<CandidateContact>>;

    /// Human-readable source label for logging.
    fn describe(&self) -> String {
        "unnamed source".to_string()
    }
}
