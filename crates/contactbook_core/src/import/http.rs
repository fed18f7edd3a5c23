//! Blocking HTTP contact source.
//!
//! # Responsibility
//! - Validate the configured source URL at construction time.
//! - Fetch and decode the remote JSON contact list.
//!
//! # Invariants
//! - Only `http` and `https` schemes are accepted.
//! - A non-2xx response never reaches payload decoding.

use super::{CandidateContact, ContactSource, ImportError, ImportResult};
use log::info;
use url::Url;

/// Contact source backed by a blocking HTTP GET against a fixed URL.
#[derive(Debug)]
pub struct HttpContactSource {
    url: Url,
    client: reqwest::blocking::Client,
}

impl HttpContactSource {
    /// Builds a source for one endpoint, failing early on an unusable URL.
    pub fn new(url: &str) -> ImportResult<Self> {
        let parsed = Url::parse(url).map_err(|err| ImportError::InvalidUrl {
            url: url.to_string(),
            message: err.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ImportError::InvalidUrl {
                    url: url.to_string(),
                    message: format!("unsupported scheme `{other}`"),
                });
            }
        }

        Ok(Self {
            url: parsed,
            client: reqwest::blocking::Client::new(),
        })
    }
}

impl ContactSource for HttpContactSource {
    fn fetch(&self) -> ImportResult<Vec<CandidateContact>> {
        let response = self.client.get(self.url.clone()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text()?;
        let candidates = serde_json::from_str::<Vec<CandidateContact>>(&body)
            .map_err(|err| ImportError::Payload(err.to_string()))?;

        info!(
            "event=import_fetch module=import status=ok url={} candidates={}",
            self.url,
            candidates.len()
        );
        Ok(candidates)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}
