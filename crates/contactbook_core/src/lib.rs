//! Core domain logic for the contactbook app.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use import::{CandidateContact, ContactSource, HttpContactSource, ImportError, ImportResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
pub use repo::contact_repo::{ContactRepository, RepoError, RepoResult, SqliteContactRepository};
pub use service::contact_service::{
    ContactService, DeleteToken, ImportSummary, ServiceError, ServiceResult,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
