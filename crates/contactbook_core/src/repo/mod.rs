//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for contacts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository APIs only accept connections that passed the bootstrap
//!   pre-check (`try_new`).
//! - Read paths reject invalid persisted state instead of masking it.

pub mod contact_repo;
