//! Domain model for the contact book.
//!
//! # Responsibility
//! - Define the canonical contact record persisted by storage.
//! - Define the validated input shape shared by add/edit/import.
//!
//! # Invariants
//! - Every persisted contact is identified by a stable storage-assigned `ContactId`.
//! - Input validation runs before any storage access.

pub mod contact;
