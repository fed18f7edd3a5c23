//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical persisted contact record.
//! - Provide the draft input shape and its validation rules.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never reused.
//! - `name` is non-empty (after trimming) for every persisted record.
//! - `created_at` is set once at insert and never changes.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable storage-assigned identifier for a contact row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ContactId = i64;

/// Canonical persisted contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Autoincrement key assigned by storage; never null, never reused.
    pub id: ContactId,
    /// Display name; validation guarantees it is non-empty when persisted.
    pub name: String,
    /// May be empty. Used as the dedup key during import (exact match).
    pub phone: String,
    /// May be empty. When non-empty it contains `@` (shallow check only).
    pub email: String,
    /// Starred flag; defaults to `false` at creation.
    pub favorite: bool,
    /// Unix epoch milliseconds, set once at insert.
    pub created_at: i64,
}

/// Validation failures for draft contact input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactValidationError {
    /// Trimmed name is empty.
    EmptyName,
    /// Non-empty email without an `@` character.
    EmailMissingAt(String),
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "contact name cannot be empty"),
            Self::EmailMissingAt(email) => {
                write!(f, "email `{email}` must contain an `@` character")
            }
        }
    }
}

impl Error for ContactValidationError {}

/// Unpersisted contact input shared by add, edit and import paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactDraft {
    /// Builds a draft from raw user or import input. No validation happens
    /// here; callers run [`ContactDraft::validate`] before persistence.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }

    /// Checks business validation rules for this draft.
    ///
    /// # Contract
    /// - Trimmed `name` must be non-empty.
    /// - `email` may be empty; when non-empty it must contain `@`.
    /// - `phone` is unconstrained (it may be empty).
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if !self.email.is_empty() && !self.email.contains('@') {
            return Err(ContactValidationError::EmailMissingAt(self.email.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactDraft, ContactValidationError};

    #[test]
    fn draft_with_name_and_empty_optionals_is_valid() {
        let draft = ContactDraft::new("Linh", "", "");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let draft = ContactDraft::new("   ", "0900000000", "a@b.com");
        assert_eq!(draft.validate(), Err(ContactValidationError::EmptyName));
    }

    #[test]
    fn email_without_at_is_rejected() {
        let draft = ContactDraft::new("Linh", "", "bad-email");
        assert_eq!(
            draft.validate(),
            Err(ContactValidationError::EmailMissingAt("bad-email".to_string()))
        );
    }

    #[test]
    fn email_with_at_passes_shallow_check() {
        // The rule is intentionally shallow: `@` presence only.
        let draft = ContactDraft::new("Linh", "", "a@b");
        assert_eq!(draft.validate(), Ok(()));
    }
}
