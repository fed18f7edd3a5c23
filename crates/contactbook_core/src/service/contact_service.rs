//! Contact use-case service.
//!
//! # Responsibility
//! - Hold the authoritative in-memory contact cache.
//! - Validate input and coordinate all mutation through the repository.
//! - Run the best-effort import flow against a remote source.
//!
//! # Invariants
//! - `ValidationError` aborts an operation before any storage access.
//! - Add/edit always follow a successful write with a full cache reload.
//! - `toggle_favorite` and `confirm_delete` patch the cache in place instead
//!   of reloading; the final visible state matches a full reload.
//! - At most one import is in flight; a second call is rejected while
//!   `loading` is set.

use crate::import::{ContactSource, ImportError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for contact use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Bad user input; nothing was written.
    Validation(ContactValidationError),
    /// Persistence-layer failure; the cache keeps its last snapshot.
    Repo(RepoError),
    /// Remote fetch or decode failure during import.
    Import(ImportError),
    /// A second import was requested while one is in flight.
    ImportInFlight,
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
            Self::ImportInFlight => write!(f, "an import is already in flight"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Import(err) => Some(err),
            Self::ImportInFlight => None,
        }
    }
}

impl From<ContactValidationError> for ServiceError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<ImportError> for ServiceError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// Outcome counters for one import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Candidates persisted during this run.
    pub imported: usize,
    /// Candidates dropped by the dedup/validation rules.
    pub skipped: usize,
}

/// Proof that a delete was requested for a currently cached contact.
///
/// Presentation obtains a token from [`ContactService::request_delete`],
/// shows its confirmation prompt, and either passes the token to
/// [`ContactService::confirm_delete`] or drops it to cancel. The private
/// field keeps tokens non-forgeable outside this crate.
#[must_use = "dropping the token cancels the delete"]
#[derive(Debug)]
pub struct DeleteToken {
    id: ContactId,
}

impl DeleteToken {
    /// Returns the id of the contact this token targets.
    pub fn contact_id(&self) -> ContactId {
        self.id
    }
}

/// Stateful coordinator between presentation, validation and persistence.
pub struct ContactService<R: ContactRepository> {
    repo: R,
    contacts: Vec<Contact>,
    loading: bool,
    last_error: Option<String>,
    revision: u64,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service with an empty cache. Call [`Self::refresh`] to load
    /// the first snapshot.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            contacts: Vec::new(),
            loading: false,
            last_error: None,
            revision: 0,
        }
    }

    /// Current cache snapshot, ordered by `id DESC`.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Whether an import is in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed import, cleared when a new import starts.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Monotonic cache generation counter. Increments on every cache change,
    /// so presentation can detect staleness without observing internals.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replaces the cache with a full read of storage.
    pub fn refresh(&mut self) -> ServiceResult<()> {
        self.contacts = self.repo.list_all()?;
        self.revision += 1;
        Ok(())
    }

    /// Validates and persists a new contact, then reloads the cache.
    ///
    /// # Contract
    /// - Trimmed `name` must be non-empty.
    /// - `email` may be empty; when non-empty it must contain `@`.
    /// - The new row starts with `favorite=false` and a fresh `created_at`.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<()> {
        let draft = ContactDraft::new(name, phone, email);
        draft.validate()?;

        let id = self.repo.insert_contact(&draft)?;
        info!("event=contact_add module=service status=ok id={id}");
        self.refresh()
    }

    /// Validates and updates all mutable fields of one contact, then reloads
    /// the cache. An unknown `id` is a silent no-op.
    pub fn edit(
        &mut self,
        id: ContactId,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<()> {
        let draft = ContactDraft::new(name, phone, email);
        draft.validate()?;

        self.repo.update_contact(id, &draft)?;
        info!("event=contact_edit module=service status=ok id={id}");
        self.refresh()
    }

    /// Flips the favorite flag of one cached contact.
    ///
    /// Persists through the repository and patches the cache entry in place
    /// (replace-by-id) without a full reload. An id not present in the cache
    /// is a silent no-op.
    pub fn toggle_favorite(&mut self, id: ContactId) -> ServiceResult<()> {
        let Some(position) = self.contacts.iter().position(|contact| contact.id == id) else {
            return Ok(());
        };

        let next = !self.contacts[position].favorite;
        self.repo.set_favorite(id, next)?;
        self.contacts[position].favorite = next;
        self.revision += 1;
        info!("event=contact_favorite module=service status=ok id={id} favorite={next}");
        Ok(())
    }

    /// First phase of delete: returns a token when `id` is currently cached,
    /// `None` otherwise. Presentation owns the confirmation prompt.
    pub fn request_delete(&self, id: ContactId) -> Option<DeleteToken> {
        self.contacts
            .iter()
            .any(|contact| contact.id == id)
            .then_some(DeleteToken { id })
    }

    /// Second phase of delete: removes the row permanently and filters the
    /// cache entry out by id.
    pub fn confirm_delete(&mut self, token: DeleteToken) -> ServiceResult<()> {
        self.repo.delete_contact(token.id)?;
        self.contacts.retain(|contact| contact.id != token.id);
        self.revision += 1;
        info!("event=contact_delete module=service status=ok id={}", token.id);
        Ok(())
    }

    /// Imports candidates from a remote source, best-effort.
    ///
    /// # Contract
    /// - Rejected with `ImportInFlight` while another import is loading.
    /// - A candidate is skipped when its phone is empty, when a cached
    ///   contact already has the exact same phone, or when it fails
    ///   validation. Skips are counted, not fatal.
    /// - Fetch/decode failure records `last_error` and aborts; additions
    ///   already committed in the loop stay committed.
    pub fn import(&mut self, source: &dyn ContactSource) -> ServiceResult<ImportSummary> {
        if self.loading {
            return Err(ServiceError::ImportInFlight);
        }

        self.loading = true;
        self.last_error = None;
        info!(
            "event=contact_import module=service status=start source={}",
            source.describe()
        );

        let outcome = self.import_inner(source);
        self.loading = false;

        match &outcome {
            Ok(summary) => {
                info!(
                    "event=contact_import module=service status=ok source={} imported={} skipped={}",
                    source.describe(),
                    summary.imported,
                    summary.skipped
                );
            }
            Err(ServiceError::Import(err)) => {
                self.last_error = Some(err.to_string());
                error!(
                    "event=contact_import module=service status=error source={} error={err}",
                    source.describe()
                );
            }
            Err(err) => {
                error!(
                    "event=contact_import module=service status=error source={} error={err}",
                    source.describe()
                );
            }
        }

        outcome
    }

    fn import_inner(&mut self, source: &dyn ContactSource) -> ServiceResult<ImportSummary> {
        let candidates = source.fetch()?;
        let mut summary = ImportSummary::default();

        for candidate in candidates {
            // Dedup key is the phone, exact case-sensitive match against the
            // cache. The reload after each insert makes duplicates within one
            // payload dedup against earlier candidates too.
            if candidate.phone.is_empty()
                || self
                    .contacts
                    .iter()
                    .any(|contact| contact.phone == candidate.phone)
            {
                summary.skipped += 1;
                continue;
            }

            let draft = ContactDraft::new(candidate.name, candidate.phone, candidate.email);
            if draft.validate().is_err() {
                summary.skipped += 1;
                continue;
            }

            self.repo.insert_contact(&draft)?;
            self.refresh()?;
            summary.imported += 1;
        }

        Ok(summary)
    }

    /// Read-only filter over the cache; never touches storage.
    ///
    /// A contact matches when the favorites gate passes AND `query` is a
    /// case-insensitive substring of its name or phone. An empty query
    /// matches everything.
    pub fn search(&self, query: &str, favorites_only: bool) -> Vec<&Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .iter()
            .filter(|contact| {
                if favorites_only && !contact.favorite {
                    return false;
                }
                needle.is_empty()
                    || contact.name.to_lowercase().contains(&needle)
                    || contact.phone.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
