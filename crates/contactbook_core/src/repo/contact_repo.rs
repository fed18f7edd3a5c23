//! Contact repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `contacts` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `created_at` is set by the insert statement and never touched by updates.
//! - `update_contact`, `set_favorite` and `delete_contact` are silent no-ops
//!   for absent ids.
//! - `list_all` orders rows by `id DESC` (autoincrement key order, not
//!   chronological order; retained as a known quirk of the original design).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone,
    email,
    favorite,
    created_at
FROM contacts";

const REQUIRED_COLUMNS: &[&str] = &["id", "name", "phone", "email", "favorite", "created_at"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    /// Connection did not go through `open_db`/`open_db_in_memory` bootstrap.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open the database through db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    /// Inserts a new row with `favorite=0` and `created_at=now`, returning
    /// the storage-assigned id.
    fn insert_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId>;
    /// Updates all mutable fields of one row. Silent no-op for absent ids.
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    /// Updates only the favorite flag. Silent no-op for absent ids.
    fn set_favorite(&self, id: ContactId, favorite: bool) -> RepoResult<()>;
    /// Removes one row permanently. Silent no-op for absent ids.
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    /// Returns all rows ordered by `id DESC` (most recently created first).
    fn list_all(&self) -> RepoResult<Vec<Contact>>;
    /// Returns the total row count.
    fn count(&self) -> RepoResult<i64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    /// Wraps a bootstrapped connection after a schema pre-check.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest known migration.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `contacts`
    ///   shape does not match what this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_bootstrapped(conn)?;
        Ok(Self { conn })
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn insert_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        self.conn.execute(
            "INSERT INTO contacts (name, phone, email, favorite, created_at)
             VALUES (?1, ?2, ?3, 0, (strftime('%s', 'now') * 1000));",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str()
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        // changed == 0 (unknown id) is deliberately not an error.
        self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                phone = ?2,
                email = ?3
             WHERE id = ?4;",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str(),
                id
            ],
        )?;

        Ok(())
    }

    fn set_favorite(&self, id: ContactId, favorite: bool) -> RepoResult<()> {
        self.conn.execute(
            "UPDATE contacts SET favorite = ?1 WHERE id = ?2;",
            params![bool_to_int(favorite), id],
        )?;

        Ok(())
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} ORDER BY id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn count(&self) -> RepoResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn ensure_bootstrapped(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'contacts'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("contacts"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('contacts');")?;
    let mut rows = stmt.query([])?;
    let mut present: Vec<String> = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get(0)?);
    }

    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "contacts",
                column,
            });
        }
    }

    Ok(())
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let favorite = match row.get::<_, i64>("favorite")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid favorite value `{other}` in contacts.favorite"
            )));
        }
    };

    let created_at = row
        .get::<_, Option<i64>>("created_at")?
        .ok_or_else(|| RepoError::InvalidData("missing contacts.created_at".to_string()))?;

    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        favorite,
        created_at,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
