//! First-run example contacts.
//!
//! # Responsibility
//! - Insert a small fixed set of example rows into an empty database.
//!
//! # Invariants
//! - Seeding only runs when the `contacts` table has zero rows.
//! - All seed rows land in one batched statement and share one `created_at`.

use crate::db::DbResult;
use log::info;
use rusqlite::{params, Connection};

struct SeedContact {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    favorite: bool,
}

const SEED_CONTACTS: &[SeedContact] = &[
    SeedContact {
        name: "Nguyễn Văn A",
        phone: "0901234567",
        email: "vana@example.com",
        favorite: false,
    },
    SeedContact {
        name: "Trần Thị B",
        phone: "0912345678",
        email: "thib@example.com",
        favorite: false,
    },
    SeedContact {
        name: "Phạm Minh C",
        phone: "0987654321",
        email: "minhc@example.com",
        favorite: true,
    },
];

/// Returns the number of fixed seed rows.
pub fn seed_len() -> usize {
    SEED_CONTACTS.len()
}

/// Seeds example contacts when the table is empty. Returns the number of
/// rows inserted (zero when existing data was found and left untouched).
pub fn seed_if_empty(conn: &Connection) -> DbResult<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
    if count > 0 {
        return Ok(0);
    }

    // Single batched insert; `strftime('now')` is fixed per statement, so all
    // seed rows share one created_at.
    conn.execute(
        "INSERT INTO contacts (name, phone, email, favorite, created_at)
         VALUES (?1, ?2, ?3, ?4, (strftime('%s', 'now') * 1000)),
                (?5, ?6, ?7, ?8, (strftime('%s', 'now') * 1000)),
                (?9, ?10, ?11, ?12, (strftime('%s', 'now') * 1000));",
        params![
            SEED_CONTACTS[0].name,
            SEED_CONTACTS[0].phone,
            SEED_CONTACTS[0].email,
            SEED_CONTACTS[0].favorite,
            SEED_CONTACTS[1].name,
            SEED_CONTACTS[1].phone,
            SEED_CONTACTS[1].email,
            SEED_CONTACTS[1].favorite,
            SEED_CONTACTS[2].name,
            SEED_CONTACTS[2].phone,
            SEED_CONTACTS[2].email,
            SEED_CONTACTS[2].favorite,
        ],
    )?;

    info!(
        "event=db_seed module=db status=ok rows={}",
        SEED_CONTACTS.len()
    );
    Ok(SEED_CONTACTS.len())
}
