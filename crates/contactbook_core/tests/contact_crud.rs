use contactbook_core::db::migrations::latest_version;
use contactbook_core::db::open_db_in_memory;
use contactbook_core::{ContactDraft, ContactRepository, RepoError, SqliteContactRepository};
use rusqlite::Connection;

#[test]
fn insert_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let count_before = repo.count().unwrap();

    let draft = ContactDraft::new("Linh", "0900000000", "a@b.com");
    let id = repo.insert_contact(&draft).unwrap();

    assert_eq!(repo.count().unwrap(), count_before + 1);

    let contacts = repo.list_all().unwrap();
    let inserted = contacts
        .iter()
        .find(|contact| contact.id == id)
        .expect("inserted contact should be listed");
    assert_eq!(inserted.name, "Linh");
    assert_eq!(inserted.phone, "0900000000");
    assert_eq!(inserted.email, "a@b.com");
    assert!(!inserted.favorite);
    assert!(inserted.created_at > 0);
}

#[test]
fn list_orders_by_id_descending() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let first = repo
        .insert_contact(&ContactDraft::new("First", "0911111111", ""))
        .unwrap();
    let second = repo
        .insert_contact(&ContactDraft::new("Second", "0922222222", ""))
        .unwrap();
    assert!(second > first);

    let contacts = repo.list_all().unwrap();
    assert_eq!(contacts[0].id, second);
    assert_eq!(contacts[1].id, first);
}

#[test]
fn ids_are_never_reused_after_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let deleted_id = repo
        .insert_contact(&ContactDraft::new("Gone", "0933333333", ""))
        .unwrap();
    repo.delete_contact(deleted_id).unwrap();

    let next_id = repo
        .insert_contact(&ContactDraft::new("Next", "0944444444", ""))
        .unwrap();
    assert!(next_id > deleted_id);
}

#[test]
fn update_changes_mutable_fields_only() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let id = repo
        .insert_contact(&ContactDraft::new("Draft", "0900000000", "old@b.com"))
        .unwrap();
    repo.set_favorite(id, true).unwrap();
    let before = find_contact(&repo, id);

    repo.update_contact(id, &ContactDraft::new("Final", "0955555555", "new@b.com"))
        .unwrap();

    let after = find_contact(&repo, id);
    assert_eq!(after.name, "Final");
    assert_eq!(after.phone, "0955555555");
    assert_eq!(after.email, "new@b.com");
    assert_eq!(after.favorite, before.favorite);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn update_on_unknown_id_is_a_silent_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let count_before = repo.count().unwrap();

    repo.update_contact(9999, &ContactDraft::new("Ghost", "", ""))
        .unwrap();

    assert_eq!(repo.count().unwrap(), count_before);
}

#[test]
fn set_favorite_flips_only_the_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();

    let id = repo
        .insert_contact(&ContactDraft::new("Star", "0966666666", ""))
        .unwrap();
    let before = find_contact(&repo, id);

    repo.set_favorite(id, true).unwrap();
    let after = find_contact(&repo, id);

    assert!(after.favorite);
    assert_eq!(after.name, before.name);
    assert_eq!(after.phone, before.phone);
    assert_eq!(after.email, before.email);
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn delete_removes_the_row_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::try_new(&conn).unwrap();
    let count_before = repo.count().unwrap();

    let id = repo
        .insert_contact(&ContactDraft::new("Short lived", "0977777777", ""))
        .unwrap();
    repo.delete_contact(id).unwrap();
    repo.delete_contact(id).unwrap();

    assert_eq!(repo.count().unwrap(), count_before);
    assert!(repo.list_all().unwrap().iter().all(|c| c.id != id));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteContactRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_contacts_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteContactRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("contacts"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            phone TEXT,
            email TEXT,
            created_at INTEGER
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteContactRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "contacts",
            column: "favorite"
        })
    ));
}

fn find_contact(
    repo: &SqliteContactRepository<'_>,
    id: i64,
) -> contactbook_core::Contact {
    repo.list_all()
        .unwrap()
        .into_iter()
        .find(|contact| contact.id == id)
        .expect("contact should exist")
}
