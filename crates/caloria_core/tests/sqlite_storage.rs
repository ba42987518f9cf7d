use caloria_core::{
    FoodFormData, FoodStore, KeyValueStorage, ManualClock, SqliteKeyValueStorage, StorageError,
    SLOT_SCHEMA_VERSION, STORAGE_KEY,
};
use chrono::{TimeZone, Utc};
use rusqlite::Connection;

fn clock() -> ManualClock {
    ManualClock::utc(Utc.with_ymd_and_hms(2026, 10, 17, 8, 30, 0).unwrap())
}

fn slot_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn fresh_file_gets_slot_table_and_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteKeyValueStorage::open(dir.path().join("caloria.sqlite3")).unwrap();

    assert_eq!(slot_version(storage.connection()), SLOT_SCHEMA_VERSION);
    assert!(storage.get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn slots_written_before_reopen_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caloria.sqlite3");

    SqliteKeyValueStorage::open(&path)
        .unwrap()
        .set("theme", "oscuro")
        .unwrap();

    let storage = SqliteKeyValueStorage::open(&path).unwrap();
    assert_eq!(storage.get("theme").unwrap().as_deref(), Some("oscuro"));
    assert_eq!(slot_version(storage.connection()), SLOT_SCHEMA_VERSION);
}

#[test]
fn file_from_newer_build_is_refused_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let Err(err) = SqliteKeyValueStorage::open(&path) else {
        panic!("expected newer slot database to be refused");
    };
    assert!(matches!(
        err,
        StorageError::UnsupportedSchemaVersion {
            found: 999,
            supported: SLOT_SCHEMA_VERSION
        }
    ));
    let conn = Connection::open(&path).unwrap();
    assert_eq!(slot_version(&conn), 999);
}

#[test]
fn set_replaces_in_place_and_remove_is_idempotent() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();

    storage.set("slot", "one").unwrap();
    storage.set("slot", "two").unwrap();
    assert_eq!(storage.get("slot").unwrap().as_deref(), Some("two"));
    let rows: i64 = storage
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);

    storage.remove("slot").unwrap();
    storage.remove("slot").unwrap();
    assert!(storage.get("slot").unwrap().is_none());
}

#[test]
fn write_after_table_loss_surfaces_sqlite_error() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();
    storage
        .connection()
        .execute_batch("DROP TABLE kv_slots;")
        .unwrap();

    let err = storage.set("slot", "value").unwrap_err();
    assert!(matches!(err, StorageError::Sqlite(_)));
}

#[test]
fn store_survives_process_restart_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caloria.sqlite3");
    let clock = clock();

    let first_id = {
        let storage = SqliteKeyValueStorage::open(&path).unwrap();
        let mut store = FoodStore::open(storage, &clock);
        let first = store.add_food(&FoodFormData::new("Pollo", "200g", 250, "08:30"));
        store.add_food(&FoodFormData::new("Arroz", "1 taza", 150, "08:35"));
        first.id
    };

    let store = FoodStore::open(SqliteKeyValueStorage::open(&path).unwrap(), &clock);
    assert_eq!(store.total_calories(), 400);
    assert_eq!(store.foods()[0].id, first_id);
    assert_eq!(store.foods()[1].name, "Arroz");
}

#[test]
fn cleared_store_leaves_no_slot_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caloria.sqlite3");
    let clock = clock();
    {
        let mut store = FoodStore::open(SqliteKeyValueStorage::open(&path).unwrap(), &clock);
        store.add_food(&FoodFormData::new("Pan", "1", 80, "09:00"));
        assert_eq!(store.clear(), 1);
    }

    let storage = SqliteKeyValueStorage::open(&path).unwrap();
    assert!(storage.get(STORAGE_KEY).unwrap().is_none());
}

#[test]
fn store_degrades_when_table_is_missing() {
    let storage = SqliteKeyValueStorage::open_in_memory().unwrap();
    storage.set(STORAGE_KEY, "[]").unwrap();
    storage
        .connection()
        .execute_batch("DROP TABLE kv_slots;")
        .unwrap();
    let clock = clock();

    let mut store = FoodStore::open(&storage, &clock);
    assert!(store.foods().is_empty());

    store.add_food(&FoodFormData::new("Pan", "1", 80, "09:00"));
    assert_eq!(store.total_calories(), 80);
}
