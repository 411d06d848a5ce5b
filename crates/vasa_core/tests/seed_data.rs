use rusqlite::Connection;
use std::sync::{Arc, Barrier};
use std::thread;
use vasa_core::db::seed::{DEMO_PARCEL_NAME, DEMO_PRODUCER_CODE, DEMO_PRODUCT_NAME};
use vasa_core::db::{open_db, open_db_in_memory};
use vasa_core::seed_demo_data;

#[test]
fn first_seed_inserts_demo_rows() {
    let conn = open_db_in_memory().unwrap();

    let report = seed_demo_data(&conn).unwrap();
    assert_eq!(report.producers, 1);
    assert_eq!(report.parcels, 1);
    assert_eq!(report.products, 1);

    let (name, region): (String, String) = conn
        .query_row(
            "SELECT name, region FROM producers WHERE code = ?1",
            [DEMO_PRODUCER_CODE],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Jean Ranaivo");
    assert_eq!(region, "SAVA");

    let crop: String = conn
        .query_row(
            "SELECT crop FROM parcels WHERE name = ?1",
            [DEMO_PARCEL_NAME],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(crop, "cacao");
}

#[test]
fn seeding_twice_leaves_single_demo_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.sqlite3");

    let conn = open_db(&path).unwrap();
    assert!(seed_demo_data(&conn).unwrap().inserted_any());
    drop(conn);

    let conn = open_db(&path).unwrap();
    let report = seed_demo_data(&conn).unwrap();
    assert!(!report.inserted_any());

    assert_eq!(
        count_where(&conn, "producers", "code", DEMO_PRODUCER_CODE),
        1
    );
    assert_eq!(count_where(&conn, "parcels", "name", DEMO_PARCEL_NAME), 1);
    assert_eq!(count_where(&conn, "products", "name", DEMO_PRODUCT_NAME), 1);
}

#[test]
fn seed_fills_gaps_left_by_partial_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO products (name, crop) VALUES (?1, 'cacao')",
        [DEMO_PRODUCT_NAME],
    )
    .unwrap();

    let report = seed_demo_data(&conn).unwrap();
    assert_eq!(report.producers, 1);
    assert_eq!(report.parcels, 1);
    assert_eq!(report.products, 0);
}

#[test]
fn concurrent_seeders_insert_demo_rows_once() {
    const SEEDERS: usize = 8;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("replicas.sqlite3");
    drop(open_db(&path).unwrap());

    let barrier = Arc::new(Barrier::new(SEEDERS));
    let handles: Vec<_> = (0..SEEDERS)
        .map(|_| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let conn = open_db(&path).unwrap();
                barrier.wait();
                seed_demo_data(&conn).unwrap()
            })
        })
        .collect();
    let reports: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(reports.iter().filter(|r| r.inserted_any()).count(), 1);
    let conn = open_db(&path).unwrap();
    assert_eq!(count_all(&conn, "producers"), 1);
    assert_eq!(count_all(&conn, "parcels"), 1);
    assert_eq!(count_all(&conn, "products"), 1);
}

fn count_all(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

fn count_where(conn: &Connection, table: &str, column: &str, value: &str) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE {column} = ?1"),
        [value],
        |row| row.get(0),
    )
    .unwrap()
}
