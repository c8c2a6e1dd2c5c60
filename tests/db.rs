use std::time::Duration;

use diesel::RunQueryDsl;
use diesel::sql_types::Integer;
use member_search::db::{ConnectionOptions, establish_connection_pool_with, get_connection};

mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let test_db = common::TestDb::new("test_creates_and_removes_db_files.db");
    let conn = get_connection(test_db.pool());
    assert!(conn.is_ok());
}

#[derive(diesel::QueryableByName)]
struct PragmaValue {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_connections_enforce_foreign_keys.db");
    let mut conn = get_connection(test_db.pool()).unwrap();
    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaValue>(&mut conn)
        .unwrap();
    assert_eq!(pragma.foreign_keys, 1);
}

#[test]
fn test_pool_respects_max_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_pool_respects_max_size.db");
    let options = ConnectionOptions {
        enable_wal: false,
        enable_foreign_keys: true,
        busy_timeout: Some(Duration::from_millis(500)),
    };
    let pool = establish_connection_pool_with(path.to_str().unwrap(), options, Some(2)).unwrap();
    assert_eq!(pool.max_size(), 2);
}
