//! Exercises the MariaDB driver against a real server.
//!
//! Skipped unless `MARIADB_TEST_HOST` (and friends) point at a disposable
//! database:
//!
//! ```sh
//! MARIADB_TEST_HOST=127.0.0.1 MARIADB_TEST_USER=root \
//! MARIADB_TEST_PASSWORD=secret MARIADB_TEST_DB=forge_test \
//! cargo test --test test5_mariadb_live
//! ```

#![cfg(feature = "mariadb")]

use sql_forge::mariadb::{MariaDbConfig, MariaDbConnection};
use sql_forge::prelude::*;

fn config_from_env() -> Option<MariaDbConfig> {
    let host = std::env::var("MARIADB_TEST_HOST").ok()?;
    let user = std::env::var("MARIADB_TEST_USER").ok()?;
    let password = std::env::var("MARIADB_TEST_PASSWORD").unwrap_or_default();
    let database = std::env::var("MARIADB_TEST_DB").ok()?;
    let port = std::env::var("MARIADB_TEST_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3306);
    Some(
        MariaDbConfig::new(host, user, password)
            .with_database(database)
            .with_port(port),
    )
}

#[test]
fn live_round_trip() -> Result<(), SqlForgeError> {
    let Some(config) = config_from_env() else {
        eprintln!("MARIADB_TEST_HOST not set, skipping live MariaDB test");
        return Ok(());
    };

    let mut conn = MariaDbConnection::connect(&config)?;
    conn.execute("DROP TABLE IF EXISTS forge_sample")?;
    conn.execute(
        "CREATE TABLE forge_sample (
            id BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,
            name VARCHAR(64),
            height BIGINT,
            ratio DOUBLE,
            raw VARBINARY(16),
            seen DATETIME
        )",
    )?;

    let insert = table("forge_sample")
        .insert(["name", "height", "ratio", "raw", "seen"])
        .build::<MariaDbDialect>()?;
    let stamp = chrono::NaiveDate::from_ymd_opt(2024, 1, 3)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    execute_built(
        &mut conn,
        &insert,
        &[
            DbValue::Text("Denali".into()),
            DbValue::Int64(6190),
            DbValue::Double(0.5),
            DbValue::Blob(vec![1, 2, 3]),
            DbValue::DateTime(stamp),
        ],
    )?;
    let id: u64 = conn.last_insert_id()?.get_as()?;
    assert_ne!(id, 0);

    let built = table("forge_sample")
        .query()
        .and_where_set("id", Cmp::Eq, id)
        .select_cols(["name", "height", "ratio", "raw", "seen"])
        .build::<MariaDbDialect>()?;
    let rows = fetch_all(&mut conn, &built, &[])?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], DbValue::Text("Denali".into()));
    assert_eq!(rows[0][1], DbValue::Int64(6190));
    assert_eq!(rows[0][2], DbValue::Double(0.5));
    assert_eq!(rows[0][3], DbValue::Blob(vec![1, 2, 3]));
    assert_eq!(rows[0][4], DbValue::DateTime(stamp));

    // DDL and writes come back as an empty sequence, not an error
    let mut stmt = conn.prepare("UPDATE forge_sample SET height = height + 1")?;
    stmt.execute()?;
    assert!(stmt.is_empty());
    stmt.close()?;

    // autocommit toggles through the driver
    assert!(conn.auto_commit()?);
    conn.set_auto_commit(false)?;
    assert!(!conn.auto_commit()?);
    conn.set_auto_commit(true)?;

    conn.execute("DROP TABLE forge_sample")?;
    conn.close()?;
    Ok(())
}
