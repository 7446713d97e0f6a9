// SQLite driver - bridges the driver contract to the native C API via rusqlite
//
// Split into sub-modules:
// - config: open modes and connection configuration
// - params: value conversion between DbValue and SQLite types
// - statement: prepared statements and row materialisation

pub mod config;
pub mod params;
pub mod statement;

pub use config::{OpenMode, SqliteConfig};
pub use statement::SqliteStatement;

use rusqlite;

use crate::compile::SqliteDialect;
use crate::driver::Connection;
use crate::error::SqlForgeError;
use crate::value::DbValue;

/// A SQLite session over a database file or an in-memory database.
///
/// ```rust,no_run
/// use sql_forge::prelude::*;
/// use sql_forge::sqlite::{SqliteConfig, SqliteConnection};
///
/// fn demo() -> Result<(), SqlForgeError> {
///     let mut conn = SqliteConnection::connect(&SqliteConfig::in_memory())?;
///     conn.execute("CREATE TABLE point (x int, y int)")?;
///
///     let built = table("point")
///         .query()
///         .and_where_set("x", Cmp::Gt, 1_i64)
///         .select()
///         .build::<SqliteDialect>()?;
///     let rows = fetch_all(&mut conn, &built, &[])?;
///     # let _ = rows;
///     conn.close()?;
///     Ok(())
/// }
/// ```
pub struct SqliteConnection {
    conn: Option<rusqlite::Connection>,
}

impl SqliteConnection {
    fn handle(&self) -> Result<&rusqlite::Connection, SqlForgeError> {
        self.conn
            .as_ref()
            .ok_or_else(|| SqlForgeError::ConnectionError("connection is closed".to_string()))
    }
}

impl Connection for SqliteConnection {
    type Config = SqliteConfig;
    type Dialect = SqliteDialect;
    type Statement<'conn>
        = SqliteStatement<'conn>
    where
        Self: 'conn;

    fn connect(config: &SqliteConfig) -> Result<Self, SqlForgeError> {
        let conn = rusqlite::Connection::open_with_flags(&config.path, config.open_flags())?;
        Ok(Self { conn: Some(conn) })
    }

    fn close(&mut self) -> Result<(), SqlForgeError> {
        match self.conn.take() {
            Some(conn) => conn.close().map_err(|(_, e)| SqlForgeError::from(e)),
            None => Ok(()),
        }
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn auto_commit(&mut self) -> Result<bool, SqlForgeError> {
        Ok(self.handle()?.is_autocommit())
    }

    fn set_auto_commit(&mut self, _enabled: bool) -> Result<(), SqlForgeError> {
        // SQLite toggles auto-commit itself on BEGIN/COMMIT; there is no
        // API to set it directly.
        Err(SqlForgeError::Unsupported(
            "SQLite manages auto-commit through transactions".to_string(),
        ))
    }

    fn transaction_start(&mut self) -> Result<(), SqlForgeError> {
        self.execute("BEGIN")
    }

    fn transaction_commit(&mut self) -> Result<(), SqlForgeError> {
        self.execute("COMMIT")
    }

    fn transaction_rollback(&mut self) -> Result<(), SqlForgeError> {
        self.execute("ROLLBACK")
    }

    fn execute(&mut self, sql: &str) -> Result<(), SqlForgeError> {
        self.handle()?.execute_batch(sql)?;
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<SqliteStatement<'_>, SqlForgeError> {
        let stmt = self
            .conn
            .as_ref()
            .ok_or_else(|| SqlForgeError::ConnectionError("connection is closed".to_string()))?
            .prepare(sql)?;
        Ok(SqliteStatement::new(stmt))
    }

    fn last_insert_id(&mut self) -> Result<DbValue, SqlForgeError> {
        Ok(DbValue::Int64(self.handle()?.last_insert_rowid()))
    }
}
