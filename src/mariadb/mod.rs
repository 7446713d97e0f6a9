// MariaDB driver - bridges the driver contract to the server's binary
// protocol via the mysql client crate
//
// Split into sub-modules:
// - config: connection parameters
// - params: value conversion between DbValue and protocol values
// - statement: prepared statements and row materialisation

pub mod config;
pub mod params;
pub mod statement;

pub use config::MariaDbConfig;
pub use statement::MariaDbStatement;

use mysql::prelude::Queryable;

use crate::compile::MariaDbDialect;
use crate::driver::Connection;
use crate::error::SqlForgeError;
use crate::value::DbValue;

/// A MariaDB (or MySQL) session over TCP.
///
/// ```rust,no_run
/// use sql_forge::prelude::*;
/// use sql_forge::mariadb::{MariaDbConfig, MariaDbConnection};
///
/// fn demo() -> Result<(), SqlForgeError> {
///     let config = MariaDbConfig::new("localhost", "app", "secret")
///         .with_database("inventory");
///     let mut conn = MariaDbConnection::connect(&config)?;
///
///     let built = table("mountain")
///         .query()
///         .and_where_set("location", Cmp::Ne, "US")
///         .order_by("height")
///         .limit_to(10)
///         .select()
///         .build::<MariaDbDialect>()?;
///     let rows = fetch_all(&mut conn, &built, &[])?;
///     # let _ = rows;
///     conn.close()?;
///     Ok(())
/// }
/// ```
pub struct MariaDbConnection {
    conn: Option<mysql::Conn>,
}

impl MariaDbConnection {
    fn handle(&mut self) -> Result<&mut mysql::Conn, SqlForgeError> {
        self.conn
            .as_mut()
            .ok_or_else(|| SqlForgeError::ConnectionError("connection is closed".to_string()))
    }
}

impl Connection for MariaDbConnection {
    type Config = MariaDbConfig;
    type Dialect = MariaDbDialect;
    type Statement<'conn>
        = MariaDbStatement<'conn>
    where
        Self: 'conn;

    fn connect(config: &MariaDbConfig) -> Result<Self, SqlForgeError> {
        let conn = mysql::Conn::new(config.opts())?;
        Ok(Self { conn: Some(conn) })
    }

    fn close(&mut self) -> Result<(), SqlForgeError> {
        // the client sends COM_QUIT on drop
        self.conn = None;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    fn auto_commit(&mut self) -> Result<bool, SqlForgeError> {
        let value: Option<u8> = self.handle()?.query_first("SELECT @@autocommit")?;
        match value {
            Some(v) => Ok(v != 0),
            None => Err(SqlForgeError::ExecutionError(
                "SELECT @@autocommit returned no row".to_string(),
            )),
        }
    }

    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), SqlForgeError> {
        self.handle()?
            .query_drop(format!("SET autocommit={}", u8::from(enabled)))?;
        Ok(())
    }

    fn transaction_start(&mut self) -> Result<(), SqlForgeError> {
        self.execute("START TRANSACTION")
    }

    fn transaction_commit(&mut self) -> Result<(), SqlForgeError> {
        self.execute("COMMIT")
    }

    fn transaction_rollback(&mut self) -> Result<(), SqlForgeError> {
        self.execute("ROLLBACK")
    }

    fn execute(&mut self, sql: &str) -> Result<(), SqlForgeError> {
        self.handle()?.query_drop(sql)?;
        Ok(())
    }

    fn prepare(&mut self, sql: &str) -> Result<MariaDbStatement<'_>, SqlForgeError> {
        let conn = self
            .conn
            .as_mut()
            .ok_or_else(|| SqlForgeError::ConnectionError("connection is closed".to_string()))?;
        let stmt = conn.prep(sql)?;
        Ok(MariaDbStatement::new(conn, stmt))
    }

    fn last_insert_id(&mut self) -> Result<DbValue, SqlForgeError> {
        Ok(DbValue::UInt64(self.handle()?.last_insert_id()))
    }
}
