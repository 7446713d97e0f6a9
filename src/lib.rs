/*!
 * SQL Forge - a typed, composable query builder with a uniform driver layer
 *
 * This crate builds SQL queries as plain in-memory values, compiles them
 * into a concrete dialect (SQLite or MariaDB/MySQL), and executes them
 * through one prepared-statement contract shared by every driver. A thin
 * entity mapper sits on top for table-per-struct workloads.
 *
 * # Features
 *
 * - Pure, by-value query combinators: WHERE with grouping and presets,
 *   joins, ordering, limit/offset
 * - Per-dialect compilers producing parameterised SQL plus binding
 *   metadata
 * - One connection/statement contract over SQLite (in-process) and
 *   MariaDB (TCP)
 * - Entity lifecycle and relation helpers (one-to-one, one-to-many,
 *   many-to-many)
 *
 * # Example
 *
 * ```rust
 * use sql_forge::prelude::*;
 *
 * fn sqlite_example() -> Result<(), SqlForgeError> {
 *     use sql_forge::sqlite::{SqliteConfig, SqliteConnection};
 *
 *     let mut conn = SqliteConnection::connect(&SqliteConfig::in_memory())?;
 *     conn.execute("CREATE TABLE mountain (id INTEGER PRIMARY KEY, name TEXT, height INT)")?;
 *
 *     let built = table("mountain")
 *         .insert(["name", "height"])
 *         .build::<SqliteDialect>()?;
 *     execute_built(&mut conn, &built, &["Denali".into(), 6190_i64.into()])?;
 *
 *     let built = table("mountain")
 *         .query()
 *         .and_where_set("height", Cmp::Gt, 6000_i64)
 *         .order_by("name")
 *         .select()
 *         .build::<SqliteDialect>()?;
 *     assert_eq!(
 *         built.sql,
 *         "SELECT * FROM \"mountain\" WHERE \"height\" > ? ORDER BY \"name\""
 *     );
 *
 *     for row in fetch_all(&mut conn, &built, &[])? {
 *         let name: String = row.get_named("name").unwrap().get_as()?;
 *         println!("{name}");
 *     }
 *     conn.close()?;
 *     Ok(())
 * }
 * # sqlite_example().unwrap();
 * ```
 *
 * The same query compiles for MariaDB by swapping the dialect parameter;
 * execution goes through `mariadb::MariaDbConnection` with identical
 * binding and iteration code.
 */

#![forbid(unsafe_code)]

// Re-export everything that should be part of the public API
pub mod prelude {
    //! Convenient imports for common functionality.

    pub use crate::compile::{Dialect, MariaDbDialect, SqliteDialect};
    pub use crate::driver::{Connection, Statement};
    pub use crate::error::SqlForgeError;
    pub use crate::exec::{bind_presets, execute_built, fetch_all, fetch_one};
    pub use crate::orm::{Entity, EntityManager, PreCollection};
    pub use crate::query::{
        avg, col, count, group_concat, max, min, sum, table, Aggregate, BuiltQuery, Cmp,
        Direction, JoinKind, Query, SelectExpr,
    };
    pub use crate::row::Row;
    pub use crate::value::{DbValue, FromDbValue};
}

// Core modules
pub mod compile;
pub mod driver;
pub mod error;
pub mod exec;
pub mod orm;
pub mod query;
pub mod row;
pub mod value;

// Driver modules
#[cfg(feature = "mariadb")]
pub mod mariadb;
#[cfg(feature = "sqlite")]
pub mod sqlite;

// Direct exports of the types almost every caller touches
pub use compile::{Dialect, MariaDbDialect, SqliteDialect};
pub use driver::{Connection, Rows, Statement};
pub use error::SqlForgeError;
pub use exec::{bind_presets, execute_built, fetch_all, fetch_one};
pub use query::{col, table, BuiltQuery, Cmp, JoinKind, Query};
pub use row::Row;
pub use value::{DbValue, FromDbValue};

#[cfg(feature = "mariadb")]
pub use mariadb::MariaDbConnection;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteConnection;
