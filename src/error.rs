use thiserror::Error;

#[cfg(feature = "mariadb")]
use mysql;
#[cfg(feature = "sqlite")]
use rusqlite;

/// Errors surfaced by the query builder, the compilers, and the drivers.
///
/// Native driver failures flow through the transparent variants and keep
/// their engine-specific detail (SQLite extended result codes, MariaDB
/// server error numbers). The remaining variants originate in this crate.
#[derive(Debug, Error)]
pub enum SqlForgeError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mariadb")]
    #[error(transparent)]
    MariaDbError(#[from] mysql::Error),

    #[error("connection error: {0}")]
    ConnectionError(String),

    #[error("prepare error: {0}")]
    PrepareError(String),

    #[error("bind error: {0}")]
    BindError(String),

    #[error("execution error: {0}")]
    ExecutionError(String),

    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("unsupported: {0}")]
    Unsupported(String),
}
