//! The capability contract every driver satisfies.
//!
//! Consumers of the library depend on these traits only; the concrete
//! drivers live in [`crate::sqlite`] and [`crate::mariadb`]. The contract
//! is a capability set, not a hierarchy: the dialect a connection compiles
//! for is an associated type, so generic code can go from a query straight
//! to execution without naming a backend.

use crate::compile::Dialect;
use crate::error::SqlForgeError;
use crate::row::Row;
use crate::value::DbValue;

/// A single-owner database session.
///
/// A connection is synchronous and strictly ordered: every call may block
/// on I/O and completes before the next begins. Statements borrow the
/// connection, so they cannot outlive it and the connection is unusable
/// while one is open.
pub trait Connection: Sized {
    /// Driver-specific connection parameters.
    type Config;
    /// The SQL dialect this driver's queries compile for.
    type Dialect: Dialect;
    /// Prepared-statement handle, borrowing the connection.
    type Statement<'conn>: Statement
    where
        Self: 'conn;

    /// Open a session. Connecting an already-open handle is the caller's
    /// bug; each call produces a fresh connection.
    ///
    /// # Errors
    /// `ConnectionError` (or the driver's native error) when the open
    /// fails.
    fn connect(config: &Self::Config) -> Result<Self, SqlForgeError>;

    /// Release the session. Idempotent: closing a closed connection is a
    /// no-op. Any other call after close fails with `ConnectionError`.
    ///
    /// # Errors
    /// The driver's native error if teardown fails.
    fn close(&mut self) -> Result<(), SqlForgeError>;

    /// Whether the handle is open. Observes local state only; a dead peer
    /// is not detected here.
    fn is_connected(&self) -> bool;

    /// Read the engine's auto-commit flag.
    ///
    /// # Errors
    /// Driver error; `ConnectionError` when closed.
    fn auto_commit(&mut self) -> Result<bool, SqlForgeError>;

    /// Toggle auto-commit. Drivers whose engine manages this on its own
    /// reject the call (`Unsupported`); SQLite does.
    ///
    /// # Errors
    /// `Unsupported` or a driver error.
    fn set_auto_commit(&mut self, enabled: bool) -> Result<(), SqlForgeError>;

    /// Begin an explicit transaction. Nesting is not supported; issuing a
    /// second start hands the engine's own reaction back to the caller.
    ///
    /// # Errors
    /// Driver error.
    fn transaction_start(&mut self) -> Result<(), SqlForgeError>;

    /// Commit the open transaction.
    ///
    /// # Errors
    /// Driver error.
    fn transaction_commit(&mut self) -> Result<(), SqlForgeError>;

    /// Roll back the open transaction.
    ///
    /// # Errors
    /// Driver error.
    fn transaction_rollback(&mut self) -> Result<(), SqlForgeError>;

    /// Fire-and-forget execution for DDL and similar; any rows are
    /// discarded.
    ///
    /// # Errors
    /// Driver error.
    fn execute(&mut self, sql: &str) -> Result<(), SqlForgeError>;

    /// Compile `sql` into a prepared statement.
    ///
    /// # Errors
    /// `PrepareError` or the driver's native error for invalid SQL.
    fn prepare(&mut self, sql: &str) -> Result<Self::Statement<'_>, SqlForgeError>;

    /// Id generated by the last INSERT on this connection.
    ///
    /// # Errors
    /// Driver error.
    fn last_insert_id(&mut self) -> Result<DbValue, SqlForgeError>;
}

/// A prepared statement: bind, execute, iterate.
///
/// Placeholder indices are **0-based** here regardless of the engine's
/// native convention; drivers adjust internally. Binding is valid before
/// the first execute or after a re-bind (which resets native state), and
/// row iteration is single-pass forward.
pub trait Statement {
    /// Bind `value` at 0-based placeholder `index`, dispatching on its tag.
    ///
    /// # Errors
    /// `BindError` for an out-of-range index or a variant the driver can
    /// neither bind natively nor coerce.
    fn bind_value(&mut self, index: usize, value: DbValue) -> Result<(), SqlForgeError>;

    /// Bind any scalar convertible into a [`DbValue`].
    ///
    /// # Errors
    /// Same as [`Statement::bind_value`].
    fn bind<T: Into<DbValue>>(&mut self, index: usize, value: T) -> Result<(), SqlForgeError>
    where
        Self: Sized,
    {
        self.bind_value(index, value.into())
    }

    /// Run with the current bindings, materialising any result rows.
    /// Executing again after a re-bind resets and runs afresh.
    ///
    /// # Errors
    /// `ExecutionError` or the driver's native error.
    fn execute(&mut self) -> Result<(), SqlForgeError>;

    /// True iff the last execute produced no (remaining) rows.
    fn is_empty(&self) -> bool;

    /// The current row; `None` once the sequence is exhausted.
    fn front(&self) -> Option<&Row>;

    /// Take the current row and advance.
    fn pop_front(&mut self) -> Option<Row>;

    /// Finalise native resources. Call at most once; the statement is gone
    /// afterwards.
    ///
    /// # Errors
    /// Driver error from finalisation.
    fn close(self) -> Result<(), SqlForgeError>
    where
        Self: Sized;

    /// Drain the remaining rows as an iterator.
    fn rows(&mut self) -> Rows<'_, Self>
    where
        Self: Sized,
    {
        Rows { statement: self }
    }
}

/// Draining iterator over a statement's remaining rows.
pub struct Rows<'stmt, S: Statement> {
    statement: &'stmt mut S,
}

impl<S: Statement> Iterator for Rows<'_, S> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.statement.pop_front()
    }
}
