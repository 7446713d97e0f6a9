use std::collections::VecDeque;
use std::sync::Arc;

use crate::driver::Statement;
use crate::error::SqlForgeError;
use crate::row::Row;
use crate::value::DbValue;

use super::params::{db_value_to_sqlite, sqlite_to_db_value};

/// A prepared SQLite statement.
///
/// Execution steps the native statement to completion and copies every row
/// out of driver memory (the rows stay valid after the statement closes);
/// the sequence interface then serves from that buffer. Dropping the
/// native cursor resets the statement but keeps the bindings, so
/// re-bind + re-execute runs the statement afresh.
pub struct SqliteStatement<'conn> {
    stmt: rusqlite::Statement<'conn>,
    columns: Arc<Vec<String>>,
    rows: VecDeque<Row>,
}

impl<'conn> SqliteStatement<'conn> {
    pub(crate) fn new(stmt: rusqlite::Statement<'conn>) -> Self {
        let columns = Arc::new(
            stmt.column_names()
                .iter()
                .map(std::string::ToString::to_string)
                .collect::<Vec<_>>(),
        );
        Self {
            stmt,
            columns,
            rows: VecDeque::new(),
        }
    }
}

impl Statement for SqliteStatement<'_> {
    fn bind_value(&mut self, index: usize, value: DbValue) -> Result<(), SqlForgeError> {
        if index >= self.stmt.parameter_count() {
            return Err(SqlForgeError::BindError(format!(
                "placeholder index {index} out of range (statement has {})",
                self.stmt.parameter_count()
            )));
        }
        let native = db_value_to_sqlite(value)?;
        // the native API counts parameters from 1
        self.stmt.raw_bind_parameter(index + 1, native)?;
        Ok(())
    }

    fn execute(&mut self) -> Result<(), SqlForgeError> {
        self.rows.clear();
        let column_count = self.stmt.column_count();
        let columns = Arc::clone(&self.columns);
        let mut native_rows = self.stmt.raw_query();
        while let Some(native) = native_rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                values.push(sqlite_to_db_value(native.get_ref(i)?));
            }
            self.rows.push_back(Row::new(Arc::clone(&columns), values));
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn front(&self) -> Option<&Row> {
        self.rows.front()
    }

    fn pop_front(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    fn close(self) -> Result<(), SqlForgeError> {
        self.stmt.finalize()?;
        Ok(())
    }
}
