use std::collections::VecDeque;
use std::sync::Arc;

use mysql::prelude::Queryable;
use mysql::{Conn, Params};

use crate::driver::Statement;
use crate::error::SqlForgeError;
use crate::row::Row;
use crate::value::DbValue;

use super::params::{db_value_to_mysql, mysql_to_db_value};

/// A prepared MariaDB statement.
///
/// Bound values collect in a positional vector sized from the statement's
/// parameter count; execution runs the binary protocol and copies every
/// row into owned values. A statement without a result set (DDL, writes)
/// is an empty sequence, not an error.
pub struct MariaDbStatement<'conn> {
    conn: &'conn mut Conn,
    stmt: mysql::Statement,
    params: Vec<mysql::Value>,
    columns: Arc<Vec<String>>,
    rows: VecDeque<Row>,
}

impl<'conn> MariaDbStatement<'conn> {
    pub(crate) fn new(conn: &'conn mut Conn, stmt: mysql::Statement) -> Self {
        let params = vec![mysql::Value::NULL; usize::from(stmt.num_params())];
        let columns = Arc::new(
            stmt.columns()
                .iter()
                .map(|c| c.name_str().into_owned())
                .collect::<Vec<_>>(),
        );
        Self {
            conn,
            stmt,
            params,
            columns,
            rows: VecDeque::new(),
        }
    }
}

impl Statement for MariaDbStatement<'_> {
    fn bind_value(&mut self, index: usize, value: DbValue) -> Result<(), SqlForgeError> {
        let slot = self.params.get_mut(index).ok_or_else(|| {
            SqlForgeError::BindError(format!(
                "placeholder index {index} out of range (statement has {})",
                self.stmt.num_params()
            ))
        })?;
        *slot = db_value_to_mysql(value);
        Ok(())
    }

    fn execute(&mut self) -> Result<(), SqlForgeError> {
        self.rows.clear();
        let params = if self.params.is_empty() {
            Params::Empty
        } else {
            Params::Positional(self.params.clone())
        };
        let result = self.conn.exec_iter(&self.stmt, params)?;

        let mut buffered = VecDeque::new();
        for native in result {
            let native = native?;
            let columns = native.columns();
            let values = native.unwrap();
            let mut converted = Vec::with_capacity(values.len());
            for (value, column) in values.into_iter().zip(columns.iter()) {
                converted.push(mysql_to_db_value(value, column)?);
            }
            buffered.push_back(Row::new(Arc::clone(&self.columns), converted));
        }
        self.rows = buffered;
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
        // deallocate the server-side statement
        self.conn.close(self.stmt)?;
        Ok(())
    }
}
