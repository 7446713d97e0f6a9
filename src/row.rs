use std::ops::Index;
use std::sync::Arc;

use crate::value::DbValue;

/// A single result row, detached from driver memory.
///
/// Values are owned copies in result-column order; column names are shared
/// across every row of one result set. A row stays valid after the statement
/// that produced it advances or closes.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<DbValue>,
}

impl Row {
    #[must_use]
    pub fn new(columns: Arc<Vec<String>>, values: Vec<DbValue>) -> Self {
        Self { columns, values }
    }

    /// Number of columns in this row.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at a column position, or `None` out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&DbValue> {
        self.values.get(index)
    }

    /// Value under a column name, or `None` if the result has no such column.
    #[must_use]
    pub fn get_named(&self, column: &str) -> Option<&DbValue> {
        let idx = self.columns.iter().position(|name| name == column)?;
        self.values.get(idx)
    }

    /// Column names of the producing result set.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Consume the row, yielding its values.
    #[must_use]
    pub fn into_values(self) -> Vec<DbValue> {
        self.values
    }
}

impl Index<usize> for Row {
    type Output = DbValue;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
