use std::marker::PhantomData;

use crate::driver::Connection;
use crate::error::SqlForgeError;
use crate::exec::{execute_built, fetch_all, fetch_one};
use crate::query::{
    col, count, table, Aggregate, Cmp, Delete, IntoColumn, Query, Select, SelectExpr,
};
use crate::value::DbValue;

use super::Entity;

/// An entity-typed query under construction.
///
/// Wraps a [`Query`] over `T`'s table together with the terminal helpers:
/// plain terminals hand back the built-up AST for compilation, the `*_via`
/// variants also prepare, bind the presets, execute, and map the result.
pub struct PreCollection<T: Entity> {
    query: Query,
    qualify: bool,
    _entity: PhantomData<T>,
}

impl<T: Entity> PreCollection<T> {
    pub(crate) fn new() -> Self {
        Self {
            query: table(T::table()).query(),
            qualify: false,
            _entity: PhantomData,
        }
    }

    /// Wrap an externally built query. With `qualify` set, the select list
    /// is table-qualified so joined tables cannot shadow the entity's
    /// columns.
    pub(crate) fn from_query(query: Query, qualify: bool) -> Self {
        Self {
            query,
            qualify,
            _entity: PhantomData,
        }
    }

    #[must_use]
    pub fn and_where(mut self, column: impl IntoColumn, op: Cmp) -> Self {
        self.query = self.query.and_where(column, op);
        self
    }

    #[must_use]
    pub fn or_where(mut self, column: impl IntoColumn, op: Cmp) -> Self {
        self.query = self.query.or_where(column, op);
        self
    }

    #[must_use]
    pub fn and_where_set(
        mut self,
        column: impl IntoColumn,
        op: Cmp,
        value: impl Into<DbValue>,
    ) -> Self {
        self.query = self.query.and_where_set(column, op, value);
        self
    }

    #[must_use]
    pub fn or_where_set(
        mut self,
        column: impl IntoColumn,
        op: Cmp,
        value: impl Into<DbValue>,
    ) -> Self {
        self.query = self.query.or_where_set(column, op, value);
        self
    }

    #[must_use]
    pub fn and_where_group(mut self, inner: impl FnOnce(Query) -> Query) -> Self {
        self.query = self.query.and_where_group(inner);
        self
    }

    #[must_use]
    pub fn or_where_group(mut self, inner: impl FnOnce(Query) -> Query) -> Self {
        self.query = self.query.or_where_group(inner);
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl IntoColumn) -> Self {
        self.query = self.query.order_by(column);
        self
    }

    #[must_use]
    pub fn order_by_desc(mut self, column: impl IntoColumn) -> Self {
        self.query = self.query.order_by_desc(column);
        self
    }

    #[must_use]
    pub fn limit(mut self) -> Self {
        self.query = self.query.limit();
        self
    }

    #[must_use]
    pub fn limit_to(mut self, n: u64) -> Self {
        self.query = self.query.limit_to(n);
        self
    }

    #[must_use]
    pub fn offset(mut self) -> Self {
        self.query = self.query.offset();
        self
    }

    #[must_use]
    pub fn offset_by(mut self, n: u64) -> Self {
        self.query = self.query.offset_by(n);
        self
    }

    /// The entity's columns, in mapping order, qualified if needed.
    fn select_list(&self) -> Vec<SelectExpr> {
        if self.qualify || !self.query.joins.is_empty() {
            let entity_table = table(T::table());
            T::columns()
                .iter()
                .map(|c| SelectExpr::new(col(&entity_table, *c)))
                .collect()
        } else {
            T::columns().iter().map(|c| SelectExpr::new(*c)).collect()
        }
    }

    /// Terminalise as a SELECT over the entity's columns.
    #[must_use]
    pub fn select(self) -> Select {
        let exprs = self.select_list();
        self.query.select_exprs(exprs)
    }

    /// Terminalise as `SELECT COUNT(*)`.
    #[must_use]
    pub fn count(self) -> Select {
        self.query.select_exprs([count("*")])
    }

    /// Terminalise as a single-aggregate SELECT.
    #[must_use]
    pub fn aggregate(self, aggregate: Aggregate, column: impl IntoColumn) -> Select {
        self.query
            .select_exprs([SelectExpr::new(column).aggregate(aggregate)])
    }

    /// Terminalise as a DELETE.
    #[must_use]
    pub fn delete(self) -> Delete {
        self.query.delete()
    }

    /// Compile for `C`'s dialect, execute, and map every row back into an
    /// entity.
    ///
    /// # Errors
    /// Compilation, execution, or row-mapping errors; open placeholders
    /// (conditions added without a preset value) surface as `BindError`.
    pub fn select_via<C: Connection>(self, connection: &mut C) -> Result<Vec<T>, SqlForgeError> {
        let built = self.select().build::<C::Dialect>()?;
        let rows = fetch_all(connection, &built, &[])?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute `SELECT COUNT(*)` and return the count.
    ///
    /// # Errors
    /// Same classes as [`PreCollection::select_via`].
    pub fn count_via<C: Connection>(self, connection: &mut C) -> Result<u64, SqlForgeError> {
        let built = self.count().build::<C::Dialect>()?;
        let row = fetch_one(connection, &built, &[])?.ok_or_else(|| {
            SqlForgeError::ExecutionError("COUNT query produced no row".to_string())
        })?;
        row[0].get_as()
    }

    /// Execute a single-aggregate SELECT and return the aggregate cell.
    ///
    /// # Errors
    /// Same classes as [`PreCollection::select_via`].
    pub fn aggregate_via<C: Connection>(
        self,
        connection: &mut C,
        aggregate: Aggregate,
        column: impl IntoColumn,
    ) -> Result<DbValue, SqlForgeError> {
        let built = self.aggregate(aggregate, column).build::<C::Dialect>()?;
        let row = fetch_one(connection, &built, &[])?;
        Ok(row.map_or(DbValue::Null, |r| r[0].clone()))
    }

    /// Execute a DELETE over the collection's filter.
    ///
    /// # Errors
    /// Same classes as [`PreCollection::select_via`].
    pub fn delete_via<C: Connection>(self, connection: &mut C) -> Result<(), SqlForgeError> {
        let built = self.delete().build::<C::Dialect>()?;
        execute_built(connection, &built, &[])
    }
}
