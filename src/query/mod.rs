//! The abstract query model.
//!
//! A [`Query`] starts from a [`Table`] and grows through pure, by-value
//! combinators; a terminal ([`Select`], [`Update`], [`Insert`], [`Delete`])
//! closes it over. Nothing here touches a database: compiling a terminal
//! into SQL is the job of [`crate::compile`], executing it the job of a
//! driver.

mod built;
mod join;
mod limit;
mod order;
mod terminal;
mod where_clause;

pub use built::{BuiltQuery, Placeholders, PreSets};
pub use join::{Join, JoinKind};
pub use limit::Limit;
pub use order::{Direction, OrderingTerm};
pub use terminal::{
    avg, count, group_concat, max, min, sum, Aggregate, Delete, Insert, Select, SelectExpr,
    Update,
};
pub use where_clause::{Cmp, Where, WhereToken};

use crate::value::DbValue;

/// A table identifier. Always emitted quoted, never raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) name: String,
}

impl Table {
    /// Start building a query against this table.
    #[must_use]
    pub fn query(self) -> Query {
        Query::new(self)
    }

    /// Start a single-row INSERT into this table. Use
    /// [`Insert::times`] for multi-row inserts and an empty column list for
    /// a `DEFAULT VALUES` insert.
    #[must_use]
    pub fn insert<I, S>(self, columns: I) -> Insert
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Insert::new(self, columns.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Shorthand constructor for a [`Table`].
pub fn table(name: impl Into<String>) -> Table {
    Table { name: name.into() }
}

/// A column reference, optionally qualified by a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub(crate) table: Option<String>,
    pub(crate) name: String,
}

impl Column {
    /// An unqualified column.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }
}

/// A table-qualified column reference.
pub fn col(table: &Table, name: impl Into<String>) -> Column {
    Column {
        table: Some(table.name.clone()),
        name: name.into(),
    }
}

/// Anything that names a column: a bare `&str`/`String` or a qualified
/// [`Column`].
pub trait IntoColumn {
    fn into_column(self) -> Column;
}

impl IntoColumn for Column {
    fn into_column(self) -> Column {
        self
    }
}

impl IntoColumn for &str {
    fn into_column(self) -> Column {
        Column::named(self)
    }
}

impl IntoColumn for String {
    fn into_column(self) -> Column {
        Column::named(self)
    }
}

/// A query under construction: base table, joins, WHERE token stream,
/// ordering, limit. Consumed by a terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) table: Table,
    pub(crate) joins: Vec<Join>,
    pub(crate) where_clause: Where,
    pub(crate) order: Vec<OrderingTerm>,
    pub(crate) limit: Limit,
}

impl Query {
    fn new(table: Table) -> Self {
        Self {
            table,
            joins: Vec::new(),
            where_clause: Where::default(),
            order: Vec::new(),
            limit: Limit::default(),
        }
    }

    /// AND-append a comparison whose value is bound later.
    #[must_use]
    pub fn and_where(mut self, column: impl IntoColumn, op: Cmp) -> Self {
        self.where_clause
            .push_condition(WhereToken::And, column.into_column(), op, None);
        self
    }

    /// OR-append a comparison whose value is bound later.
    #[must_use]
    pub fn or_where(mut self, column: impl IntoColumn, op: Cmp) -> Self {
        self.where_clause
            .push_condition(WhereToken::Or, column.into_column(), op, None);
        self
    }

    /// AND-append a comparison with a preset value. The compiled SQL still
    /// carries a `?`; the value is bound when the built query is prepared.
    #[must_use]
    pub fn and_where_set(
        mut self,
        column: impl IntoColumn,
        op: Cmp,
        value: impl Into<DbValue>,
    ) -> Self {
        self.where_clause.push_condition(
            WhereToken::And,
            column.into_column(),
            op,
            Some(value.into()),
        );
        self
    }

    /// OR-append a comparison with a preset value.
    #[must_use]
    pub fn or_where_set(
        mut self,
        column: impl IntoColumn,
        op: Cmp,
        value: impl Into<DbValue>,
    ) -> Self {
        self.where_clause.push_condition(
            WhereToken::Or,
            column.into_column(),
            op,
            Some(value.into()),
        );
        self
    }

    /// AND-append a parenthesised group built by `inner`.
    #[must_use]
    pub fn and_where_group(mut self, inner: impl FnOnce(Query) -> Query) -> Self {
        self.where_clause.open_group(WhereToken::And, false);
        let mut query = inner(self);
        query.where_clause.close_group();
        query
    }

    /// OR-append a parenthesised group built by `inner`.
    #[must_use]
    pub fn or_where_group(mut self, inner: impl FnOnce(Query) -> Query) -> Self {
        self.where_clause.open_group(WhereToken::Or, false);
        let mut query = inner(self);
        query.where_clause.close_group();
        query
    }

    /// AND-append a negated parenthesised group: `AND NOT ( … )`.
    #[must_use]
    pub fn and_where_not_group(mut self, inner: impl FnOnce(Query) -> Query) -> Self {
        self.where_clause.open_group(WhereToken::And, true);
        let mut query = inner(self);
        query.where_clause.close_group();
        query
    }

    /// Append a join. Joins compile in insertion order. `source` is the
    /// join key on the table being joined and must be table-qualified;
    /// `target` is the matching column on the already-present side.
    #[must_use]
    pub fn join(mut self, kind: JoinKind, source: Column, target: Column) -> Self {
        self.joins.push(Join::on(kind, source, target));
        self
    }

    /// Append a CROSS JOIN; no ON clause is emitted.
    #[must_use]
    pub fn cross_join(mut self, table: Table) -> Self {
        self.joins.push(Join::cross(table));
        self
    }

    /// Append an ascending ordering term.
    #[must_use]
    pub fn order_by(mut self, column: impl IntoColumn) -> Self {
        self.order.push(OrderingTerm {
            column: column.into_column(),
            direction: Direction::Asc,
        });
        self
    }

    /// Append a descending ordering term.
    #[must_use]
    pub fn order_by_desc(mut self, column: impl IntoColumn) -> Self {
        self.order.push(OrderingTerm {
            column: column.into_column(),
            direction: Direction::Desc,
        });
        self
    }

    /// Enable `LIMIT ?`, value bound later.
    #[must_use]
    pub fn limit(mut self) -> Self {
        self.limit.enabled = true;
        self
    }

    /// Enable `LIMIT ?` with a preset value.
    #[must_use]
    pub fn limit_to(mut self, n: u64) -> Self {
        self.limit.enabled = true;
        self.limit.preset = Some(DbValue::UInt64(n));
        self
    }

    /// Enable `OFFSET ?`, value bound later. Implies `LIMIT ?`.
    #[must_use]
    pub fn offset(mut self) -> Self {
        self.limit.enabled = true;
        self.limit.offset_enabled = true;
        self
    }

    /// Enable `OFFSET ?` with a preset value. Implies `LIMIT ?`.
    #[must_use]
    pub fn offset_by(mut self, n: u64) -> Self {
        self.limit.enabled = true;
        self.limit.offset_enabled = true;
        self.limit.offset_preset = Some(DbValue::UInt64(n));
        self
    }

    /// Terminalise as `SELECT *`.
    #[must_use]
    pub fn select(self) -> Select {
        Select::new(self, Vec::new())
    }

    /// Terminalise as a SELECT over the given columns.
    #[must_use]
    pub fn select_cols<I, C>(self, columns: I) -> Select
    where
        I: IntoIterator<Item = C>,
        C: IntoColumn,
    {
        let exprs = columns
            .into_iter()
            .map(|c| SelectExpr::new(c.into_column()))
            .collect();
        Select::new(self, exprs)
    }

    /// Terminalise as a SELECT over explicit expressions (aggregates,
    /// DISTINCT).
    #[must_use]
    pub fn select_exprs<I>(self, exprs: I) -> Select
    where
        I: IntoIterator<Item = SelectExpr>,
    {
        Select::new(self, exprs.into_iter().collect())
    }

    /// Terminalise as an UPDATE setting the given columns, one placeholder
    /// per column in the order given.
    #[must_use]
    pub fn update<I, S>(self, columns: I) -> Update
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Update::new(self, columns.into_iter().map(Into::into).collect())
    }

    /// Terminalise as a DELETE.
    #[must_use]
    pub fn delete(self) -> Delete {
        Delete::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_counter_tracks_conditions() {
        let q = table("mountain")
            .query()
            .and_where("height", Cmp::Gt)
            .and_where_set("location", Cmp::Eq, "US");
        assert_eq!(q.where_clause.placeholders, 2);
        assert_eq!(
            q.where_clause.presets.get(&1),
            Some(&DbValue::Text("US".into()))
        );
        assert!(q.where_clause.presets.get(&0).is_none());
    }

    #[test]
    fn group_suppresses_leading_junctor() {
        let q = table("t")
            .query()
            .and_where_group(|q| q.and_where("a", Cmp::Eq).or_where("b", Cmp::Eq));
        let tokens = &q.where_clause.tokens;
        // ( "a" = ? OR "b" = ? ) with no junctor before "a"
        assert_eq!(tokens[0], WhereToken::LeftParen);
        assert!(matches!(tokens[1], WhereToken::Column(_)));
        assert_eq!(*tokens.last().unwrap(), WhereToken::RightParen);
    }

    #[test]
    fn nullary_operators_take_no_placeholder() {
        let q = table("t").query().and_where("a", Cmp::IsNull);
        assert_eq!(q.where_clause.placeholders, 0);
        assert!(!q
            .where_clause
            .tokens
            .iter()
            .any(|t| *t == WhereToken::Placeholder));
    }

    #[test]
    fn offset_implies_limit() {
        let q = table("t").query().offset_by(10);
        assert!(q.limit.enabled);
        assert!(q.limit.offset_enabled);
        assert_eq!(q.limit.offset_preset, Some(DbValue::UInt64(10)));
        assert!(q.limit.preset.is_none());
    }
}
