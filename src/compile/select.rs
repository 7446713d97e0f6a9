use super::{built_from, push_joins, push_limit, push_order_by, push_quoted, push_where, Dialect};
use crate::error::SqlForgeError;
use crate::query::{BuiltQuery, Select, SelectExpr};

fn push_select_expr<D: Dialect>(sql: &mut String, expr: &SelectExpr) {
    if let Some(aggregate) = expr.aggregate {
        sql.push_str(aggregate.sql());
        sql.push('(');
        if expr.distinct {
            sql.push_str("DISTINCT ");
        }
        push_column::<D>(sql, expr);
        sql.push(')');
    } else {
        push_column::<D>(sql, expr);
    }
}

fn push_column<D: Dialect>(sql: &mut String, expr: &SelectExpr) {
    if let Some(table) = &expr.column.table {
        push_quoted::<D>(sql, table);
        sql.push('.');
    }
    // `*` is the one identifier that never gets quoted
    if expr.column.name == "*" {
        sql.push('*');
    } else {
        push_quoted::<D>(sql, &expr.column.name);
    }
}

impl Select {
    /// Compile for dialect `D`.
    ///
    /// # Errors
    /// Returns `SqlForgeError::InvalidQuery` if a join is malformed or uses
    /// `FULL OUTER JOIN` on a dialect without it.
    pub fn build<D: Dialect>(&self) -> Result<BuiltQuery, SqlForgeError> {
        let mut sql = String::from("SELECT ");
        if self.exprs.is_empty() {
            sql.push('*');
        } else {
            for (i, expr) in self.exprs.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                push_select_expr::<D>(&mut sql, expr);
            }
        }
        sql.push_str(" FROM ");
        push_quoted::<D>(&mut sql, &self.query.table.name);

        push_joins::<D>(&mut sql, &self.query.joins)?;
        push_where::<D>(&mut sql, &self.query);
        push_order_by::<D>(&mut sql, &self.query);
        push_limit(&mut sql, &self.query);

        Ok(built_from(&self.query, sql, 0))
    }
}
