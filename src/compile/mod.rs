//! Dialect-specific query compilation.
//!
//! A compiler is a pure function from a terminalised query to a
//! [`BuiltQuery`]; it never touches a connection. Everything both dialects
//! share lives here; the per-dialect differences are captured entirely by
//! the [`Dialect`] trait, so the walkers are written once and
//! monomorphised per dialect.

mod dml;
mod select;

use crate::error::SqlForgeError;
use crate::query::{BuiltQuery, Join, JoinKind, Placeholders, PreSets, Query, WhereToken};

/// The SQL surface variations of one engine.
///
/// Implementations are zero-sized markers; queries are compiled with
/// `build::<SqliteDialect>()` and friends.
pub trait Dialect {
    /// Identifier quote character; occurrences inside a name are doubled.
    const QUOTE: char;
    /// Whether the engine accepts `FULL OUTER JOIN`.
    const SUPPORTS_FULL_OUTER_JOIN: bool;
}

/// SQLite: double-quoted identifiers, full outer joins accepted.
#[derive(Debug, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    const QUOTE: char = '"';
    const SUPPORTS_FULL_OUTER_JOIN: bool = true;
}

/// MariaDB / MySQL: back-tick identifiers, no full outer join.
#[derive(Debug, Clone, Copy)]
pub struct MariaDbDialect;

impl Dialect for MariaDbDialect {
    const QUOTE: char = '`';
    const SUPPORTS_FULL_OUTER_JOIN: bool = false;
}

/// Append `ident` quoted for `D`, doubling embedded quote characters.
pub(crate) fn push_quoted<D: Dialect>(sql: &mut String, ident: &str) {
    sql.push(D::QUOTE);
    for ch in ident.chars() {
        sql.push(ch);
        if ch == D::QUOTE {
            sql.push(ch);
        }
    }
    sql.push(D::QUOTE);
}

pub(crate) fn push_joins<D: Dialect>(
    sql: &mut String,
    joins: &[Join],
) -> Result<(), SqlForgeError> {
    for join in joins {
        if join.kind == JoinKind::FullOuter && !D::SUPPORTS_FULL_OUTER_JOIN {
            return Err(SqlForgeError::InvalidQuery(
                "FULL OUTER JOIN is not supported by this dialect".to_string(),
            ));
        }
        let table = join.table.as_deref().ok_or_else(|| {
            SqlForgeError::InvalidQuery(
                "join source column must be table-qualified".to_string(),
            )
        })?;
        sql.push(' ');
        sql.push_str(join.kind.sql());
        sql.push(' ');
        push_quoted::<D>(sql, table);

        match (&join.source_column, &join.target) {
            (Some(source), Some(target)) => {
                sql.push_str(" ON ");
                push_quoted::<D>(sql, table);
                sql.push('.');
                push_quoted::<D>(sql, source);
                sql.push_str(" = ");
                if let Some(target_table) = &target.table {
                    push_quoted::<D>(sql, target_table);
                    sql.push('.');
                }
                push_quoted::<D>(sql, &target.name);
            }
            (None, None) if join.kind == JoinKind::Cross => {}
            _ => {
                return Err(SqlForgeError::InvalidQuery(
                    "non-cross joins need both a source and a target column".to_string(),
                ));
            }
        }
    }
    Ok(())
}

/// Token-by-token WHERE emission. Every token carries its own leading
/// space except a column directly after its table qualifier.
pub(crate) fn push_where<D: Dialect>(sql: &mut String, query: &Query) {
    if query.where_clause.is_empty() {
        return;
    }
    sql.push_str(" WHERE");
    let mut after_qualifier = false;
    for token in &query.where_clause.tokens {
        let qualified = std::mem::replace(&mut after_qualifier, false);
        match token {
            WhereToken::ColumnTable(table) => {
                sql.push(' ');
                push_quoted::<D>(sql, table);
                sql.push('.');
                after_qualifier = true;
            }
            WhereToken::Column(name) => {
                if !qualified {
                    sql.push(' ');
                }
                push_quoted::<D>(sql, name);
            }
            WhereToken::Placeholder => sql.push_str(" ?"),
            WhereToken::Comparison(op) => {
                sql.push(' ');
                sql.push_str(op.sql());
            }
            WhereToken::And => sql.push_str(" AND"),
            WhereToken::Or => sql.push_str(" OR"),
            WhereToken::Not => sql.push_str(" NOT"),
            WhereToken::LeftParen => sql.push_str(" ("),
            WhereToken::RightParen => sql.push_str(" )"),
        }
    }
}

pub(crate) fn push_order_by<D: Dialect>(sql: &mut String, query: &Query) {
    if query.order.is_empty() {
        return;
    }
    sql.push_str(" ORDER BY ");
    for (i, term) in query.order.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        if let Some(table) = &term.column.table {
            push_quoted::<D>(sql, table);
            sql.push('.');
        }
        push_quoted::<D>(sql, &term.column.name);
        if term.direction == crate::query::Direction::Desc {
            sql.push_str(" DESC");
        }
    }
}

pub(crate) fn push_limit(sql: &mut String, query: &Query) {
    if !query.limit.enabled {
        return;
    }
    sql.push_str(" LIMIT ?");
    if query.limit.offset_enabled {
        sql.push_str(" OFFSET ?");
    }
}

/// Assemble the metadata block shared by every terminal: WHERE count and
/// presets copied verbatim off the AST, plus the leading placeholder count
/// the terminal emitted before the WHERE section.
pub(crate) fn built_from(query: &Query, sql: String, set: usize) -> BuiltQuery {
    BuiltQuery {
        sql,
        placeholders: Placeholders {
            set,
            where_: query.where_clause.placeholders,
            limit: query.limit.enabled,
            offset: query.limit.offset_enabled,
        },
        presets: PreSets {
            where_: query.where_clause.presets.clone(),
            limit: if query.limit.enabled {
                query.limit.preset.clone()
            } else {
                None
            },
            offset: if query.limit.offset_enabled {
                query.limit.offset_preset.clone()
            } else {
                None
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_doubles_the_delimiter() {
        let mut sql = String::new();
        push_quoted::<SqliteDialect>(&mut sql, r#"we"ird"#);
        assert_eq!(sql, r#""we""ird""#);

        let mut sql = String::new();
        push_quoted::<MariaDbDialect>(&mut sql, "ta`ble");
        assert_eq!(sql, "`ta``ble`");
    }
}
