use std::collections::BTreeMap;

use super::Column;
use crate::value::DbValue;

/// Comparison operators usable in a WHERE condition.
///
/// `IsNull` and `IsNotNull` are nullary: they take no placeholder. Every
/// other operator is followed by exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    In,
    NotIn,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
}

impl Cmp {
    /// The SQL spelling, shared by both dialects.
    #[must_use]
    pub fn sql(self) -> &'static str {
        match self {
            Cmp::Eq => "=",
            Cmp::Ne => "<>",
            Cmp::Lt => "<",
            Cmp::Gt => ">",
            Cmp::Le => "<=",
            Cmp::Ge => ">=",
            Cmp::In => "IN",
            Cmp::NotIn => "NOT IN",
            Cmp::Like => "LIKE",
            Cmp::NotLike => "NOT LIKE",
            Cmp::IsNull => "IS NULL",
            Cmp::IsNotNull => "IS NOT NULL",
        }
    }

    /// True for operators that take no right-hand placeholder.
    #[must_use]
    pub fn is_nullary(self) -> bool {
        matches!(self, Cmp::IsNull | Cmp::IsNotNull)
    }
}

impl std::fmt::Display for Cmp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql())
    }
}

/// One fragment of a WHERE clause.
///
/// The clause is a token stream rather than a tree: appending a condition
/// or a parenthesised group is constant-time and compilation is a single
/// linear walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhereToken {
    /// Table qualifier; always immediately followed by a `Column`.
    ColumnTable(String),
    Column(String),
    Placeholder,
    Comparison(Cmp),
    And,
    Or,
    Not,
    LeftParen,
    RightParen,
}

/// A WHERE clause under construction: token stream, running placeholder
/// count, and preset values keyed by 0-based placeholder index.
///
/// Well-formedness is maintained by construction: junctors are inserted
/// automatically, operator arity decides placeholder emission, and preset
/// indices always stay below the placeholder count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Where {
    pub(crate) tokens: Vec<WhereToken>,
    pub(crate) placeholders: usize,
    pub(crate) presets: BTreeMap<usize, DbValue>,
}

impl Where {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of placeholders appended so far, preset or not.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// Emit `junctor` unless the clause is empty or a group was just opened.
    fn push_junctor(&mut self, junctor: WhereToken) {
        if !matches!(self.tokens.last(), None | Some(WhereToken::LeftParen)) {
            self.tokens.push(junctor);
        }
    }

    pub(crate) fn push_condition(
        &mut self,
        junctor: WhereToken,
        column: Column,
        op: Cmp,
        preset: Option<DbValue>,
    ) {
        self.push_junctor(junctor);
        if let Some(table) = column.table {
            self.tokens.push(WhereToken::ColumnTable(table));
        }
        self.tokens.push(WhereToken::Column(column.name));
        self.tokens.push(WhereToken::Comparison(op));
        if !op.is_nullary() {
            if let Some(value) = preset {
                self.presets.insert(self.placeholders, value);
            }
            self.tokens.push(WhereToken::Placeholder);
            self.placeholders += 1;
        }
    }

    pub(crate) fn open_group(&mut self, junctor: WhereToken, negated: bool) {
        self.push_junctor(junctor);
        if negated {
            self.tokens.push(WhereToken::Not);
        }
        self.tokens.push(WhereToken::LeftParen);
    }

    pub(crate) fn close_group(&mut self) {
        self.tokens.push(WhereToken::RightParen);
    }
}
