use std::collections::BTreeMap;

use crate::value::DbValue;

/// Placeholder bookkeeping of a built query.
///
/// `set` counts the placeholders emitted before the WHERE section: an
/// UPDATE's SET list or an INSERT's VALUES rows; zero for SELECT and
/// DELETE. `where_` counts the WHERE placeholders, preset or not. WHERE
/// index `i` therefore lives at physical slot `set + i`, LIMIT at
/// `set + where_`, OFFSET right after it. The total `?` count of the SQL
/// is `set + where_ + limit + offset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Placeholders {
    pub set: usize,
    pub where_: usize,
    /// Whether the SQL ends in a `LIMIT ?` slot.
    pub limit: bool,
    /// Whether an `OFFSET ?` slot follows the limit.
    pub offset: bool,
}

impl Placeholders {
    /// Total number of `?` in the compiled SQL.
    #[must_use]
    pub fn total(&self) -> usize {
        self.set + self.where_ + usize::from(self.limit) + usize::from(self.offset)
    }
}

/// Preset values carried over from query construction, still unbound.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreSets {
    /// WHERE presets by 0-based placeholder index.
    pub where_: BTreeMap<usize, DbValue>,
    pub limit: Option<DbValue>,
    pub offset: Option<DbValue>,
}

/// The result of compiling a terminal for one dialect: parameterised SQL
/// plus the metadata needed to bind it. Cheap to clone, immutable by
/// convention.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub placeholders: Placeholders,
    pub presets: PreSets,
}
