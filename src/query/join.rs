use super::{Column, Table};

/// The join flavours the query model exposes.
///
/// `FullOuter` compiles for SQLite only; the MariaDB compiler rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinKind {
    /// The SQL keyword sequence, without surrounding spaces.
    #[must_use]
    pub fn sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// One JOIN of a query. Joins compile in insertion order.
///
/// For every kind but `Cross`, `source_column` is the join key on the
/// joined table and `target` the matching column on the already-present
/// side; a cross join carries only the joined table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) table: Option<String>,
    pub(crate) source_column: Option<String>,
    pub(crate) target: Option<Column>,
}

impl Join {
    pub(crate) fn on(kind: JoinKind, source: Column, target: Column) -> Self {
        Self {
            kind,
            table: source.table,
            source_column: Some(source.name),
            target: Some(target),
        }
    }

    pub(crate) fn cross(table: Table) -> Self {
        Self {
            kind: JoinKind::Cross,
            table: Some(table.name),
            source_column: None,
            target: None,
        }
    }
}
