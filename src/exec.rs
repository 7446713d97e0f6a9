//! The binding protocol and small execution helpers.
//!
//! A [`BuiltQuery`] travels with preset values that were supplied during
//! query construction; [`bind_presets`] pushes them into a just-prepared
//! statement. [`fetch_all`] and [`execute_built`] wrap the whole
//! prepare, bind, execute, drain cycle for callers that have every
//! remaining value at hand, the mapper's `*_via` helpers among them.

use crate::driver::{Connection, Statement};
use crate::error::SqlForgeError;
use crate::query::BuiltQuery;
use crate::row::Row;
use crate::value::DbValue;

/// Bind every preset the built query carries: the WHERE map first, then
/// the limit and offset slots.
///
/// # Errors
/// Propagates `BindError` from the statement.
pub fn bind_presets<S: Statement>(
    statement: &mut S,
    built: &BuiltQuery,
) -> Result<(), SqlForgeError> {
    let base = built.placeholders.set;
    for (&index, value) in &built.presets.where_ {
        statement.bind_value(base + index, value.clone())?;
    }
    let after_where = base + built.placeholders.where_;
    if let Some(limit) = &built.presets.limit {
        statement.bind_value(after_where, limit.clone())?;
    }
    if let Some(offset) = &built.presets.offset {
        statement.bind_value(after_where + 1, offset.clone())?;
    }
    Ok(())
}

/// Physical indices of the placeholders no preset covers, in binding
/// order: the leading SET/VALUES slots, then the open WHERE slots, then
/// limit and offset if they compiled without a preset.
fn open_slots(built: &BuiltQuery) -> Vec<usize> {
    let set = built.placeholders.set;
    let mut slots: Vec<usize> = (0..set).collect();
    for i in 0..built.placeholders.where_ {
        if !built.presets.where_.contains_key(&i) {
            slots.push(set + i);
        }
    }
    let mut next = set + built.placeholders.where_;
    if built.placeholders.limit {
        if built.presets.limit.is_none() {
            slots.push(next);
        }
        next += 1;
    }
    if built.placeholders.offset && built.presets.offset.is_none() {
        slots.push(next);
    }
    slots
}

fn bind_remaining<S: Statement>(
    statement: &mut S,
    built: &BuiltQuery,
    binds: &[DbValue],
) -> Result<(), SqlForgeError> {
    let slots = open_slots(built);
    if slots.len() != binds.len() {
        return Err(SqlForgeError::BindError(format!(
            "query has {} open placeholders, {} values supplied",
            slots.len(),
            binds.len()
        )));
    }
    for (slot, value) in slots.into_iter().zip(binds) {
        statement.bind_value(slot, value.clone())?;
    }
    Ok(())
}

/// Prepare, bind (presets then `binds`), execute, and drain every row.
///
/// # Errors
/// Propagates prepare, bind, and execution errors; `BindError` when
/// `binds` does not cover the open placeholders exactly.
pub fn fetch_all<C: Connection>(
    connection: &mut C,
    built: &BuiltQuery,
    binds: &[DbValue],
) -> Result<Vec<Row>, SqlForgeError> {
    let mut statement = connection.prepare(&built.sql)?;
    bind_presets(&mut statement, built)?;
    bind_remaining(&mut statement, built, binds)?;
    statement.execute()?;
    let rows: Vec<Row> = statement.rows().collect();
    statement.close()?;
    Ok(rows)
}

/// Like [`fetch_all`] but keeps only the first row.
///
/// # Errors
/// Same as [`fetch_all`].
pub fn fetch_one<C: Connection>(
    connection: &mut C,
    built: &BuiltQuery,
    binds: &[DbValue],
) -> Result<Option<Row>, SqlForgeError> {
    let mut statement = connection.prepare(&built.sql)?;
    bind_presets(&mut statement, built)?;
    bind_remaining(&mut statement, built, binds)?;
    statement.execute()?;
    let row = statement.pop_front();
    statement.close()?;
    Ok(row)
}

/// Prepare, bind, execute; rows, if any, are discarded.
///
/// # Errors
/// Same as [`fetch_all`].
pub fn execute_built<C: Connection>(
    connection: &mut C,
    built: &BuiltQuery,
    binds: &[DbValue],
) -> Result<(), SqlForgeError> {
    let mut statement = connection.prepare(&built.sql)?;
    bind_presets(&mut statement, built)?;
    bind_remaining(&mut statement, built, binds)?;
    statement.execute()?;
    statement.close()
}
