use rusqlite::types::{Value, ValueRef};

use crate::error::SqlForgeError;
use crate::value::{DbValue, DATETIME_FORMAT, DATE_FORMAT, TIME_FORMAT};

/// Convert a [`DbValue`] into a native SQLite value.
///
/// SQLite has four storage classes, so the richer variants coerce on the
/// way in: every integer width becomes a 64-bit integer, booleans become
/// 0/1, and dates, times and datetimes become ISO-extended text.
///
/// # Errors
/// Returns `SqlForgeError::BindError` for an unsigned value beyond the
/// 64-bit signed range.
pub fn db_value_to_sqlite(value: DbValue) -> Result<Value, SqlForgeError> {
    Ok(match value {
        DbValue::Null => Value::Null,
        DbValue::Bool(b) => Value::Integer(i64::from(b)),
        DbValue::Int8(v) => Value::Integer(i64::from(v)),
        DbValue::Int16(v) => Value::Integer(i64::from(v)),
        DbValue::Int32(v) => Value::Integer(i64::from(v)),
        DbValue::Int64(v) => Value::Integer(v),
        DbValue::UInt8(v) => Value::Integer(i64::from(v)),
        DbValue::UInt16(v) => Value::Integer(i64::from(v)),
        DbValue::UInt32(v) => Value::Integer(i64::from(v)),
        DbValue::UInt64(v) => Value::Integer(i64::try_from(v).map_err(|_| {
            SqlForgeError::BindError(format!("{v} does not fit SQLite's 64-bit integer"))
        })?),
        DbValue::Double(f) => Value::Real(f),
        DbValue::Blob(bytes) => Value::Blob(bytes),
        DbValue::Text(s) => Value::Text(s),
        DbValue::Date(d) => Value::Text(d.format(DATE_FORMAT).to_string()),
        DbValue::Time(t) => Value::Text(t.format(TIME_FORMAT).to_string()),
        DbValue::DateTime(dt) => Value::Text(dt.format(DATETIME_FORMAT).to_string()),
    })
}

/// Convert one result cell into an owned [`DbValue`].
///
/// Dispatches on the cell's storage class; text and blobs are copied out
/// of driver memory. Temporal values come back as their ISO text and are
/// recovered through coerced extraction.
pub fn sqlite_to_db_value(cell: ValueRef<'_>) -> DbValue {
    match cell {
        ValueRef::Null => DbValue::Null,
        ValueRef::Integer(i) => DbValue::Int64(i),
        ValueRef::Real(f) => DbValue::Double(f),
        ValueRef::Text(bytes) => DbValue::Text(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(bytes) => DbValue::Blob(bytes.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn temporals_bind_as_iso_text() {
        let d = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            db_value_to_sqlite(DbValue::Date(d)).unwrap(),
            Value::Text("2024-05-01".to_string())
        );
        let dt = d.and_hms_opt(7, 45, 0).unwrap();
        assert_eq!(
            db_value_to_sqlite(DbValue::DateTime(dt)).unwrap(),
            Value::Text("2024-05-01T07:45:00".to_string())
        );
    }

    #[test]
    fn bool_binds_as_integer() {
        assert_eq!(
            db_value_to_sqlite(DbValue::Bool(true)).unwrap(),
            Value::Integer(1)
        );
    }

    #[test]
    fn oversized_unsigned_is_a_bind_error() {
        assert!(db_value_to_sqlite(DbValue::UInt64(u64::MAX)).is_err());
        assert!(db_value_to_sqlite(DbValue::UInt64(42)).is_ok());
    }
}
