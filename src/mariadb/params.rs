use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use mysql::consts::ColumnType;
use mysql::{Column, Value};

use crate::error::SqlForgeError;
use crate::value::DbValue;

/// Character set id the server uses for binary (non-text) byte strings.
const BINARY_CHARSET: u16 = 63;

/// Convert a [`DbValue`] into a binary-protocol value.
///
/// Every variant has a native representation, so this cannot fail:
/// integers widen into the protocol's 64-bit slots, booleans become 0/1,
/// and temporal values use the protocol's date and time shapes (a
/// timestamp travels as its raw wall-clock fields).
#[must_use]
pub fn db_value_to_mysql(value: DbValue) -> Value {
    match value {
        DbValue::Null => Value::NULL,
        DbValue::Bool(b) => Value::Int(i64::from(b)),
        DbValue::Int8(v) => Value::Int(i64::from(v)),
        DbValue::Int16(v) => Value::Int(i64::from(v)),
        DbValue::Int32(v) => Value::Int(i64::from(v)),
        DbValue::Int64(v) => Value::Int(v),
        DbValue::UInt8(v) => Value::Int(i64::from(v)),
        DbValue::UInt16(v) => Value::Int(i64::from(v)),
        DbValue::UInt32(v) => Value::Int(i64::from(v)),
        DbValue::UInt64(v) => Value::UInt(v),
        DbValue::Double(f) => Value::Double(f),
        DbValue::Blob(bytes) => Value::Bytes(bytes),
        DbValue::Text(s) => Value::Bytes(s.into_bytes()),
        DbValue::Date(d) => Value::Date(d.year() as u16, d.month() as u8, d.day() as u8, 0, 0, 0, 0),
        DbValue::Time(t) => Value::Time(
            false,
            0,
            t.hour() as u8,
            t.minute() as u8,
            t.second() as u8,
            t.nanosecond() / 1_000,
        ),
        DbValue::DateTime(dt) => Value::Date(
            dt.year() as u16,
            dt.month() as u8,
            dt.day() as u8,
            dt.hour() as u8,
            dt.minute() as u8,
            dt.second() as u8,
            dt.nanosecond() / 1_000,
        ),
    }
}

/// Convert one result cell into an owned [`DbValue`], using the column
/// metadata to split the protocol's ambiguous shapes: byte strings are
/// text unless the column is binary, and the date shape covers both DATE
/// and DATETIME/TIMESTAMP columns.
///
/// # Errors
/// Returns `SqlForgeError::ExecutionError` for field values outside the
/// calendar (zero dates, times past 23:59:59).
pub fn mysql_to_db_value(value: Value, column: &Column) -> Result<DbValue, SqlForgeError> {
    Ok(match value {
        Value::NULL => DbValue::Null,
        Value::Int(i) => DbValue::Int64(i),
        Value::UInt(u) => DbValue::UInt64(u),
        Value::Float(f) => DbValue::Double(f64::from(f)),
        Value::Double(f) => DbValue::Double(f),
        Value::Bytes(bytes) => {
            if column.character_set() == BINARY_CHARSET {
                DbValue::Blob(bytes)
            } else {
                DbValue::Text(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
        Value::Date(year, month, day, hour, minute, second, micros) => {
            let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
                .ok_or_else(|| {
                    SqlForgeError::ExecutionError(format!(
                        "server sent the impossible date {year:04}-{month:02}-{day:02}"
                    ))
                })?;
            match column.column_type() {
                ColumnType::MYSQL_TYPE_DATE | ColumnType::MYSQL_TYPE_NEWDATE => DbValue::Date(date),
                _ => {
                    let time = NaiveTime::from_hms_micro_opt(
                        u32::from(hour),
                        u32::from(minute),
                        u32::from(second),
                        micros,
                    )
                    .ok_or_else(|| {
                        SqlForgeError::ExecutionError(format!(
                            "server sent the impossible time {hour:02}:{minute:02}:{second:02}"
                        ))
                    })?;
                    DbValue::DateTime(date.and_time(time))
                }
            }
        }
        Value::Time(negative, days, hour, minute, second, micros) => {
            if negative || days > 0 {
                return Err(SqlForgeError::ExecutionError(
                    "TIME value outside a single day cannot map to a time of day".to_string(),
                ));
            }
            let time = NaiveTime::from_hms_micro_opt(
                u32::from(hour),
                u32::from(minute),
                u32::from(second),
                micros,
            )
            .ok_or_else(|| {
                SqlForgeError::ExecutionError(format!(
                    "server sent the impossible time {hour:02}:{minute:02}:{second:02}"
                ))
            })?;
            DbValue::Time(time)
        }
    })
}
