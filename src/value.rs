use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::SqlForgeError;

/// ISO-extended formats used whenever a temporal value travels as text.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S%.f";
pub(crate) const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
/// Accepted on input only; some engines hand back a space separator.
pub(crate) const DATETIME_FORMAT_SPACE: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A value travelling between the application and a database.
///
/// One enum covers every scalar type the query layer and both drivers deal
/// in, so parameters and result cells never need driver-specific types:
/// ```rust
/// use sql_forge::DbValue;
///
/// let params = vec![
///     DbValue::from(1_i64),
///     DbValue::from("alice"),
///     DbValue::from(true),
/// ];
/// # let _ = params;
/// ```
///
/// `Null` is its own tag, never a sentinel of another variant.
#[derive(Debug, Clone, PartialEq)]
pub enum DbValue {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    /// Floating point value (64-bit)
    Double(f64),
    /// Binary data
    Blob(Vec<u8>),
    /// Text/string value
    Text(String),
    /// Calendar date, no time component
    Date(NaiveDate),
    /// Time of day, no date component
    Time(NaiveTime),
    /// Combined date and time, no timezone
    DateTime(NaiveDateTime),
}

impl DbValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the active tag, for diagnostics.
    #[must_use]
    pub fn tag_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int8(_) => "Int8",
            Self::Int16(_) => "Int16",
            Self::Int32(_) => "Int32",
            Self::Int64(_) => "Int64",
            Self::UInt8(_) => "UInt8",
            Self::UInt16(_) => "UInt16",
            Self::UInt32(_) => "UInt32",
            Self::UInt64(_) => "UInt64",
            Self::Double(_) => "Double",
            Self::Blob(_) => "Blob",
            Self::Text(_) => "Text",
            Self::Date(_) => "Date",
            Self::Time(_) => "Time",
            Self::DateTime(_) => "DateTime",
        }
    }

    /// Whether the active tag carries a `T`.
    #[must_use]
    pub fn is<T: FromDbValue>(&self) -> bool {
        T::from_db_value(self).is_ok()
    }

    /// Strict extraction: fails unless the active tag matches `T` exactly.
    ///
    /// # Errors
    /// Returns `SqlForgeError::TypeMismatch` when the tag differs from `T`.
    pub fn get<T: FromDbValue>(&self) -> Result<T, SqlForgeError> {
        T::from_db_value(self)
    }

    /// Coerced extraction across the documented conversion matrix: integer
    /// widening/narrowing (checked), bool and integer, integer to f64,
    /// temporal and ISO text, blob and UTF-8 text.
    ///
    /// # Errors
    /// Returns `SqlForgeError::TypeMismatch` for any conversion outside the
    /// matrix, including out-of-range narrowing and invalid UTF-8.
    pub fn get_as<T: FromDbValue>(&self) -> Result<T, SqlForgeError> {
        T::from_db_value_coerced(self)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let DbValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let DbValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    pub(crate) fn mismatch(&self, wanted: &str) -> SqlForgeError {
        SqlForgeError::TypeMismatch(format!("cannot read {} as {wanted}", self.tag_name()))
    }

    /// Signed magnitude of any integer or bool variant.
    fn as_i128(&self) -> Option<i128> {
        match self {
            Self::Bool(b) => Some(i128::from(*b)),
            Self::Int8(v) => Some(i128::from(*v)),
            Self::Int16(v) => Some(i128::from(*v)),
            Self::Int32(v) => Some(i128::from(*v)),
            Self::Int64(v) => Some(i128::from(*v)),
            Self::UInt8(v) => Some(i128::from(*v)),
            Self::UInt16(v) => Some(i128::from(*v)),
            Self::UInt32(v) => Some(i128::from(*v)),
            Self::UInt64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

/// Extraction out of a [`DbValue`], in strict and coerced flavours.
///
/// Implemented for every concrete type a variant carries. `get`/`get_as` on
/// [`DbValue`] are the intended entry points.
pub trait FromDbValue: Sized {
    /// Exact-tag extraction.
    ///
    /// # Errors
    /// `TypeMismatch` when the active tag does not carry `Self`.
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError>;

    /// Extraction with the coercion matrix applied.
    ///
    /// # Errors
    /// `TypeMismatch` when no documented coercion leads to `Self`.
    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError>;
}

macro_rules! impl_from_db_value_int {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromDbValue for $ty {
                fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
                    match value {
                        DbValue::$variant(v) => Ok(*v),
                        other => Err(other.mismatch(stringify!($ty))),
                    }
                }

                fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
                    let wide = value
                        .as_i128()
                        .ok_or_else(|| value.mismatch(stringify!($ty)))?;
                    <$ty>::try_from(wide).map_err(|_| {
                        SqlForgeError::TypeMismatch(format!(
                            "{} out of range for {}",
                            wide,
                            stringify!($ty)
                        ))
                    })
                }
            }
        )*
    };
}

impl_from_db_value_int! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
}

impl FromDbValue for bool {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Bool(b) => Ok(*b),
            other => Err(other.mismatch("bool")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value.as_i128() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            Some(n) => Err(SqlForgeError::TypeMismatch(format!(
                "{n} is neither 0 nor 1"
            ))),
            None => Err(value.mismatch("bool")),
        }
    }
}

impl FromDbValue for f64 {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Double(f) => Ok(*f),
            other => Err(other.mismatch("f64")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Double(f) => Ok(*f),
            other => match other.as_i128() {
                Some(n) => Ok(n as f64),
                None => Err(other.mismatch("f64")),
            },
        }
    }
}

impl FromDbValue for String {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Text(s) => Ok(s.clone()),
            other => Err(other.mismatch("String")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Text(s) => Ok(s.clone()),
            DbValue::Date(d) => Ok(d.format(DATE_FORMAT).to_string()),
            DbValue::Time(t) => Ok(t.format(TIME_FORMAT).to_string()),
            DbValue::DateTime(dt) => Ok(dt.format(DATETIME_FORMAT).to_string()),
            DbValue::Blob(bytes) => String::from_utf8(bytes.clone()).map_err(|_| {
                SqlForgeError::TypeMismatch("blob is not valid UTF-8".to_string())
            }),
            other => Err(other.mismatch("String")),
        }
    }
}

impl FromDbValue for Vec<u8> {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Blob(bytes) => Ok(bytes.clone()),
            other => Err(other.mismatch("Vec<u8>")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Blob(bytes) => Ok(bytes.clone()),
            DbValue::Text(s) => Ok(s.clone().into_bytes()),
            other => Err(other.mismatch("Vec<u8>")),
        }
    }
}

impl FromDbValue for NaiveDate {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Date(d) => Ok(*d),
            other => Err(other.mismatch("Date")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Date(d) => Ok(*d),
            DbValue::Text(s) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map_err(|e| SqlForgeError::TypeMismatch(format!("{s:?} is not a date: {e}"))),
            other => Err(other.mismatch("Date")),
        }
    }
}

impl FromDbValue for NaiveTime {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Time(t) => Ok(*t),
            other => Err(other.mismatch("Time")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::Time(t) => Ok(*t),
            DbValue::Text(s) => NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|e| {
                SqlForgeError::TypeMismatch(format!("{s:?} is not a time of day: {e}"))
            }),
            other => Err(other.mismatch("Time")),
        }
    }
}

impl FromDbValue for NaiveDateTime {
    fn from_db_value(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::DateTime(dt) => Ok(*dt),
            other => Err(other.mismatch("DateTime")),
        }
    }

    fn from_db_value_coerced(value: &DbValue) -> Result<Self, SqlForgeError> {
        match value {
            DbValue::DateTime(dt) => Ok(*dt),
            DbValue::Text(s) => NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT_SPACE))
                .map_err(|e| {
                    SqlForgeError::TypeMismatch(format!("{s:?} is not a datetime: {e}"))
                }),
            other => Err(other.mismatch("DateTime")),
        }
    }
}

macro_rules! impl_into_db_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DbValue {
                fn from(value: $ty) -> Self {
                    DbValue::$variant(value)
                }
            }
        )*
    };
}

impl_into_db_value! {
    bool => Bool,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f64 => Double,
    Vec<u8> => Blob,
    String => Text,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
}

impl From<&str> for DbValue {
    fn from(value: &str) -> Self {
        DbValue::Text(value.to_string())
    }
}

impl From<&[u8]> for DbValue {
    fn from(value: &[u8]) -> Self {
        DbValue::Blob(value.to_vec())
    }
}

impl<T: Into<DbValue>> From<Option<T>> for DbValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => DbValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_get_requires_exact_tag() {
        let v = DbValue::Int32(7);
        assert_eq!(v.get::<i32>().unwrap(), 7);
        assert!(v.get::<i64>().is_err());
        assert!(v.get::<String>().is_err());
        assert!(v.is::<i32>());
        assert!(!v.is::<i64>());
    }

    #[test]
    fn coerced_integers_widen_and_narrow() {
        let v = DbValue::Int64(300);
        assert_eq!(v.get_as::<u16>().unwrap(), 300);
        assert!(v.get_as::<u8>().is_err());
        assert_eq!(DbValue::UInt8(1).get_as::<i64>().unwrap(), 1);
    }

    #[test]
    fn coerced_bool_accepts_zero_and_one() {
        assert!(DbValue::Int64(1).get_as::<bool>().unwrap());
        assert!(!DbValue::UInt8(0).get_as::<bool>().unwrap());
        assert!(DbValue::Int64(2).get_as::<bool>().is_err());
        assert_eq!(DbValue::Bool(true).get_as::<u64>().unwrap(), 1);
    }

    #[test]
    fn temporal_text_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let as_text: String = DbValue::Date(date).get_as().unwrap();
        assert_eq!(as_text, "2024-03-09");
        let back: NaiveDate = DbValue::Text(as_text).get_as().unwrap();
        assert_eq!(back, date);

        let dt = date.and_hms_opt(8, 30, 0).unwrap();
        let iso: String = DbValue::DateTime(dt).get_as().unwrap();
        assert_eq!(iso, "2024-03-09T08:30:00");
        let spaced: NaiveDateTime =
            DbValue::Text("2024-03-09 08:30:00".into()).get_as().unwrap();
        assert_eq!(spaced, dt);
    }

    #[test]
    fn blob_text_cross_conversion() {
        let blob = DbValue::Blob(b"caf\xc3\xa9".to_vec());
        assert_eq!(blob.get_as::<String>().unwrap(), "café");
        assert!(DbValue::Blob(vec![0xff, 0xfe]).get_as::<String>().is_err());
        assert_eq!(
            DbValue::Text("abc".into()).get_as::<Vec<u8>>().unwrap(),
            b"abc".to_vec()
        );
    }

    #[test]
    fn null_is_a_distinct_tag() {
        assert!(DbValue::Null.is_null());
        assert!(!DbValue::Int64(0).is_null());
        assert!(DbValue::Null.get_as::<i64>().is_err());
        assert_eq!(DbValue::from(None::<i64>), DbValue::Null);
    }
}
