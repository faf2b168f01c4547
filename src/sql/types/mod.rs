use std::{cmp::Ordering, fmt::Display};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

pub mod coerce;

/// Supported SQL data types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    BigInt,
    /// Variable-length text bounded by a maximum number of characters
    VarChar(u32),
    Date,
    Timestamp,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::BigInt => write!(f, "bigint"),
            DataType::VarChar(n) => write!(f, "character varying({})", n),
            DataType::Date => write!(f, "date"),
            DataType::Timestamp => write!(f, "timestamp without time zone"),
        }
    }
}

/// Runtime value stored in a row
///
/// Values are hashable so the primary-key value can address its row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Text(v) => write!(f, "{}", v),
            Value::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Value::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }
}

/// Orders values of the same type; NULL sorts first, mixed types are incomparable
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Integer(a), Value::Integer(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Timestamp(b)) => a.and_time(NaiveTime::MIN).partial_cmp(b),
            (Value::Timestamp(a), Value::Date(b)) => a.partial_cmp(&b.and_time(NaiveTime::MIN)),
            (_, _) => None,
        }
    }
}

/// A row is a vector of values, aligned with the table's columns
pub type Row = Vec<Value>;

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use chrono::NaiveDate;

    use super::{DataType, Value};

    #[test]
    fn test_display() {
        let date = NaiveDate::from_ymd_opt(834, 1, 1).unwrap();
        assert_eq!(Value::Date(date).to_string(), "0834-01-01");
        assert_eq!(
            Value::Timestamp(date.and_hms_opt(12, 30, 0).unwrap()).to_string(),
            "0834-01-01 12:30:00"
        );
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(DataType::VarChar(50).to_string(), "character varying(50)");
    }

    #[test]
    fn test_ordering() {
        let d1 = Value::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
        let d2 = Value::Date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(d1.partial_cmp(&d2), Some(Ordering::Less));
        assert_eq!(Value::Null.partial_cmp(&d1), Some(Ordering::Less));
        assert_eq!(Value::Integer(1).partial_cmp(&Value::Text("1".into())), None);
    }
}
