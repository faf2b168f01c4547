//! Value coercion: turns loosely typed input literals into typed column values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{Error, Result};

use super::{DataType, Value};

/// Externally supplied literal, before it is bound to a column type
///
/// `Integer` is wider than the storage type so that out-of-range input can
/// be represented and rejected by coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i128),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    /// Non-scalar input such as a mapping or a list, kept as its rendering
    Composite(String),
}

impl Literal {
    fn shape(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Integer(_) => "integer",
            Literal::Float(_) => "numeric",
            Literal::Text(_) => "text",
            Literal::Date(_) => "date",
            Literal::Timestamp(_) => "timestamp without time zone",
            Literal::Composite(_) => "record",
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Boolean(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Integer(value.into())
    }
}

impl From<i128> for Literal {
    fn from(value: i128) -> Self {
        Literal::Integer(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<NaiveDate> for Literal {
    fn from(value: NaiveDate) -> Self {
        Literal::Date(value)
    }
}

impl From<NaiveDateTime> for Literal {
    fn from(value: NaiveDateTime) -> Self {
        Literal::Timestamp(value)
    }
}

impl<T: Into<Literal>> From<Option<T>> for Literal {
    fn from(value: Option<T>) -> Self {
        value.map_or(Literal::Null, Into::into)
    }
}

/// Stored values re-enter coercion as the literal they were built from
impl From<Value> for Literal {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Integer(i) => Literal::Integer(i.into()),
            Value::Text(s) => Literal::Text(s),
            Value::Date(d) => Literal::Date(d),
            Value::Timestamp(ts) => Literal::Timestamp(ts),
        }
    }
}

/// Coerces a literal into a value of the given column type
///
/// NULL passes through for every type; not-null and length constraints are
/// enforced later by the validator.
pub fn coerce(literal: Literal, datatype: &DataType) -> Result<Value> {
    if let Literal::Null = literal {
        return Ok(Value::Null);
    }
    match datatype {
        DataType::BigInt => coerce_bigint(literal),
        DataType::VarChar(_) => coerce_text(literal, datatype),
        DataType::Date => coerce_date(literal),
        DataType::Timestamp => coerce_timestamp(literal),
    }
}

/// Converts an already stored value to another column type
///
/// Unlike [`coerce`], a conversion that would drop information (a timestamp
/// with a time of day narrowed to a date) is refused.
pub fn convert(value: Value, datatype: &DataType) -> Result<Value> {
    if let (Value::Timestamp(ts), DataType::Date) = (&value, datatype) {
        if ts.time() != NaiveTime::MIN {
            return Err(Error::TypeMismatch(format!(
                "timestamp {} has a time of day and cannot become a date",
                ts
            )));
        }
    }
    coerce(value.into(), datatype)
}

fn mismatch(literal: &Literal, datatype: &DataType) -> Error {
    Error::TypeMismatch(format!(
        "column is of type {} but expression is of type {}",
        datatype,
        literal.shape()
    ))
}

fn out_of_range() -> Error {
    Error::NumericOutOfRange("bigint out of range".into())
}

fn coerce_bigint(literal: Literal) -> Result<Value> {
    match literal {
        Literal::Integer(i) => i64::try_from(i).map(Value::Integer).map_err(|_| out_of_range()),
        // numeric to bigint rounds half away from zero
        Literal::Float(f) => {
            let rounded = f.round();
            if !rounded.is_finite() || rounded < i64::MIN as f64 || rounded >= -(i64::MIN as f64) {
                return Err(out_of_range());
            }
            Ok(Value::Integer(rounded as i64))
        }
        Literal::Text(s) => parse_bigint(&s).map(Value::Integer),
        literal => Err(mismatch(&literal, &DataType::BigInt)),
    }
}

fn parse_bigint(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidTextRepresentation {
            datatype: DataType::BigInt.to_string(),
            input: input.to_string(),
        });
    }
    trimmed.parse().map_err(|_| {
        Error::NumericOutOfRange(format!("value \"{}\" is out of range for type bigint", input))
    })
}

fn coerce_text(literal: Literal, datatype: &DataType) -> Result<Value> {
    Ok(Value::Text(match literal {
        Literal::Text(s) => s,
        Literal::Integer(i) => i.to_string(),
        Literal::Float(f) => f.to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Date(d) => Value::Date(d).to_string(),
        Literal::Timestamp(ts) => Value::Timestamp(ts).to_string(),
        literal => return Err(mismatch(&literal, datatype)),
    }))
}

fn coerce_date(literal: Literal) -> Result<Value> {
    match literal {
        Literal::Date(d) => Ok(Value::Date(d)),
        Literal::Timestamp(ts) => Ok(Value::Date(ts.date())),
        Literal::Text(s) => parse_timestamp(&s)
            .map(|ts| Value::Date(ts.date()))
            .ok_or_else(|| Error::InvalidTextRepresentation {
                datatype: DataType::Date.to_string(),
                input: s,
            }),
        literal => Err(mismatch(&literal, &DataType::Date)),
    }
}

fn coerce_timestamp(literal: Literal) -> Result<Value> {
    match literal {
        Literal::Timestamp(ts) => Ok(Value::Timestamp(ts)),
        Literal::Date(d) => Ok(Value::Timestamp(d.and_time(NaiveTime::MIN))),
        Literal::Text(s) => parse_timestamp(&s).map(Value::Timestamp).ok_or_else(|| {
            Error::InvalidTextRepresentation {
                datatype: DataType::Timestamp.to_string(),
                input: s,
            }
        }),
        literal => Err(mismatch(&literal, &DataType::Timestamp)),
    }
}

/// Parses `YYYY-MM-DD[ T]HH:MM[:SS[.fff]]`, or a bare date at midnight
fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    let input = input.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Literal, coerce, convert};
    use crate::{
        error::{ErrorKind, Result},
        sql::types::{DataType, Value},
    };

    fn kind(literal: Literal, datatype: DataType) -> ErrorKind {
        coerce(literal, &datatype).unwrap_err().kind()
    }

    #[test]
    fn test_bigint_boundaries() -> Result<()> {
        assert_eq!(coerce(i64::MAX.into(), &DataType::BigInt)?, Value::Integer(i64::MAX));
        assert_eq!(coerce(i64::MIN.into(), &DataType::BigInt)?, Value::Integer(i64::MIN));
        assert_eq!(
            kind(Literal::Integer(i64::MAX as i128 + 1), DataType::BigInt),
            ErrorKind::NumericOutOfRange
        );
        assert_eq!(
            kind(Literal::Integer(i64::MIN as i128 - 1), DataType::BigInt),
            ErrorKind::NumericOutOfRange
        );
        Ok(())
    }

    #[test]
    fn test_bigint_from_float_and_text() -> Result<()> {
        assert_eq!(coerce(9.8.into(), &DataType::BigInt)?, Value::Integer(10));
        assert_eq!(
            coerce((255232223333f64).ln().into(), &DataType::BigInt)?,
            Value::Integer(26)
        );
        assert_eq!(coerce((-2.5).into(), &DataType::BigInt)?, Value::Integer(-3));
        assert_eq!(coerce("123".into(), &DataType::BigInt)?, Value::Integer(123));
        assert_eq!(coerce("000".into(), &DataType::BigInt)?, Value::Integer(0));
        assert_eq!(coerce(" -7 ".into(), &DataType::BigInt)?, Value::Integer(-7));
        assert_eq!(kind(f64::NAN.into(), DataType::BigInt), ErrorKind::NumericOutOfRange);
        assert_eq!(kind(1e19.into(), DataType::BigInt), ErrorKind::NumericOutOfRange);
        assert_eq!(
            kind("99999999999999999999".into(), DataType::BigInt),
            ErrorKind::NumericOutOfRange
        );
        for text in ["один", "№1", "twenty", "2000-01-01", "9.8", "", "-"] {
            assert_eq!(
                kind(text.into(), DataType::BigInt),
                ErrorKind::InvalidTextRepresentation
            );
        }
        Ok(())
    }

    #[test]
    fn test_type_mismatch() {
        let date = NaiveDate::from_ymd_opt(2011, 7, 1).unwrap();
        assert_eq!(kind(date.into(), DataType::BigInt), ErrorKind::TypeMismatch);
        assert_eq!(kind(true.into(), DataType::BigInt), ErrorKind::TypeMismatch);
        assert_eq!(
            kind(Literal::Composite("{2: 4}".into()), DataType::VarChar(50)),
            ErrorKind::TypeMismatch
        );
        assert_eq!(kind(5.into(), DataType::Date), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_text() -> Result<()> {
        assert_eq!(coerce(7.into(), &DataType::VarChar(50))?, Value::Text("7".into()));
        assert_eq!(
            coerce("Павел''da".into(), &DataType::VarChar(5))?,
            Value::Text("Павел''da".into())
        );
        Ok(())
    }

    #[test]
    fn test_dates() -> Result<()> {
        let date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(coerce("2000-01-01".into(), &DataType::Date)?, Value::Date(date));
        assert_eq!(coerce(date.into(), &DataType::Timestamp)?, Value::Timestamp(midnight));
        assert_eq!(
            coerce("2000-01-01 10:15:30".into(), &DataType::Timestamp)?,
            Value::Timestamp(date.and_hms_opt(10, 15, 30).unwrap())
        );
        assert_eq!(coerce(midnight.into(), &DataType::Date)?, Value::Date(date));
        assert_eq!(
            kind("not a date".into(), DataType::Date),
            ErrorKind::InvalidTextRepresentation
        );
        assert_eq!(
            kind("2000-13-01".into(), DataType::Timestamp),
            ErrorKind::InvalidTextRepresentation
        );
        assert_eq!(coerce(Literal::Null, &DataType::Date)?, Value::Null);
        Ok(())
    }

    #[test]
    fn test_convert() -> Result<()> {
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(
            convert(Value::Date(date), &DataType::BigInt).unwrap_err().kind(),
            ErrorKind::TypeMismatch
        );
        let noon = date.and_hms_opt(12, 0, 0).unwrap();
        assert!(convert(Value::Timestamp(noon), &DataType::Date).is_err());
        let midnight = date.and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(convert(Value::Timestamp(midnight), &DataType::Date)?, Value::Date(date));
        assert_eq!(
            convert(Value::Text("42".into()), &DataType::BigInt)?,
            Value::Integer(42)
        );
        Ok(())
    }
}
