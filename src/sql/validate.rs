//! Constraint validation for candidate rows. Never touches storage: the
//! caller supplies a key lookup over the rows currently stored.

use std::collections::HashSet;

use crate::{
    error::{Error, Result},
    sql::{
        schema::Table,
        types::{DataType, Row, Value},
    },
};

/// Checks candidate rows against the table's constraints
///
/// Checks run in a fixed order per row: not-null, length, uniqueness. The
/// first failure wins.
pub struct Validator<'a> {
    table: &'a Table,
}

impl<'a> Validator<'a> {
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Validates a row about to be inserted
    ///
    /// `exists` reports whether a primary-key value is already stored.
    pub fn check_insert<F>(&self, row: &Row, exists: F) -> Result<()>
    where
        F: Fn(&Value) -> Result<bool>,
    {
        self.check_columns(row)?;
        let key = self.table.get_primary_key(row)?;
        if exists(&key)? {
            return Err(self.unique_violation(&key)?);
        }
        Ok(())
    }

    /// Validates a batch of updated rows, each paired with its current key
    ///
    /// A new key conflicts if another batch row takes it too, or if it is
    /// held by a stored row that is not part of the batch.
    pub fn check_update<F>(&self, batch: &[(Value, Row)], exists: F) -> Result<()>
    where
        F: Fn(&Value) -> Result<bool>,
    {
        let old_keys: HashSet<&Value> = batch.iter().map(|(key, _)| key).collect();
        let mut new_keys = HashSet::new();
        for (old_key, row) in batch {
            self.check_columns(row)?;
            let key = self.table.get_primary_key(row)?;
            if !new_keys.insert(key.clone()) {
                return Err(self.unique_violation(&key)?);
            }
            if key != *old_key && !old_keys.contains(&key) && exists(&key)? {
                return Err(self.unique_violation(&key)?);
            }
        }
        Ok(())
    }

    /// Not-null and length checks for one row
    pub fn check_columns(&self, row: &Row) -> Result<()> {
        if row.len() != self.table.columns.len() {
            return Err(Error::Internal(format!(
                "row has {} values, table {} has {} columns",
                row.len(),
                self.table.name,
                self.table.columns.len()
            )));
        }
        for (column, value) in self.table.columns.iter().zip(row) {
            if value.is_null() && !column.nullable {
                return Err(Error::NotNullViolation(column.name.clone()));
            }
        }
        for (column, value) in self.table.columns.iter().zip(row) {
            check_length(&column.datatype, value)?;
        }
        Ok(())
    }

    fn unique_violation(&self, key: &Value) -> Result<Error> {
        let column = &self.table.columns[self.table.primary_key_index()?];
        Ok(Error::UniqueViolation {
            column: column.name.clone(),
            value: key.to_string(),
        })
    }
}

/// Fails if text is longer than a `VarChar(n)` allows, counting characters
pub fn check_length(datatype: &DataType, value: &Value) -> Result<()> {
    if let (DataType::VarChar(max), Value::Text(s)) = (datatype, value) {
        if s.chars().count() > *max as usize {
            return Err(Error::StringDataRightTruncation(datatype.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::Validator;
    use crate::{
        error::{ErrorKind, Result},
        sql::{
            schema::{Column, Table},
            types::{DataType, Row, Value},
        },
    };

    fn people() -> Table {
        Table::new(
            "people",
            vec![
                Column::new("index", DataType::BigInt).primary_key(),
                Column::new("name", DataType::VarChar(50)).not_null(),
                Column::new("dateofbirth", DataType::Date).not_null(),
            ],
        )
    }

    fn row(index: i64, name: &str) -> Row {
        vec![
            Value::Integer(index),
            Value::Text(name.into()),
            Value::Date(NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()),
        ]
    }

    fn stored(keys: &[i64]) -> impl Fn(&Value) -> Result<bool> + '_ {
        move |key| Ok(keys.iter().any(|k| *key == Value::Integer(*k)))
    }

    #[test]
    fn test_insert() -> Result<()> {
        let table = people();
        let validator = Validator::new(&table);

        validator.check_insert(&row(1, "John"), stored(&[]))?;
        validator.check_insert(&row(9, &"Я".repeat(50)), stored(&[]))?;

        let err = validator.check_insert(&row(1, "John"), stored(&[1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UniqueViolation);

        let long = row(2, &"Я".repeat(51));
        let err = validator.check_insert(&long, stored(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StringDataRightTruncation);

        let mut null_name = row(3, "x");
        null_name[1] = Value::Null;
        let err = validator.check_insert(&null_name, stored(&[])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotNullViolation);
        Ok(())
    }

    #[test]
    fn test_precedence() {
        let table = people();
        let validator = Validator::new(&table);

        // not-null beats length, which beats uniqueness
        let mut candidate = row(1, &"a".repeat(51));
        candidate[2] = Value::Null;
        let err = validator.check_insert(&candidate, stored(&[1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotNullViolation);

        let candidate = row(1, &"a".repeat(51));
        let err = validator.check_insert(&candidate, stored(&[1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StringDataRightTruncation);
    }

    #[test]
    fn test_update() -> Result<()> {
        let table = people();
        let validator = Validator::new(&table);

        // 1 -> 3 is free
        validator.check_update(&[(Value::Integer(1), row(3, "Johnny"))], stored(&[1, 2]))?;
        // keys may move onto keys vacated by the same statement
        validator.check_update(
            &[
                (Value::Integer(1), row(2, "a")),
                (Value::Integer(2), row(3, "b")),
            ],
            stored(&[1, 2]),
        )?;

        // 1 -> 2 while 2 stays
        let err = validator
            .check_update(&[(Value::Integer(1), row(2, "John"))], stored(&[1, 2]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UniqueViolation);

        // both rows -> 1
        let err = validator
            .check_update(
                &[
                    (Value::Integer(1), row(1, "John")),
                    (Value::Integer(2), row(1, "John")),
                ],
                stored(&[1, 2]),
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UniqueViolation);
        Ok(())
    }
}
