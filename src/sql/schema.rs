use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    sql::{
        parser::is_reserved_keyword,
        types::{DataType, Row, Value},
    },
};

/// Table schema definition (the catalog of the single table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Validates table schema
    pub fn validate(&self) -> Result<()> {
        check_identifier(&self.name)?;
        if self.columns.is_empty() {
            return Err(Error::InvalidTableDefinition(format!(
                "table {} has no columns",
                self.name
            )));
        }

        for (i, column) in self.columns.iter().enumerate() {
            check_identifier(&column.name)?;
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        match self.columns.iter().filter(|c| c.primary_key).count() {
            1 => {}
            0 => {
                return Err(Error::InvalidTableDefinition(format!(
                    "no primary key for table {}",
                    self.name
                )));
            }
            _ => {
                return Err(Error::InvalidTableDefinition(format!(
                    "multiple primary keys for table {} are not allowed",
                    self.name
                )));
            }
        }

        Ok(())
    }

    /// Fails with `UndefinedTable` unless this table is called `name`
    pub fn must_match(&self, name: &str) -> Result<()> {
        if self.name != name {
            return Err(Error::UndefinedTable(name.to_string()));
        }
        Ok(())
    }

    pub fn primary_key_index(&self) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.primary_key)
            .ok_or_else(|| Error::Internal(format!("no primary key for table {}", self.name)))
    }

    /// Extracts primary key value from a row
    pub fn get_primary_key(&self, row: &Row) -> Result<Value> {
        let pos = self.primary_key_index()?;
        row.get(pos)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("row is missing column {}", pos)))
    }

    /// Returns the column index for a given column name
    pub fn get_col_index(&self, col_name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == col_name)
            .ok_or_else(|| Error::UndefinedColumn(col_name.to_string()))
    }

    pub fn rename(&mut self, new_name: &str) -> Result<()> {
        check_identifier(new_name)?;
        self.name = new_name.to_string();
        Ok(())
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        check_identifier(new_name)?;
        let index = self.get_col_index(old_name)?;
        if old_name != new_name && self.columns.iter().any(|c| c.name == new_name) {
            return Err(Error::DuplicateColumn(new_name.to_string()));
        }
        self.columns[index].name = new_name.to_string();
        Ok(())
    }

    /// Appends a column; existing rows must be padded with NULL by the caller
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        check_identifier(&column.name)?;
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn(column.name));
        }
        if column.primary_key {
            return Err(Error::InvalidTableDefinition(format!(
                "multiple primary keys for table {} are not allowed",
                self.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Removes a column and returns its former position
    pub fn drop_column(&mut self, name: &str) -> Result<usize> {
        let index = self.get_col_index(name)?;
        if self.columns[index].primary_key {
            return Err(Error::InvalidTableDefinition(format!(
                "cannot drop primary key column {}",
                name
            )));
        }
        self.columns.remove(index);
        Ok(index)
    }

    /// Changes a column's declared type and returns its position
    ///
    /// Stored values are converted by the caller before the new catalog is saved.
    pub fn alter_column_type(&mut self, name: &str, datatype: DataType) -> Result<usize> {
        let index = self.get_col_index(name)?;
        self.columns[index].datatype = datatype;
        Ok(index)
    }
}

/// Column schema definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub datatype: DataType,
    pub nullable: bool,
    /// Whether this column is the primary key
    pub primary_key: bool,
}

impl Column {
    /// A nullable, non-key column
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self {
            name: name.into(),
            datatype,
            nullable: true,
            primary_key: false,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Marks the column as primary key, which implies NOT NULL
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

/// Rejects identifiers that cannot name a table or column
pub fn check_identifier(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::SyntaxError("zero-length identifier".into()));
    }
    if is_reserved_keyword(name) {
        return Err(Error::SyntaxError(format!(
            "syntax error at or near \"{}\"",
            name
        )));
    }
    Ok(())
}
