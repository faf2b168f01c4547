use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        engine::Transaction,
        executor::{Executor, ResultSet, mutation::rewrite_rows},
        parser::ast::AlterOperation,
        schema::Table,
        types::{Value, coerce::convert},
        validate::check_length,
    },
};

/// CREATE TABLE executor
pub struct CreateTable {
    schema: Table,
    if_not_exists: bool,
}

impl CreateTable {
    pub fn new(schema: Table, if_not_exists: bool) -> Box<Self> {
        Box::new(Self {
            schema,
            if_not_exists,
        })
    }
}

impl<T: Transaction> Executor<T> for CreateTable {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        self.schema.validate()?;
        let table_name = self.schema.name.clone();
        match txn.get_table()? {
            Some(existing) if existing.name == table_name && self.if_not_exists => {
                debug!(table = %table_name, "table already exists, skipping");
            }
            // only one table per database
            Some(existing) => {
                debug!(table = %table_name, existing = %existing.name, "a table already exists");
                return Err(Error::DuplicateTable(table_name));
            }
            None => txn.create_table(self.schema)?,
        }
        Ok(ResultSet::CreateTable { table_name })
    }
}

/// DROP TABLE executor
pub struct DropTable {
    name: String,
    if_exists: bool,
}

impl DropTable {
    pub fn new(name: String, if_exists: bool) -> Box<Self> {
        Box::new(Self { name, if_exists })
    }
}

impl<T: Transaction> Executor<T> for DropTable {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        match txn.get_table()? {
            Some(table) if table.name == self.name => txn.drop_table(&table)?,
            _ if self.if_exists => debug!(table = %self.name, "table does not exist, skipping"),
            _ => return Err(Error::UndefinedTable(self.name)),
        }
        Ok(ResultSet::DropTable {
            table_name: self.name,
        })
    }
}

/// ALTER TABLE executor
pub struct AlterTable {
    table_name: String,
    operation: AlterOperation,
}

impl AlterTable {
    pub fn new(table_name: String, operation: AlterOperation) -> Box<Self> {
        Box::new(Self {
            table_name,
            operation,
        })
    }
}

impl<T: Transaction> Executor<T> for AlterTable {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let old = txn.must_get_table(&self.table_name)?;
        let mut table = old.clone();

        match self.operation {
            AlterOperation::RenameTable { new_name } => {
                table.rename(&new_name)?;
                txn.save_table(&table)?;
            }
            AlterOperation::RenameColumn { old_name, new_name } => {
                table.rename_column(&old_name, &new_name)?;
                txn.save_table(&table)?;
            }
            AlterOperation::AddColumn { column } => {
                let nullable = column.nullable;
                let name = column.name.clone();
                table.add_column(column)?;
                let rows = txn.scan_table(&old, None)?;
                if !nullable && !rows.is_empty() {
                    return Err(Error::NotNullViolation(name));
                }
                txn.save_table(&table)?;
                for mut row in rows {
                    row.push(Value::Null);
                    txn.create_row(&table, row)?;
                }
            }
            AlterOperation::DropColumn { name } => {
                let index = table.drop_column(&name)?;
                let rows = txn.scan_table(&old, None)?;
                txn.save_table(&table)?;
                for mut row in rows {
                    row.remove(index);
                    txn.create_row(&table, row)?;
                }
            }
            AlterOperation::AlterColumnType { name, datatype } => {
                let index = table.alter_column_type(&name, datatype)?;
                let incompatible = |reason: String| Error::IncompatibleType {
                    column: name.clone(),
                    datatype: datatype.to_string(),
                    reason,
                };

                // Convert every stored value first; any failure leaves the table as it was
                let mut batch = Vec::new();
                for mut row in txn.scan_table(&old, None)? {
                    let old_key = old.get_primary_key(&row)?;
                    let value = std::mem::replace(&mut row[index], Value::Null);
                    let value = convert(value, &datatype).map_err(|e| incompatible(e.to_string()))?;
                    check_length(&datatype, &value).map_err(|e| incompatible(e.to_string()))?;
                    row[index] = value;
                    batch.push((old_key, row));
                }

                // Converted keys may collide, e.g. timestamps narrowed to one date
                if index == table.primary_key_index()? {
                    let mut keys = HashSet::new();
                    for (_, row) in &batch {
                        let key = table.get_primary_key(row)?;
                        if !keys.insert(key.clone()) {
                            return Err(Error::UniqueViolation {
                                column: name,
                                value: key.to_string(),
                            });
                        }
                    }
                }

                txn.save_table(&table)?;
                rewrite_rows(txn, &table, batch)?;
            }
        }

        debug!(table = %table.name, "altered table");
        Ok(ResultSet::AlterTable {
            table_name: table.name,
        })
    }
}
