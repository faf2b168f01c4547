use std::collections::HashSet;

use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        engine::Transaction,
        executor::{
            Returning, ResultSet,
            query::{column_names, project},
        },
        parser::ast::Projection,
        schema::Table,
        types::{Row, Value, coerce::{Literal, coerce}},
        validate::Validator,
    },
};

use super::Executor;

/// INSERT executor
pub struct Insert {
    table_name: String,
    columns: Option<Vec<String>>,
    values: Vec<Vec<Literal>>,
    returning: Option<Projection>,
}

impl Insert {
    pub fn new(
        table_name: String,
        columns: Option<Vec<String>>,
        values: Vec<Vec<Literal>>,
        returning: Option<Projection>,
    ) -> Box<Self> {
        Box::new(Self {
            table_name,
            columns,
            values,
            returning,
        })
    }
}

/// Positional insert: values fill the leading columns, the rest are NULL
///
/// insert into tbl values (1, 2);
///   a    b    c
///   1    2    NULL
fn pad_row(table: &Table, values: Vec<Literal>) -> Result<Row> {
    if values.len() > table.columns.len() {
        return Err(Error::SyntaxError(
            "INSERT has more expressions than target columns".into(),
        ));
    }
    let mut row = values
        .into_iter()
        .zip(&table.columns)
        .map(|(literal, column)| coerce(literal, &column.datatype))
        .collect::<Result<Row>>()?;
    row.resize(table.columns.len(), Value::Null);
    Ok(row)
}

/// Insert with a column list: listed columns take the values, the rest are NULL
///
/// insert into tbl (c, a) values (1, 2);
///   a    b    c
///   2    NULL 1
fn make_row(table: &Table, columns: &[String], values: Vec<Literal>) -> Result<Row> {
    if columns.len() != values.len() {
        return Err(Error::SyntaxError(
            "INSERT target columns and expressions differ in number".into(),
        ));
    }
    let mut row = vec![Value::Null; table.columns.len()];
    let mut seen = HashSet::new();
    for (name, literal) in columns.iter().zip(values) {
        let index = table.get_col_index(name)?;
        if !seen.insert(index) {
            return Err(Error::DuplicateColumn(name.clone()));
        }
        row[index] = coerce(literal, &table.columns[index].datatype)?;
    }
    Ok(row)
}

impl<T: Transaction> Executor<T> for Insert {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let table = txn.must_get_table(&self.table_name)?;
        let validator = Validator::new(&table);
        let mut inserted = Vec::new();

        for values in self.values {
            let row = match &self.columns {
                None => pad_row(&table, values)?,
                Some(columns) => make_row(&table, columns, values)?,
            };
            validator.check_insert(&row, |key| Ok(txn.get_row(&table, key)?.is_some()))?;
            txn.create_row(&table, row.clone())?;
            inserted.push(row);
        }

        debug!(table = %table.name, count = inserted.len(), "inserted rows");
        Ok(ResultSet::Insert {
            count: inserted.len(),
            returning: returning(&table, inserted, self.returning.as_ref())?,
        })
    }
}

/// UPDATE executor
pub struct Update<T: Transaction> {
    table_name: String,
    source: Box<dyn Executor<T>>,
    columns: Vec<(String, Literal)>,
    returning: Option<Projection>,
}

impl<T: Transaction> Update<T> {
    pub fn new(
        table_name: String,
        source: Box<dyn Executor<T>>,
        columns: Vec<(String, Literal)>,
        returning: Option<Projection>,
    ) -> Box<Self> {
        Box::new(Self {
            table_name,
            source,
            columns,
            returning,
        })
    }
}

impl<T: Transaction> Executor<T> for Update<T> {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let table = txn.must_get_table(&self.table_name)?;

        // Resolve and coerce the assignments before touching any row
        let mut assignments: Vec<(usize, Value)> = Vec::with_capacity(self.columns.len());
        for (name, literal) in self.columns {
            let index = table.get_col_index(&name)?;
            if assignments.iter().any(|(i, _)| *i == index) {
                return Err(Error::SyntaxError(format!(
                    "multiple assignments to same column \"{}\"",
                    name
                )));
            }
            assignments.push((index, coerce(literal, &table.columns[index].datatype)?));
        }

        let rows = match self.source.execute(txn)? {
            ResultSet::Scan { rows, .. } => rows,
            _ => return Err(Error::Internal("Unexpected result set".into())),
        };

        let mut batch = Vec::with_capacity(rows.len());
        for mut row in rows {
            let old_key = table.get_primary_key(&row)?;
            for (index, value) in &assignments {
                row[*index] = value.clone();
            }
            batch.push((old_key, row));
        }

        // Whole batch is checked against the final state before any write
        Validator::new(&table)
            .check_update(&batch, |key| Ok(txn.get_row(&table, key)?.is_some()))?;
        let count = batch.len();
        let updated = rewrite_rows(txn, &table, batch)?;

        debug!(table = %table.name, count, "updated rows");
        Ok(ResultSet::Update {
            count,
            returning: returning(&table, updated, self.returning.as_ref())?,
        })
    }
}

/// DELETE executor
pub struct Delete<T: Transaction> {
    table_name: String,
    source: Box<dyn Executor<T>>,
    returning: Option<Projection>,
}

impl<T: Transaction> Delete<T> {
    pub fn new(
        table_name: String,
        source: Box<dyn Executor<T>>,
        returning: Option<Projection>,
    ) -> Box<Self> {
        Box::new(Self {
            table_name,
            source,
            returning,
        })
    }
}

impl<T: Transaction> Executor<T> for Delete<T> {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let table = txn.must_get_table(&self.table_name)?;
        let rows = match self.source.execute(txn)? {
            ResultSet::Scan { rows, .. } => rows,
            _ => return Err(Error::Internal("Unexpected result set".into())),
        };

        for row in &rows {
            txn.delete_row(&table, &table.get_primary_key(row)?)?;
        }

        debug!(table = %table.name, count = rows.len(), "deleted rows");
        Ok(ResultSet::Delete {
            count: rows.len(),
            returning: returning(&table, rows, self.returning.as_ref())?,
        })
    }
}

/// Writes a batch of already validated rows, each paired with its old key
///
/// Rows whose key changed are removed first so that keys may be swapped
/// within one batch.
pub fn rewrite_rows<T: Transaction>(
    txn: &mut T,
    table: &Table,
    batch: Vec<(Value, Row)>,
) -> Result<Vec<Row>> {
    let mut rows = Vec::with_capacity(batch.len());
    for (old_key, row) in batch {
        if table.get_primary_key(&row)? != old_key {
            txn.delete_row(table, &old_key)?;
        }
        rows.push(row);
    }
    for row in &rows {
        txn.create_row(table, row.clone())?;
    }
    Ok(rows)
}

fn returning(table: &Table, rows: Vec<Row>, projection: Option<&Projection>) -> Result<Returning> {
    let Some(projection) = projection else {
        return Ok(Returning::default());
    };
    let (columns, rows) = project(column_names(table), rows, projection)?;
    Ok(Returning { columns, rows })
}
