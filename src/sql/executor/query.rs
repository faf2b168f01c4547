use crate::{
    error::{Error, Result},
    sql::{
        engine::Transaction,
        executor::ResultSet,
        parser::ast::{self, Predicate},
        plan::Filter,
        schema::Table,
        types::Row,
    },
};

use super::Executor;

/// Table scan executor (SELECT, and the row source of UPDATE/DELETE)
pub struct Scan {
    table_name: String,
    filter: Option<Predicate>,
}

impl Scan {
    pub fn new(table_name: String, filter: Option<Predicate>) -> Box<Self> {
        Box::new(Self { table_name, filter })
    }
}

impl<T: Transaction> Executor<T> for Scan {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        let table = txn.must_get_table(&self.table_name)?;
        let filter = self
            .filter
            .map(|predicate| Filter::resolve(&table, predicate))
            .transpose()?;
        let rows = txn.scan_table(&table, filter.as_ref())?;
        Ok(ResultSet::Scan {
            columns: column_names(&table),
            rows,
        })
    }
}

/// Column projection executor (SELECT a, b)
pub struct Projection<T: Transaction> {
    source: Box<dyn Executor<T>>,
    columns: ast::Projection,
}

impl<T: Transaction> Projection<T> {
    pub fn new(source: Box<dyn Executor<T>>, columns: ast::Projection) -> Box<Self> {
        Box::new(Self { source, columns })
    }
}

impl<T: Transaction> Executor<T> for Projection<T> {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet> {
        match self.source.execute(txn)? {
            ResultSet::Scan { columns, rows } => {
                let (columns, rows) = project(columns, rows, &self.columns)?;
                Ok(ResultSet::Scan { columns, rows })
            }
            _ => Err(Error::Internal("Unexpected result set".into())),
        }
    }
}

pub fn column_names(table: &Table) -> Vec<String> {
    table.columns.iter().map(|c| c.name.clone()).collect()
}

/// Picks the projected columns out of each row, in projection order
pub fn project(
    columns: Vec<String>,
    rows: Vec<Row>,
    projection: &ast::Projection,
) -> Result<(Vec<String>, Vec<Row>)> {
    let names = match projection {
        ast::Projection::All => return Ok((columns, rows)),
        ast::Projection::Columns(names) => names,
    };
    let indexes = names
        .iter()
        .map(|name| {
            columns
                .iter()
                .position(|c| c == name)
                .ok_or_else(|| Error::UndefinedColumn(name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;
    let rows = rows
        .into_iter()
        .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok((names.clone(), rows))
}
