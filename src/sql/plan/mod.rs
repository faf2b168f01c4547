use std::cmp::Ordering;

use crate::{
    error::Result,
    sql::{
        engine::Transaction,
        executor::{Executor, ResultSet},
        parser::ast::{AlterOperation, Comparison, Predicate, Projection},
        schema::Table,
        types::{Row, Value, coerce::{Literal, coerce}},
    },
};

use planner::Planner;

mod planner;

/// Execution plan node
#[derive(Debug, PartialEq)]
pub enum Node {
    CreateTable {
        schema: Table,
        if_not_exists: bool,
    },
    DropTable {
        name: String,
        if_exists: bool,
    },
    AlterTable {
        table_name: String,
        operation: AlterOperation,
    },
    Insert {
        table_name: String,
        columns: Option<Vec<String>>,
        values: Vec<Vec<Literal>>,
        returning: Option<Projection>,
    },
    /// Reads every row matching the filter
    Scan {
        table_name: String,
        filter: Option<Predicate>,
    },
    /// Narrows the source rows to the named columns
    Projection {
        source: Box<Node>,
        columns: Projection,
    },
    Update {
        table_name: String,
        source: Box<Node>,
        columns: Vec<(String, Literal)>,
        returning: Option<Projection>,
    },
    Delete {
        table_name: String,
        source: Box<Node>,
        returning: Option<Projection>,
    },
}

/// Execution plan wrapper
#[derive(Debug, PartialEq)]
pub struct Plan(pub Node);

impl Plan {
    pub fn build(stmt: crate::sql::parser::ast::Statement) -> Result<Self> {
        Planner::new().build(stmt)
    }

    pub fn execute<T: Transaction + 'static>(self, txn: &mut T) -> Result<ResultSet> {
        <dyn Executor<T>>::build(self.0).execute(txn)
    }
}

/// A predicate bound to a table: the column resolved to its position and
/// the literal coerced to the column type
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub index: usize,
    pub op: Comparison,
    pub value: Value,
}

impl Filter {
    /// Binds a predicate to the table's columns
    ///
    /// The literal goes through the same coercion as inserted values, so a
    /// fraction compared with a BIGINT column is rounded (`index = 9.8`
    /// matches 10) and a timestamp compared with a DATE column loses its time
    /// of day.
    pub fn resolve(table: &Table, predicate: Predicate) -> Result<Self> {
        let index = table.get_col_index(&predicate.column)?;
        let value = coerce(predicate.value, &table.columns[index].datatype)?;
        Ok(Self {
            index,
            op: predicate.op,
            value,
        })
    }

    /// Evaluates the filter; comparisons against NULL never match
    pub fn matches(&self, row: &Row) -> bool {
        let Some(left) = row.get(self.index) else {
            return false;
        };
        if left.is_null() || self.value.is_null() {
            return false;
        }
        let Some(ordering) = left.partial_cmp(&self.value) else {
            return false;
        };
        match self.op {
            Comparison::Equal => ordering == Ordering::Equal,
            Comparison::NotEqual => ordering != Ordering::Equal,
            Comparison::LessThan => ordering == Ordering::Less,
            Comparison::LessThanOrEqual => ordering != Ordering::Greater,
            Comparison::GreaterThan => ordering == Ordering::Greater,
            Comparison::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    /// The primary-key value to look up directly, if this is a key equality
    pub fn point_key(&self, table: &Table) -> Option<&Value> {
        let is_key = table.primary_key_index().is_ok_and(|pk| pk == self.index);
        (is_key && self.op == Comparison::Equal && !self.value.is_null()).then_some(&self.value)
    }
}
