use crate::{
    error::{Error, Result},
    sql::{
        engine::Transaction,
        executor::{
            mutation::{Delete, Insert, Update},
            query::{Projection, Scan},
            schema::{AlterTable, CreateTable, DropTable},
        },
        plan::Node,
        types::Row,
    },
};

mod mutation;
mod query;
mod schema;

/// SQL executor trait
pub trait Executor<T: Transaction> {
    fn execute(self: Box<Self>, txn: &mut T) -> Result<ResultSet>;
}

/// Builds an executor from a plan node
///
/// The `'static` bound is required for trait object usage in recursive executor building.
impl<T: Transaction + 'static> dyn Executor<T> {
    pub fn build(node: Node) -> Box<dyn Executor<T>> {
        match node {
            Node::CreateTable {
                schema,
                if_not_exists,
            } => CreateTable::new(schema, if_not_exists),
            Node::DropTable { name, if_exists } => DropTable::new(name, if_exists),
            Node::AlterTable {
                table_name,
                operation,
            } => AlterTable::new(table_name, operation),
            Node::Insert {
                table_name,
                columns,
                values,
                returning,
            } => Insert::new(table_name, columns, values, returning),
            Node::Scan { table_name, filter } => Scan::new(table_name, filter),
            Node::Projection { source, columns } => Projection::new(Self::build(*source), columns),
            Node::Update {
                table_name,
                source,
                columns,
                returning,
            } => Update::new(
                table_name,
                // Recursively build inner node (Scan node from planner.rs)
                Self::build(*source),
                columns,
                returning,
            ),
            Node::Delete {
                table_name,
                source,
                returning,
            } => Delete::new(table_name, Self::build(*source), returning),
        }
    }
}

/// Rows produced by a RETURNING clause; empty when the clause is absent
#[derive(Debug, Default, PartialEq)]
pub struct Returning {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Execution result set
#[derive(Debug, PartialEq)]
pub enum ResultSet {
    CreateTable { table_name: String },
    DropTable { table_name: String },
    AlterTable { table_name: String },
    Insert { count: usize, returning: Returning },
    Update { count: usize, returning: Returning },
    Delete { count: usize, returning: Returning },
    Scan { columns: Vec<String>, rows: Vec<Row> },
    Commit,
    Rollback,
}

impl ResultSet {
    /// Rows carried by the result: scanned rows or the RETURNING projection
    pub fn rows(&self) -> &[Row] {
        match self {
            ResultSet::Scan { rows, .. } => rows,
            ResultSet::Insert { returning, .. }
            | ResultSet::Update { returning, .. }
            | ResultSet::Delete { returning, .. } => &returning.rows,
            _ => &[],
        }
    }

    /// Number of rows affected by a mutation, or returned by a scan
    pub fn count(&self) -> usize {
        match self {
            ResultSet::Insert { count, .. }
            | ResultSet::Update { count, .. }
            | ResultSet::Delete { count, .. } => *count,
            ResultSet::Scan { rows, .. } => rows.len(),
            _ => 0,
        }
    }

    /// The single row of the result, failing if there is not exactly one
    pub fn fetch_one(&self) -> Result<&Row> {
        match self.rows() {
            [row] => Ok(row),
            rows => Err(Error::Internal(format!("expected one row, got {}", rows.len()))),
        }
    }
}
