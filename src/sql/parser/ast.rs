use crate::sql::{schema::Column, types::DataType, types::coerce::Literal};

/// Abstract Syntax Tree (AST) node definitions for SQL statements
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE statement
    CreateTable {
        name: String,
        columns: Vec<Column>,
        if_not_exists: bool,
    },
    /// DROP TABLE statement
    DropTable {
        name: String,
        if_exists: bool,
    },
    /// ALTER TABLE statement
    AlterTable {
        table: String,
        operation: AlterOperation,
    },
    /// INSERT statement
    Insert {
        table: String,
        columns: Option<Vec<String>>,
        values: Vec<Vec<Literal>>,
        returning: Option<Projection>,
    },
    /// SELECT statement
    Select {
        table: String,
        columns: Projection,
        predicate: Option<Predicate>,
    },
    /// UPDATE statement
    Update {
        table: String,
        /// Assignments in statement order
        set: Vec<(String, Literal)>,
        predicate: Option<Predicate>,
        returning: Option<Projection>,
    },
    /// DELETE statement
    Delete {
        table: String,
        predicate: Option<Predicate>,
        returning: Option<Projection>,
    },
    Commit,
    Rollback,
}

/// ALTER TABLE actions
#[derive(Debug, Clone, PartialEq)]
pub enum AlterOperation {
    RenameTable { new_name: String },
    RenameColumn { old_name: String, new_name: String },
    AddColumn { column: Column },
    DropColumn { name: String },
    AlterColumnType { name: String, datatype: DataType },
}

/// Column list of a SELECT or RETURNING clause
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// `*`
    All,
    Columns(Vec<String>),
}

/// WHERE clause: `column op literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: Comparison,
    pub value: Literal,
}

impl Predicate {
    pub fn new(column: impl Into<String>, op: Comparison, value: impl Into<Literal>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// Comparison operators allowed in a predicate
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}
