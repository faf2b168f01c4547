use std::fmt::Display;

use thiserror::Error as ThisError;

/// Custom Result type for peopledb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fieldless classification of an [`Error`], stable for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotNullViolation,
    UniqueViolation,
    NumericOutOfRange,
    InvalidTextRepresentation,
    StringDataRightTruncation,
    TypeMismatch,
    UndefinedColumn,
    UndefinedTable,
    DuplicateColumn,
    DuplicateTable,
    IncompatibleType,
    SyntaxError,
    InvalidTableDefinition,
    TransactionAborted,
    Internal,
}

impl ErrorKind {
    /// PostgreSQL SQLSTATE code of this kind
    pub fn sqlstate(self) -> &'static str {
        match self {
            ErrorKind::NotNullViolation => "23502",
            ErrorKind::UniqueViolation => "23505",
            ErrorKind::NumericOutOfRange => "22003",
            ErrorKind::InvalidTextRepresentation => "22P02",
            ErrorKind::StringDataRightTruncation => "22001",
            ErrorKind::TypeMismatch => "42804",
            ErrorKind::UndefinedColumn => "42703",
            ErrorKind::UndefinedTable => "42P01",
            ErrorKind::DuplicateColumn => "42701",
            ErrorKind::DuplicateTable => "42P07",
            ErrorKind::IncompatibleType => "42846",
            ErrorKind::SyntaxError => "42601",
            ErrorKind::InvalidTableDefinition => "42P16",
            ErrorKind::TransactionAborted => "25P02",
            ErrorKind::Internal => "XX000",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error types for peopledb
///
/// Every failure surfaced by the engine is exactly one of these variants.
/// Messages follow the wording PostgreSQL uses for the same condition.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    #[error("null value in column \"{0}\" violates not-null constraint")]
    NotNullViolation(String),
    #[error("duplicate key value violates unique constraint: key ({column})=({value}) already exists")]
    UniqueViolation { column: String, value: String },
    #[error("{0}")]
    NumericOutOfRange(String),
    #[error("invalid input syntax for type {datatype}: \"{input}\"")]
    InvalidTextRepresentation { datatype: String, input: String },
    #[error("value too long for type {0}")]
    StringDataRightTruncation(String),
    #[error("{0}")]
    TypeMismatch(String),
    #[error("column \"{0}\" does not exist")]
    UndefinedColumn(String),
    #[error("relation \"{0}\" does not exist")]
    UndefinedTable(String),
    #[error("column \"{0}\" already exists")]
    DuplicateColumn(String),
    #[error("relation \"{0}\" already exists")]
    DuplicateTable(String),
    #[error("column \"{column}\" cannot be cast to type {datatype}: {reason}")]
    IncompatibleType {
        column: String,
        datatype: String,
        reason: String,
    },
    #[error("syntax error: {0}")]
    SyntaxError(String),
    #[error("invalid table definition: {0}")]
    InvalidTableDefinition(String),
    #[error("current transaction is aborted, commands ignored until end of transaction block")]
    TransactionAborted,
    /// Encoding failures and broken internal invariants
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotNullViolation(_) => ErrorKind::NotNullViolation,
            Error::UniqueViolation { .. } => ErrorKind::UniqueViolation,
            Error::NumericOutOfRange(_) => ErrorKind::NumericOutOfRange,
            Error::InvalidTextRepresentation { .. } => ErrorKind::InvalidTextRepresentation,
            Error::StringDataRightTruncation(_) => ErrorKind::StringDataRightTruncation,
            Error::TypeMismatch(_) => ErrorKind::TypeMismatch,
            Error::UndefinedColumn(_) => ErrorKind::UndefinedColumn,
            Error::UndefinedTable(_) => ErrorKind::UndefinedTable,
            Error::DuplicateColumn(_) => ErrorKind::DuplicateColumn,
            Error::DuplicateTable(_) => ErrorKind::DuplicateTable,
            Error::IncompatibleType { .. } => ErrorKind::IncompatibleType,
            Error::SyntaxError(_) => ErrorKind::SyntaxError,
            Error::InvalidTableDefinition(_) => ErrorKind::InvalidTableDefinition,
            Error::TransactionAborted => ErrorKind::TransactionAborted,
            Error::Internal(_) => ErrorKind::Internal,
        }
    }

    /// PostgreSQL SQLSTATE code, e.g. `23505` for a unique violation
    pub fn sqlstate(&self) -> &'static str {
        self.kind().sqlstate()
    }
}

impl From<bincode::Error> for Error {
    fn from(value: bincode::Error) -> Self {
        Error::Internal(value.to_string())
    }
}
