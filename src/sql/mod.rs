//! SQL processing module
//!
//! This module provides:
//! - `parser`: SQL lexer and parser
//! - `types`: SQL data types and literal coercion
//! - `schema`: Table and column schema definitions (the catalog)
//! - `validate`: Constraint checks for candidate rows
//! - `plan`: Execution plan generation
//! - `executor`: Query, mutation and DDL execution
//! - `engine`: Transactions and the session state machine

pub mod parser;
pub mod types;
pub mod schema;
pub mod validate;
pub mod plan;
pub mod executor;
pub mod engine;
