//! peopledb - A single-table relational storage engine
//!
//! This crate provides:
//! - A one-table catalog with ALTER TABLE support
//! - Coercion of loosely typed input into typed column values
//! - Constraint validation (NOT NULL, VARCHAR length, primary key)
//! - A hashed row store with statement-level atomicity
//! - A PostgreSQL-flavoured SQL front end and error codes

pub mod error;
pub mod sql;
pub mod storage;
