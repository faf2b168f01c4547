//! Byte-level storage: a pluggable key/value engine and the transactional
//! undo-log wrapper the SQL layer writes through.

pub mod engine;
pub mod memory;
pub mod txn;
