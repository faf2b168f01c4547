use crate::error::Result;

/// Abstract storage engine interface (byte-level operations)
///
/// Different from sql::engine::Engine which operates on tables. Point
/// operations are expected to be O(1); scans visit every entry in no
/// particular order.
pub trait Engine {
    type EngineIterator<'a>: EngineIterator
    where
        Self: 'a;

    /// Stores a value and returns the one it replaced, if any
    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<Option<Vec<u8>>>;
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    /// Removes a key and returns its value, if any
    fn delete(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>>;
    fn scan(&self) -> Self::EngineIterator<'_>;

    /// Visits every entry whose key starts with `prefix`
    fn scan_prefix(
        &self,
        prefix: Vec<u8>,
    ) -> impl Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> + '_ {
        self.scan().filter(move |item| match item {
            Ok((key, _)) => key.starts_with(&prefix),
            Err(_) => true,
        })
    }
}

/// Storage engine iterator trait
pub trait EngineIterator: Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> {}
