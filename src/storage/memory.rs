use std::collections::{HashMap, hash_map};

use crate::{error::Result, storage::engine::{Engine, EngineIterator}};

/// In-memory storage engine backed by a hash map
#[derive(Debug, Default)]
pub struct MemoryEngine {
    data: HashMap<Vec<u8>, Vec<u8>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self { data: HashMap::new() }
    }
}

/// Implements storage Engine trait (byte-level operations)
impl Engine for MemoryEngine {
    type EngineIterator<'a> = MemoryEngineIterator<'a>;

    fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        Ok(self.data.insert(key, value))
    }

    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.get(key).cloned())
    }

    fn delete(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.data.remove(key))
    }

    fn scan(&self) -> Self::EngineIterator<'_> {
        MemoryEngineIterator {
            inner: self.data.iter(),
        }
    }
}

/// In-memory storage engine iterator
pub struct MemoryEngineIterator<'a> {
    inner: hash_map::Iter<'a, Vec<u8>, Vec<u8>>,
}

impl<'a> EngineIterator for MemoryEngineIterator<'a> {}

impl<'a> Iterator for MemoryEngineIterator<'a> {
    type Item = Result<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| Ok((k.clone(), v.clone())))
    }
}
