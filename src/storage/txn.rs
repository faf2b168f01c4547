use crate::{error::Result, storage::engine::Engine};

/// Position in the undo log; rolling back to it undoes every later write
pub type Savepoint = usize;

/// Undo record: the key written and what it held before
#[derive(Debug)]
struct UndoRecord {
    key: Vec<u8>,
    previous: Option<Vec<u8>>,
}

/// Transactional wrapper over a storage engine
///
/// Writes go straight to the engine and are remembered in an undo log.
/// `commit` forgets the log, `rollback` replays it backwards. A connection
/// has exactly one open transaction at a time, so no isolation is needed.
pub struct TxnStore<E: Engine> {
    engine: E,
    undo: Vec<UndoRecord>,
}

impl<E: Engine> TxnStore<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            undo: Vec::new(),
        }
    }

    pub fn set(&mut self, key: Vec<u8>, value: Vec<u8>) -> Result<()> {
        let previous = self.engine.set(key.clone(), value)?;
        self.undo.push(UndoRecord { key, previous });
        Ok(())
    }

    pub fn delete(&mut self, key: &[u8]) -> Result<()> {
        if let Some(previous) = self.engine.delete(key)? {
            self.undo.push(UndoRecord {
                key: key.to_vec(),
                previous: Some(previous),
            });
        }
        Ok(())
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.engine.get(key)
    }

    /// Scans keys with prefix
    pub fn scan_prefix(&self, prefix: Vec<u8>) -> impl Iterator<Item = Result<ScanResult>> + '_ {
        self.engine
            .scan_prefix(prefix)
            .map(|item| item.map(|(key, value)| ScanResult { key, value }))
    }

    /// Number of writes not yet committed
    pub fn pending(&self) -> usize {
        self.undo.len()
    }

    pub fn savepoint(&self) -> Savepoint {
        self.undo.len()
    }

    /// Undoes every write made after the savepoint, newest first
    pub fn rollback_to(&mut self, savepoint: Savepoint) -> Result<()> {
        while self.undo.len() > savepoint {
            let Some(record) = self.undo.pop() else {
                break;
            };
            match record.previous {
                Some(value) => self.engine.set(record.key, value)?,
                None => self.engine.delete(&record.key)?,
            };
        }
        Ok(())
    }

    /// Makes all pending writes permanent
    pub fn commit(&mut self) -> Result<()> {
        self.undo.clear();
        Ok(())
    }

    /// Discards all pending writes
    pub fn rollback(&mut self) -> Result<()> {
        self.rollback_to(0)
    }
}

/// Scan result containing key-value pair
#[derive(Debug, PartialEq)]
pub struct ScanResult {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}
