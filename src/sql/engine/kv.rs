use serde::Serialize;
use tracing::debug;

use crate::{
    error::{Error, Result},
    sql::{
        plan::Filter,
        schema::Table,
        types::{Row, Value},
    },
    storage::{
        engine::Engine as StorageEngine,
        txn::{Savepoint, TxnStore},
    },
};

use super::{Engine, Transaction};

/// Key-value store backed SQL engine
pub struct KVEngine<E: StorageEngine> {
    pub kv: TxnStore<E>,
}

impl<E: StorageEngine> KVEngine<E> {
    pub fn new(engine: E) -> Self {
        Self {
            kv: TxnStore::new(engine),
        }
    }
}

impl<E: StorageEngine + 'static> Engine for KVEngine<E> {
    type Transaction = KVTransaction<E>;

    fn begin(self) -> Result<Self::Transaction> {
        Ok(KVTransaction::new(self.kv))
    }
}

/// Key-value transaction (wrapper around the undo-logged store)
pub struct KVTransaction<E: StorageEngine> {
    txn: TxnStore<E>,
}

impl<E: StorageEngine> KVTransaction<E> {
    pub fn new(txn: TxnStore<E>) -> Self {
        Self { txn }
    }

    fn decode_row(bytes: &[u8]) -> Result<Row> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl<E: StorageEngine> Transaction for KVTransaction<E> {
    fn commit(&mut self) -> Result<()> {
        self.txn.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.txn.rollback()
    }

    fn savepoint(&self) -> Savepoint {
        self.txn.savepoint()
    }

    fn rollback_to(&mut self, savepoint: Savepoint) -> Result<()> {
        self.txn.rollback_to(savepoint)
    }

    fn create_row(&mut self, table: &Table, row: Row) -> Result<Value> {
        if row.len() != table.columns.len() {
            return Err(Error::Internal(format!(
                "row has {} values, table {} has {} columns",
                row.len(),
                table.name,
                table.columns.len()
            )));
        }
        // Store row data: key = primary key value, value = serialized row
        let pk = table.get_primary_key(&row)?;
        debug!(table = %table.name, key = %pk, "writing row");
        let key = Key::Row(&pk).encode()?;
        self.txn.set(key, bincode::serialize(&row)?)?;
        Ok(pk)
    }

    fn delete_row(&mut self, table: &Table, key: &Value) -> Result<()> {
        debug!(table = %table.name, %key, "deleting row");
        self.txn.delete(&Key::Row(key).encode()?)
    }

    fn get_row(&self, _table: &Table, key: &Value) -> Result<Option<Row>> {
        self.txn
            .get(&Key::Row(key).encode()?)?
            .map(|v| Self::decode_row(&v))
            .transpose()
    }

    fn scan_table(&self, table: &Table, filter: Option<&Filter>) -> Result<Vec<Row>> {
        // Equality on the primary key is a point lookup
        if let Some(key) = filter.and_then(|f| f.point_key(table)) {
            return Ok(self
                .get_row(table, key)?
                .filter(|row| filter.is_none_or(|f| f.matches(row)))
                .into_iter()
                .collect());
        }

        // Use prefix scan to find all rows
        let prefix = bincode::serialize(&KeyPrefix::Row)?;
        let mut rows = Vec::new();
        for result in self.txn.scan_prefix(prefix) {
            let row = Self::decode_row(&result?.value)?;
            if filter.is_none_or(|f| f.matches(&row)) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    fn create_table(&mut self, table: Table) -> Result<()> {
        if let Some(existing) = self.get_table()? {
            return Err(Error::DuplicateTable(existing.name));
        }
        self.save_table(&table)
    }

    fn drop_table(&mut self, table: &Table) -> Result<()> {
        let prefix = bincode::serialize(&KeyPrefix::Row)?;
        let keys = self
            .txn
            .scan_prefix(prefix)
            .map(|result| result.map(|r| r.key))
            .collect::<Result<Vec<_>>>()?;
        debug!(table = %table.name, rows = keys.len(), "dropping table");
        for key in keys {
            self.txn.delete(&key)?;
        }
        self.txn.delete(&Key::Table.encode()?)
    }

    fn save_table(&mut self, table: &Table) -> Result<()> {
        // Store table schema: key = table marker, value = serialized table schema
        self.txn.set(Key::Table.encode()?, bincode::serialize(table)?)
    }

    fn get_table(&self) -> Result<Option<Table>> {
        Ok(self
            .txn
            .get(&Key::Table.encode()?)?
            .map(|v| bincode::deserialize(&v))
            .transpose()?)
    }
}

/// Key types for KV storage operations
#[derive(Debug, Serialize)]
enum Key<'a> {
    /// The catalog entry of the one table
    Table,
    /// A row addressed by its primary-key value
    Row(&'a Value),
}

impl Key<'_> {
    fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }
}

/// Key prefix types for prefix scanning
///
/// In bincode, enums are serialized as [variant_index][variant_data...].
/// Variant indices start from 0 in definition order and must line up with `Key`.
#[derive(Debug, Serialize)]
enum KeyPrefix {
    #[allow(dead_code)]
    Table,
    Row,
}
