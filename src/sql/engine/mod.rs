use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    sql::{
        executor::ResultSet,
        parser::{Parser, ast::Statement},
        plan::{Filter, Plan},
        schema::Table,
        types::{Row, Value, coerce::Literal},
    },
    storage::txn::Savepoint,
};

mod kv;

pub use kv::{KVEngine, KVTransaction};

/// SQL engine trait
pub trait Engine: Sized {
    type Transaction: Transaction + 'static;

    /// Opens the single long-lived transaction of a connection
    fn begin(self) -> Result<Self::Transaction>;

    fn session(self) -> Result<Session<Self>> {
        Ok(Session::new(self.begin()?))
    }
}

/// SQL transaction trait (DDL and DML operations)
///
/// One transaction holds at most one table. Row writes are not validated
/// here; callers run the constraint validator first.
pub trait Transaction {
    fn commit(&mut self) -> Result<()>;
    fn rollback(&mut self) -> Result<()>;
    fn savepoint(&self) -> Savepoint;
    /// Undoes every write made after the savepoint
    fn rollback_to(&mut self, savepoint: Savepoint) -> Result<()>;

    /// Stores a row under its primary key, replacing any row already there
    fn create_row(&mut self, table: &Table, row: Row) -> Result<Value>;
    /// Deletes a row by primary key
    fn delete_row(&mut self, table: &Table, key: &Value) -> Result<()>;
    fn get_row(&self, table: &Table, key: &Value) -> Result<Option<Row>>;
    /// Scans table with optional filter
    fn scan_table(&self, table: &Table, filter: Option<&Filter>) -> Result<Vec<Row>>;

    // DDL operations
    fn create_table(&mut self, table: Table) -> Result<()>;
    /// Removes the table and every row in it
    fn drop_table(&mut self, table: &Table) -> Result<()>;
    /// Replaces the stored table definition
    fn save_table(&mut self, table: &Table) -> Result<()>;
    fn get_table(&self) -> Result<Option<Table>>;
    /// Returns table info, returns error if no table of that name exists
    fn must_get_table(&self, table_name: &str) -> Result<Table> {
        let table = self
            .get_table()?
            .ok_or_else(|| Error::UndefinedTable(table_name.to_string()))?;
        table.must_match(table_name)?;
        Ok(table)
    }
}

/// Transaction state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    Active,
    /// A statement failed; only COMMIT or ROLLBACK are accepted
    Aborted,
}

/// SQL session for executing statements
///
/// Statements run inside one implicit transaction that lasts until
/// `commit` or `rollback`. A failing statement leaves no trace and moves
/// the session to [`TransactionState::Aborted`].
pub struct Session<E: Engine> {
    txn: E::Transaction,
    state: TransactionState,
}

impl<E: Engine> Session<E> {
    pub fn new(txn: E::Transaction) -> Self {
        Self {
            txn,
            state: TransactionState::Active,
        }
    }

    pub fn state(&self) -> TransactionState {
        self.state
    }

    /// Executes a statement atomically
    pub fn execute(&mut self, stmt: Statement) -> Result<ResultSet> {
        match stmt {
            Statement::Commit => {
                self.commit()?;
                return Ok(ResultSet::Commit);
            }
            Statement::Rollback => {
                self.rollback()?;
                return Ok(ResultSet::Rollback);
            }
            _ => {}
        }
        if self.state == TransactionState::Aborted {
            return Err(Error::TransactionAborted);
        }

        debug!(?stmt, "executing statement");
        let savepoint = self.txn.savepoint();
        match Plan::build(stmt).and_then(|plan| plan.execute(&mut self.txn)) {
            Ok(result) => Ok(result),
            Err(err) => {
                self.txn.rollback_to(savepoint)?;
                self.abort(&err);
                Err(err)
            }
        }
    }

    /// Parses and executes a SQL statement, binding `$n` to `params[n - 1]`
    pub fn execute_sql(&mut self, sql: &str, params: &[Literal]) -> Result<ResultSet> {
        match Parser::new(sql).with_params(params).parse() {
            Ok(stmt) => self.execute(stmt),
            Err(err) => {
                self.abort(&err);
                Err(err)
            }
        }
    }

    /// Persists pending changes; an aborted transaction is rolled back instead
    pub fn commit(&mut self) -> Result<()> {
        match self.state {
            TransactionState::Active => {
                self.txn.commit()?;
                info!("transaction committed");
            }
            TransactionState::Aborted => {
                self.txn.rollback()?;
                self.state = TransactionState::Active;
                warn!("commit of an aborted transaction performed a rollback");
            }
        }
        Ok(())
    }

    /// Discards pending changes
    pub fn rollback(&mut self) -> Result<()> {
        self.txn.rollback()?;
        self.state = TransactionState::Active;
        info!("transaction rolled back");
        Ok(())
    }

    fn abort(&mut self, err: &Error) {
        if self.state == TransactionState::Active {
            warn!(sqlstate = err.sqlstate(), %err, "statement failed, transaction aborted");
            self.state = TransactionState::Aborted;
        }
    }
}
