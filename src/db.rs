//! Applying rendered DDL to SQLite, plus seeding and reading records back.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use rusqlite::{params_from_iter, Connection};
use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::models::TableId;
use crate::records::{Record, RecordCodecs};
use crate::schema::Schema;
use crate::sql::{render_insert, render_schema, render_select_all};

/// SQLite database that generated DDL is applied to
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Self::configure(Connection::open(path)?)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Self::configure(Connection::open_in_memory()?)
    }

    /// Delete any existing file at `path`, then open a fresh database there
    pub fn recreate(path: &Path) -> Result<Self> {
        match fs::remove_file(path) {
            Ok(()) => info!(path = %path.display(), "Removed existing database"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Self::open(path)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Execute the `CREATE TABLE` script of every table, in schema order
    ///
    /// # Returns
    ///
    /// Number of scripts executed
    pub fn apply_schema(&self, schema: &Schema) -> Result<usize> {
        let scripts = render_schema(schema);
        for script in &scripts {
            debug!(%script, "Executing DDL");
            self.conn.execute_batch(script)?;
        }
        info!(tables = scripts.len(), "Schema applied");
        Ok(scripts.len())
    }

    /// Insert one record into its table
    pub fn insert(&self, schema: &Schema, record: &Record) -> Result<()> {
        let table = lookup(schema, record.table_id())?;
        self.conn
            .execute(&render_insert(table), params_from_iter(record.values()))?;
        Ok(())
    }

    /// Insert every record in a single transaction
    pub fn seed(&self, schema: &Schema, records: &[Record]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        for record in records {
            self.insert(schema, record)?;
        }
        tx.commit()?;
        info!(records = records.len(), "Seeded database");
        Ok(records.len())
    }

    /// Read every row of `table`, decoded with the registered codec
    pub fn select_all(&self, schema: &Schema, codecs: &RecordCodecs, table: TableId) -> Result<Vec<Record>> {
        let definition = lookup(schema, table)?;
        let decode = codecs
            .decoder(table)
            .ok_or_else(|| SchemaError::UnknownTable(table.name().to_string()))?;

        let mut stmt = self.conn.prepare(&render_select_all(definition))?;
        let rows = stmt.query_map([], decode)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Names of the tables present in the database, sorted
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )?;
        let names = stmt.query_map([], |row| row.get(0))?;
        Ok(names.collect::<rusqlite::Result<Vec<String>>>()?)
    }
}

fn lookup(schema: &Schema, table: TableId) -> Result<&crate::models::Table> {
    schema
        .table(table)
        .ok_or_else(|| SchemaError::UnknownTable(table.name().to_string()))
}
