//! Database schema definitions
//!
//! [`Schema`] is the validated, read-only table collection every renderer
//! borrows. [`app_schema`] builds the application's fixed tables.

use serde::Serialize;

use crate::error::Result;
use crate::models::{Field, FieldType, Table, TableId};
use crate::validation::SchemaValidator;

/// Validated, ordered collection of tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    tables: Vec<Table>,
}

impl Schema {
    /// Validate `tables` and wrap them. Table order is creation order.
    pub fn new(tables: Vec<Table>) -> Result<Self> {
        SchemaValidator::validate_tables(&tables)?;
        Ok(Self { tables })
    }

    /// Tables in schema order
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Look up a table by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Look up one of the known application tables
    #[must_use]
    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.get(id.name())
    }

    /// Number of tables
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if the schema has no tables
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Serialize the metadata as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Build the application schema: `User`, `Thread` and `ThreadMessage`.
pub fn app_schema() -> Result<Schema> {
    Schema::new(TableId::ALL.iter().map(|&id| app_table(id)).collect())
}

fn app_table(id: TableId) -> Table {
    let id_field = Field::new("id", FieldType::Integer).primary_key();
    let fields = match id {
        TableId::User => vec![
            id_field,
            Field::new("name", FieldType::Text).unique(),
            Field::new("email", FieldType::Text).unique(),
            Field::new("password", FieldType::Text),
        ],
        TableId::Thread => vec![
            id_field,
            Field::new("name", FieldType::Text).unique(),
            Field::new("creator_id", FieldType::Integer).references(TableId::User.name()),
        ],
        TableId::ThreadMessage => vec![
            id_field,
            Field::new("thread_id", FieldType::Integer).references(TableId::Thread.name()),
            Field::new("user_id", FieldType::Integer).references(TableId::User.name()),
            Field::new("content", FieldType::Text),
        ],
    };
    Table::new(id.name(), fields)
}
