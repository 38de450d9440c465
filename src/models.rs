//! Data models for the declarative schema
//!
//! This module contains the field/table metadata that every renderer reads:
//! primitive field types, fields, tables and the identifiers of the known
//! application tables.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SchemaError};

/// Primitive column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    /// Signed integer column
    Integer,
    /// UTF-8 text column
    Text,
}

impl FieldType {
    /// Every primitive type, in declaration order
    pub const ALL: [Self; 2] = [Self::Integer, Self::Text];

    /// SQL spelling of this type
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Metadata for one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Column name
    pub name: String,
    /// Primitive type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// True for the table's primary key
    pub primary_key: bool,
    /// True if the column accepts NULL
    pub nullable: bool,
    /// True if the column carries a UNIQUE constraint
    pub unique: bool,
    /// Table this column points at, for foreign keys
    pub references: Option<String>,
}

impl Field {
    /// Create a plain, non-nullable column
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            primary_key: false,
            nullable: false,
            unique: false,
            references: None,
        }
    }

    /// Create a foreign-key column whose target table is derived from its
    /// name, e.g. `thread_id` references `Thread`.
    pub fn foreign_key_by_convention(name: impl Into<String>, field_type: FieldType) -> Result<Self> {
        let name = name.into();
        let referenced = referenced_table_from_name(&name)?;
        Ok(Self::new(name, field_type).references(referenced))
    }

    /// Mark as primary key. Primary keys are never nullable.
    #[must_use]
    pub const fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    /// Allow NULL values
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Add a UNIQUE constraint
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Point this column at another table's `id`
    #[must_use]
    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.references = Some(table.into());
        self
    }

    /// True when the column is a foreign key
    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        self.references.is_some()
    }
}

/// Derive a referenced table name from a foreign-key field name.
///
/// Takes the part before the first `_` and title-cases it: `thread_id`
/// becomes `Thread`. Multi-word table names cannot be expressed this way,
/// which is why [`Field::references`] is the attribute renderers read.
pub fn referenced_table_from_name(field_name: &str) -> Result<String> {
    match field_name.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => Ok(title_case(prefix)),
        _ => Err(SchemaError::InvalidForeignKey(field_name.to_string())),
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Ordered column list under a table name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// Table name
    pub name: String,
    /// Columns in declaration order
    pub fields: Vec<Field>,
}

impl Table {
    /// Create a table from its columns
    #[must_use]
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self { name: name.into(), fields }
    }

    /// Look up a column by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Primary-key columns, normally exactly one
    pub fn primary_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.primary_key)
    }

    /// Foreign-key columns in declaration order
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_foreign_key())
    }
}

/// Identifier of a table in the application schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TableId {
    /// Registered users
    User,
    /// Discussion threads
    Thread,
    /// Messages posted to a thread
    ThreadMessage,
}

impl TableId {
    /// All known tables in creation order
    pub const ALL: [Self; 3] = [Self::User, Self::Thread, Self::ThreadMessage];

    /// Table name used in SQL and generated declarations
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Thread => "Thread",
            Self::ThreadMessage => "ThreadMessage",
        }
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
