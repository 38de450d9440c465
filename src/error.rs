//! Error types for the schemagen library.
//!
//! This module provides custom error types using `thiserror` so schema
//! validation, rendering, file output and database application each report a
//! specific failure instead of producing malformed output.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::FieldType;

/// Errors that can occur while building, rendering or applying a schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A table or field name is not a plain SQL identifier
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// Two tables share a name
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),

    /// Two fields in one table share a name
    #[error("Duplicate field {field} in table {table}")]
    DuplicateField {
        /// Table holding the duplicate
        table: String,
        /// Repeated field name
        field: String,
    },

    /// A foreign-key field name does not follow `<table>_id`
    #[error("Invalid foreign key field name: {0:?} (expected <table>_<column>)")]
    InvalidForeignKey(String),

    /// A foreign key points at a table that is not part of the schema
    #[error("Field {table}.{field} references unknown table {referenced}")]
    UnknownReference {
        /// Table holding the foreign key
        table: String,
        /// Foreign-key field
        field: String,
        /// Missing target table
        referenced: String,
    },

    /// A referenced table has no `id` column for the foreign key to target
    #[error("Table {0} is referenced by a foreign key but has no id column")]
    MissingReferencedKey(String),

    /// A table is missing from the schema or has no registered row decoder
    #[error("Unknown table: {0}")]
    UnknownTable(String),

    /// A primary key was declared nullable
    #[error("Primary key {table}.{field} cannot be nullable")]
    NullablePrimaryKey {
        /// Table holding the key
        table: String,
        /// Primary-key field
        field: String,
    },

    /// A target language has no spelling for a primitive field type
    #[error("Unsupported type {field_type} for {dialect}")]
    UnsupportedType {
        /// The unmapped source type
        field_type: FieldType,
        /// Name of the target dialect
        dialect: &'static str,
    },

    /// Writing a generated file failed
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Target file
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SchemaError {
    /// Short, stable label used for metrics and structured logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidIdentifier(_)
            | Self::DuplicateTable(_)
            | Self::DuplicateField { .. }
            | Self::InvalidForeignKey(_)
            | Self::UnknownReference { .. }
            | Self::MissingReferencedKey(_)
            | Self::NullablePrimaryKey { .. } => "validation",
            Self::UnknownTable(_) => "unknown_table",
            Self::UnsupportedType { .. } => "unsupported_type",
            Self::Write { .. } | Self::Io(_) => "io",
            Self::Database(_) => "database",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for Result with `SchemaError`
pub type Result<T> = std::result::Result<T, SchemaError>;
