//! Structural checks on table metadata: identifiers, duplicates and
//! foreign-key targets.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::error::{Result, SchemaError};
use crate::models::{Field, Table};

#[allow(clippy::unwrap_used)]
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Column every foreign key targets
pub const REFERENCED_KEY: &str = "id";

/// Structural checks run before a [`crate::Schema`] is built
#[derive(Debug, Copy, Clone)]
pub struct SchemaValidator;

impl SchemaValidator {
    /// Validate a table list as a whole
    pub fn validate_tables(tables: &[Table]) -> Result<()> {
        let mut seen = HashSet::new();
        for table in tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }
            Self::validate_table(table)?;
        }

        for table in tables {
            for field in table.foreign_keys() {
                Self::validate_reference(tables, table, field)?;
            }
        }

        Ok(())
    }

    /// Validate one table in isolation
    pub fn validate_table(table: &Table) -> Result<()> {
        Self::validate_identifier(&table.name)?;

        let mut seen = HashSet::new();
        for field in &table.fields {
            Self::validate_identifier(&field.name)?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    table: table.name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.primary_key && field.nullable {
                return Err(SchemaError::NullablePrimaryKey {
                    table: table.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let primary_keys = table.primary_keys().count();
        if primary_keys != 1 {
            warn!(table = %table.name, primary_keys, "Table should declare exactly one primary key");
        }

        Ok(())
    }

    /// Check that a name is a plain SQL identifier
    pub fn validate_identifier(name: &str) -> Result<()> {
        if IDENTIFIER.is_match(name) {
            Ok(())
        } else {
            Err(SchemaError::InvalidIdentifier(name.to_string()))
        }
    }

    fn validate_reference(tables: &[Table], table: &Table, field: &Field) -> Result<()> {
        let Some(referenced) = field.references.as_deref() else {
            return Ok(());
        };

        let target = tables.iter().find(|t| t.name == referenced).ok_or_else(|| {
            SchemaError::UnknownReference {
                table: table.name.clone(),
                field: field.name.clone(),
                referenced: referenced.to_string(),
            }
        })?;

        if target.field(REFERENCED_KEY).is_none() {
            return Err(SchemaError::MissingReferencedKey(target.name.clone()));
        }

        Ok(())
    }
}
