//! Foreign-language record declarations
//!
//! A [`TypeDialect`] describes how a target language spells primitive types,
//! field declarations and records. The default methods fold a table's fields
//! through those hooks, so adding a language means filling in the syntax only.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::models::{Field, FieldType, Table};
use crate::schema::Schema;

/// Syntax of a target description language
pub trait TypeDialect: Sync {
    /// Human-readable language name
    fn name(&self) -> &'static str;

    /// Extension for generated files, without the dot
    fn file_extension(&self) -> &'static str;

    /// Spelling of each supported primitive type
    fn primitive_types(&self) -> &'static [(FieldType, &'static str)];

    /// Token between a field name and its type
    fn field_separator(&self) -> &'static str;

    /// Block comment containing `text`
    fn comment(&self, text: &str) -> String;

    /// First lines of a generated module, newline-terminated
    fn module_header(&self, module_name: &str) -> String;

    /// Wrap rendered field declarations in a record declaration
    fn record_block(&self, type_name: &str, field_decls: &[String]) -> String;

    /// Translate a primitive type. Unmapped types are an error.
    fn map_primitive_type(&self, field_type: FieldType) -> Result<&'static str> {
        self.primitive_types()
            .iter()
            .find(|(ty, _)| *ty == field_type)
            .map(|(_, spelling)| *spelling)
            .ok_or_else(|| SchemaError::UnsupportedType {
                field_type,
                dialect: self.name(),
            })
    }

    /// Render `<name> <separator> <type>`
    fn render_field_decl(&self, field: &Field) -> Result<String> {
        let ty = self.map_primitive_type(field.field_type)?;
        Ok(format!("{} {} {ty}", field.name, self.field_separator()))
    }

    /// Render the commented record declaration for one table
    fn render_table_decl(&self, table: &Table) -> Result<String> {
        let decls = table
            .fields
            .iter()
            .map(|f| self.render_field_decl(f))
            .collect::<Result<Vec<_>>>()?;
        let comment = self.comment(&format!("Generated from the {} table of the schema model", table.name));
        Ok(format!("{comment}\n{}", self.record_block(&table.name, &decls)))
    }
}

/// Elm type aliases for a front-end
#[derive(Debug, Clone, Copy, Default)]
pub struct Elm;

impl TypeDialect for Elm {
    fn name(&self) -> &'static str {
        "Elm"
    }

    fn file_extension(&self) -> &'static str {
        "elm"
    }

    fn primitive_types(&self) -> &'static [(FieldType, &'static str)] {
        &[(FieldType::Integer, "Int"), (FieldType::Text, "String")]
    }

    fn field_separator(&self) -> &'static str {
        ":"
    }

    fn comment(&self, text: &str) -> String {
        format!("{{- {text} -}}")
    }

    fn module_header(&self, module_name: &str) -> String {
        format!("module {module_name} exposing (..)\n")
    }

    fn record_block(&self, type_name: &str, field_decls: &[String]) -> String {
        format!("type alias {type_name} =\n{}", braced_fields("    ", field_decls))
    }
}

/// Haskell record data types for a back-end
#[derive(Debug, Clone, Copy, Default)]
pub struct Haskell;

impl TypeDialect for Haskell {
    fn name(&self) -> &'static str {
        "Haskell"
    }

    fn file_extension(&self) -> &'static str {
        "hs"
    }

    fn primitive_types(&self) -> &'static [(FieldType, &'static str)] {
        &[(FieldType::Integer, "Integer"), (FieldType::Text, "String")]
    }

    fn field_separator(&self) -> &'static str {
        "::"
    }

    fn comment(&self, text: &str) -> String {
        format!("{{- {text} -}}")
    }

    // Every table has `id` and several share `name`.
    fn module_header(&self, module_name: &str) -> String {
        format!("{{-# LANGUAGE DuplicateRecordFields #-}}\nmodule {module_name} where\n")
    }

    fn record_block(&self, type_name: &str, field_decls: &[String]) -> String {
        if field_decls.is_empty() {
            return format!("data {type_name} = {type_name}\n");
        }
        format!("data {type_name} = {type_name}\n{}", braced_fields("  ", field_decls))
    }
}

/// Multi-line record body in leading-comma style
fn braced_fields(indent: &str, field_decls: &[String]) -> String {
    if field_decls.is_empty() {
        return format!("{indent}{{}}\n");
    }
    let mut out = String::new();
    for (i, decl) in field_decls.iter().enumerate() {
        let lead = if i == 0 { '{' } else { ',' };
        out.push_str(&format!("{indent}{lead} {decl}\n"));
    }
    out.push_str(&format!("{indent}}}\n"));
    out
}

/// Target languages selectable from configuration and the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Elm type aliases
    Elm,
    /// Haskell data declarations
    Haskell,
}

impl Language {
    /// Every supported language
    pub const ALL: [Self; 2] = [Self::Elm, Self::Haskell];

    /// Dialect implementing this language's syntax
    #[must_use]
    pub fn dialect(self) -> &'static dyn TypeDialect {
        match self {
            Self::Elm => &Elm,
            Self::Haskell => &Haskell,
        }
    }
}

/// Render a whole module: header, then one declaration per table in schema order
pub fn render_module(dialect: &dyn TypeDialect, schema: &Schema, module_name: &str) -> Result<String> {
    let mut out = dialect.module_header(module_name);
    for table in schema.tables() {
        out.push('\n');
        out.push_str(&dialect.render_table_decl(table)?);
    }
    Ok(out)
}
