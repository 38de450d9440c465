//! SQL DDL rendering
//!
//! Pure functions that turn schema metadata into SQLite statements. Every
//! `CREATE TABLE` string is a complete script that can be executed on its own.

use crate::models::{Field, Table};
use crate::schema::Schema;
use crate::validation::REFERENCED_KEY;

/// Render one column definition: `name TYPE [PRIMARY KEY] [NOT NULL] [UNIQUE]`
#[must_use]
pub fn render_field(field: &Field) -> String {
    let mut parts = vec![field.name.as_str(), field.field_type.as_sql()];
    if field.primary_key {
        parts.push("PRIMARY KEY");
    }
    if !field.nullable {
        parts.push("NOT NULL");
    }
    if field.unique {
        parts.push("UNIQUE");
    }
    parts.join(" ")
}

/// Render `FOREIGN KEY (<field>) REFERENCES <table> (id)`
#[must_use]
pub fn render_foreign_key_clause(field_name: &str, referenced_table: &str) -> String {
    format!("FOREIGN KEY ({field_name}) REFERENCES {referenced_table} ({REFERENCED_KEY})")
}

/// Render the `CREATE TABLE IF NOT EXISTS` statement for a table.
///
/// Foreign-key clauses follow the column list in field order.
#[must_use]
pub fn render_table(table: &Table) -> String {
    let columns = table.fields.iter().map(render_field);
    let foreign_keys = table.fields.iter().filter_map(|f| {
        f.references
            .as_deref()
            .map(|referenced| render_foreign_key_clause(&f.name, referenced))
    });
    let body = columns.chain(foreign_keys).collect::<Vec<_>>().join(", ");

    format!("CREATE TABLE IF NOT EXISTS {} ( {body} );", table.name)
}

/// Render every table, in schema order
#[must_use]
pub fn render_schema(schema: &Schema) -> Vec<String> {
    schema.tables().iter().map(render_table).collect()
}

/// Render a positional insert covering every column
#[must_use]
pub fn render_insert(table: &Table) -> String {
    let columns = column_list(table);
    let placeholders = vec!["?"; table.fields.len()].join(", ");
    format!("INSERT INTO {} ({columns}) VALUES ({placeholders});", table.name)
}

/// Render a select of every column, ordered by primary key when one exists
#[must_use]
pub fn render_select_all(table: &Table) -> String {
    let columns = column_list(table);
    match table.primary_keys().next() {
        Some(pk) => format!("SELECT {columns} FROM {} ORDER BY {};", table.name, pk.name),
        None => format!("SELECT {columns} FROM {};", table.name),
    }
}

fn column_list(table: &Table) -> String {
    table
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldType;

    #[test]
    fn test_render_field_token_order() {
        let field = Field::new("code", FieldType::Text).primary_key().unique();
        assert_eq!(render_field(&field), "code TEXT PRIMARY KEY NOT NULL UNIQUE");
    }

    #[test]
    fn test_render_nullable_field() {
        let field = Field::new("bio", FieldType::Text).nullable();
        assert_eq!(render_field(&field), "bio TEXT");
    }

    #[test]
    fn test_render_table_without_foreign_keys() {
        let table = Table::new("Tag", vec![Field::new("id", FieldType::Integer).primary_key()]);
        assert_eq!(
            render_table(&table),
            "CREATE TABLE IF NOT EXISTS Tag ( id INTEGER PRIMARY KEY NOT NULL );"
        );
    }

    #[test]
    fn test_render_select_without_primary_key() {
        let table = Table::new("Log", vec![Field::new("line", FieldType::Text)]);
        assert_eq!(render_select_all(&table), "SELECT line FROM Log;");
    }
}
