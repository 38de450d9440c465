//! Tests for the Elm and Haskell declaration renderers

use std::fs;

use schemagen::file_writer::write_schema_to_file;
use schemagen::typegen::{render_module, Elm, Haskell};
use schemagen::{app_schema, Field, FieldType, Language, SchemaError, Table, TableId, TypeDialect};
use tempfile::tempdir;

/// Dialect that only knows integers
struct IntegersOnly;

impl TypeDialect for IntegersOnly {
    fn name(&self) -> &'static str {
        "IntegersOnly"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn primitive_types(&self) -> &'static [(FieldType, &'static str)] {
        &[(FieldType::Integer, "int")]
    }

    fn field_separator(&self) -> &'static str {
        "="
    }

    fn comment(&self, text: &str) -> String {
        format!("# {text}")
    }

    fn module_header(&self, module_name: &str) -> String {
        format!("[{module_name}]\n")
    }

    fn record_block(&self, type_name: &str, field_decls: &[String]) -> String {
        format!("{type_name}: {}\n", field_decls.join("; "))
    }
}

#[test]
fn test_elm_primitive_types() {
    assert_eq!(Elm.map_primitive_type(FieldType::Integer).expect("int"), "Int");
    assert_eq!(Elm.map_primitive_type(FieldType::Text).expect("text"), "String");
}

#[test]
fn test_haskell_primitive_types() {
    assert_eq!(Haskell.map_primitive_type(FieldType::Integer).expect("int"), "Integer");
    assert_eq!(Haskell.map_primitive_type(FieldType::Text).expect("text"), "String");
}

#[test]
fn test_every_integer_field_uses_integer_spelling() {
    let schema = app_schema().expect("schema");

    for lang in Language::ALL {
        let dialect = lang.dialect();
        let int_spelling = dialect.map_primitive_type(FieldType::Integer).expect("int");
        for table in schema.tables() {
            for field in table.fields.iter().filter(|f| f.field_type == FieldType::Integer) {
                let decl = dialect.render_field_decl(field).expect("decl");
                assert!(decl.ends_with(&format!(" {int_spelling}")), "{decl}");
            }
        }
    }
}

#[test]
fn test_unmapped_type_is_an_error() {
    let field = Field::new("label", FieldType::Text);
    let err = IntegersOnly.render_field_decl(&field).expect_err("text is unmapped");

    assert!(matches!(
        err,
        SchemaError::UnsupportedType { field_type: FieldType::Text, dialect: "IntegersOnly" }
    ));
}

#[test]
fn test_elm_table_decl() {
    let schema = app_schema().expect("schema");
    let decl = Elm.render_table_decl(schema.table(TableId::Thread).expect("thread")).expect("decl");

    assert_eq!(
        decl,
        "{- Generated from the Thread table of the schema model -}\n\
         type alias Thread =\n    \
         { id : Int\n    \
         , name : String\n    \
         , creator_id : Int\n    \
         }\n"
    );
}

#[test]
fn test_haskell_table_decl() {
    let schema = app_schema().expect("schema");
    let decl = Haskell.render_table_decl(schema.table(TableId::User).expect("user")).expect("decl");

    assert_eq!(
        decl,
        "{- Generated from the User table of the schema model -}\n\
         data User = User\n  \
         { id :: Integer\n  \
         , name :: String\n  \
         , email :: String\n  \
         , password :: String\n  \
         }\n"
    );
}

#[test]
fn test_empty_table_decls() {
    let table = Table::new("Empty", Vec::new());

    assert!(Elm.render_table_decl(&table).expect("elm").ends_with("type alias Empty =\n    {}\n"));
    assert!(Haskell.render_table_decl(&table).expect("hs").ends_with("data Empty = Empty\n"));
}

#[test]
fn test_render_module_header_and_order() {
    let schema = app_schema().expect("schema");
    let module = render_module(&Elm, &schema, "DataDef").expect("module");

    assert!(module.starts_with("module DataDef exposing (..)\n\n{- Generated from the User table"));
    let user = module.find("type alias User =").expect("user");
    let thread = module.find("type alias Thread =").expect("thread");
    let message = module.find("type alias ThreadMessage =").expect("message");
    assert!(user < thread && thread < message);
}

#[test]
fn test_haskell_module_header() {
    let schema = app_schema().expect("schema");
    let module = render_module(&Haskell, &schema, "DataDef").expect("module");

    assert!(module.starts_with("{-# LANGUAGE DuplicateRecordFields #-}\nmodule DataDef where\n"));
}

#[test]
fn test_write_schema_to_file_overwrites() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("DataDefs.elm");
    fs::write(&path, "stale content that is much longer than nothing").expect("seed file");

    let written = write_schema_to_file(&Elm, &schema, "DataDef", &path).expect("write");

    assert_eq!(written.path, path);
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(written.bytes, contents.len());
    assert_eq!(contents, render_module(&Elm, &schema, "DataDef").expect("module"));
    assert!(!contents.contains("stale"));
}

#[test]
fn test_write_schema_to_missing_directory_fails() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("missing").join("DataDefs.hs");

    let err = write_schema_to_file(&Haskell, &schema, "DataDef", &path).expect_err("no parent dir");

    match err {
        SchemaError::Write { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_render_failure_leaves_existing_file() {
    let schema = app_schema().expect("schema");
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("out.txt");
    fs::write(&path, "keep me").expect("seed file");

    assert!(write_schema_to_file(&IntegersOnly, &schema, "Out", &path).is_err());
    assert_eq!(fs::read_to_string(&path).expect("read"), "keep me");
}
