//! Schemagen - Schema Model Rendering
//!
//! A Rust library that keeps a declarative table/field model of an
//! application database and renders it into SQL and other languages.
//!
//! # Features
//!
//! - SQLite `CREATE TABLE` scripts with foreign-key clauses
//! - Elm and Haskell record declarations kept in sync with the tables
//! - Applying the scripts to a SQLite file, with optional seed data
//! - Validation of names and foreign-key references

/// Configuration management
pub mod config;
/// Applying DDL to SQLite
pub mod db;
/// Error types
pub mod error;
/// Writing generated declaration files
pub mod file_writer;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Field and table metadata
pub mod models;
/// Record values and row decoders
pub mod records;
/// Validated schema and the application tables
pub mod schema;
/// Pipelines over a schema
pub mod service;
/// SQL rendering
pub mod sql;
/// Foreign-language type declarations
pub mod typegen;
/// Schema validation
pub mod validation;

// Re-export key components for easier access
pub use db::Database;
pub use error::{Result, SchemaError};
pub use models::{Field, FieldType, Table, TableId};
pub use schema::{app_schema, Schema};
pub use typegen::{Language, TypeDialect};
