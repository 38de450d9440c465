//! Render pipelines over one schema, with metrics around each step.

use std::path::Path;
use std::time::Instant;

use tracing::{error, info};

use crate::config::DatabaseConfig;
use crate::db::Database;
use crate::error::Result;
use crate::file_writer::{write_schema_to_file, WrittenFile};
use crate::metrics::MetricsCollector;
use crate::records::sample_records;
use crate::schema::Schema;
use crate::sql::render_schema;
use crate::typegen::Language;

/// Summary of a database initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitReport {
    /// `CREATE TABLE` scripts executed
    pub scripts_applied: usize,
    /// Sample rows inserted
    pub records_seeded: usize,
}

/// Runs the render pipelines over one schema and records metrics
pub struct SchemaService<'a> {
    schema: &'a Schema,
    metrics: MetricsCollector,
}

impl<'a> SchemaService<'a> {
    /// Create a service over `schema` with the default metric names
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            metrics: MetricsCollector::default(),
        }
    }

    /// Every `CREATE TABLE` script, in schema order
    pub fn sql_scripts(&self) -> Vec<String> {
        let start = Instant::now();
        let scripts = render_schema(self.schema);
        self.metrics.record_render("sql", scripts.len(), start.elapsed());
        scripts
    }

    /// Write the declarations for `language` to `path`
    pub fn write_declarations(&self, language: Language, path: &Path, module_name: &str) -> Result<WrittenFile> {
        let dialect = language.dialect();
        let start = Instant::now();
        let written = write_schema_to_file(dialect, self.schema, module_name, path).inspect_err(|e| {
            error!(language = dialect.name(), error = %e, "Failed to write declarations");
            self.metrics.record_error(e.kind(), "write_declarations");
        })?;
        self.metrics.record_render(dialect.file_extension(), self.schema.len(), start.elapsed());
        self.metrics
            .record_file_written(dialect.file_extension(), written.bytes as u64);
        Ok(written)
    }

    /// Create (or recreate) the configured database, apply the schema and
    /// optionally insert the sample records
    pub fn initialize_database(&self, config: &DatabaseConfig) -> Result<InitReport> {
        let path = Path::new(&config.path);
        let db = if config.recreate {
            Database::recreate(path)?
        } else {
            Database::open(path)?
        };
        self.apply(&db, config.seed_sample_data).inspect_err(|e| {
            self.metrics.record_error(e.kind(), "initialize_database");
        })
    }

    /// Apply the schema to an open database
    pub fn apply(&self, db: &Database, seed: bool) -> Result<InitReport> {
        let scripts_applied = db.apply_schema(self.schema)?;
        self.metrics.record_scripts_applied(scripts_applied);

        let records_seeded = if seed {
            let count = db.seed(self.schema, &sample_records())?;
            self.metrics.record_records_seeded(count);
            count
        } else {
            0
        };

        info!(scripts_applied, records_seeded, "Database initialized");
        Ok(InitReport {
            scripts_applied,
            records_seeded,
        })
    }
}
