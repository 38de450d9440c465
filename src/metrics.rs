//! Metric names and recording helpers over the `metrics` facade.

use metrics::{counter, histogram};
use std::time::Duration;

/// Metrics collection and management
///
/// Calls go through the `metrics` facade and are no-ops until a recorder is
/// installed.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    /// Counter of tables rendered, labelled by target
    pub tables_rendered_total: &'static str,
    /// Histogram of render time in seconds
    pub render_duration: &'static str,
    /// Counter of declaration files written, labelled by language
    pub declaration_files_written_total: &'static str,
    /// Histogram of declaration file sizes
    pub declaration_file_size_bytes: &'static str,
    /// Counter of `CREATE TABLE` scripts executed
    pub ddl_scripts_applied_total: &'static str,
    /// Counter of seed rows inserted
    pub records_seeded_total: &'static str,
    /// Counter of failures, labelled by kind and operation
    pub errors_total: &'static str,
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self {
            tables_rendered_total: "schemagen_tables_rendered_total",
            render_duration: "schemagen_render_duration_seconds",
            declaration_files_written_total: "schemagen_declaration_files_written_total",
            declaration_file_size_bytes: "schemagen_declaration_file_size_bytes",
            ddl_scripts_applied_total: "schemagen_ddl_scripts_applied_total",
            records_seeded_total: "schemagen_records_seeded_total",
            errors_total: "schemagen_errors_total",
        }
    }
}

impl MetricsCollector {
    /// Record a render of `tables` tables for `target` ("sql", "elm", ...)
    pub fn record_render(&self, target: &'static str, tables: usize, duration: Duration) {
        counter!(self.tables_rendered_total, "target" => target).increment(tables as u64);
        histogram!(self.render_duration, "target" => target).record(duration.as_secs_f64());
    }

    /// Record a generated declaration file
    pub fn record_file_written(&self, language: &'static str, size_bytes: u64) {
        counter!(self.declaration_files_written_total, "language" => language).increment(1);
        #[allow(clippy::cast_precision_loss)]
        histogram!(self.declaration_file_size_bytes, "language" => language).record(size_bytes as f64);
    }

    /// Record DDL scripts executed against a database
    pub fn record_scripts_applied(&self, count: usize) {
        counter!(self.ddl_scripts_applied_total).increment(count as u64);
    }

    /// Record seed rows inserted
    pub fn record_records_seeded(&self, count: usize) {
        counter!(self.records_seeded_total).increment(count as u64);
    }

    /// Record error metrics
    pub fn record_error(&self, error_type: &'static str, operation: &'static str) {
        counter!(self.errors_total, "type" => error_type, "operation" => operation).increment(1);
    }
}
