//! File writing for generated declarations.
//!
//! The module is rendered completely before the target is opened, so a
//! rendering failure never truncates an existing file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::schema::Schema;
use crate::typegen::{render_module, TypeDialect};

/// A generated file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path that was written
    pub path: PathBuf,
    /// Bytes written
    pub bytes: usize,
}

/// Write the declarations for every table in `schema` to `file_path`.
///
/// Existing content is replaced. The parent directory must already exist.
pub fn write_schema_to_file(
    dialect: &dyn TypeDialect,
    schema: &Schema,
    module_name: &str,
    file_path: &Path,
) -> Result<WrittenFile> {
    let contents = render_module(dialect, schema, module_name)?;
    debug!(dialect = dialect.name(), bytes = contents.len(), "Rendered declarations");

    write_text_file(&contents, file_path).map_err(|source| SchemaError::Write {
        path: file_path.to_path_buf(),
        source,
    })?;

    info!(
        dialect = dialect.name(),
        path = %file_path.display(),
        tables = schema.len(),
        "Wrote declarations"
    );
    Ok(WrittenFile {
        path: file_path.to_path_buf(),
        bytes: contents.len(),
    })
}

fn write_text_file(contents: &str, file_path: &Path) -> std::io::Result<()> {
    let file = File::create(file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()
}
