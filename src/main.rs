use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use schemagen::config::AppConfig;
use schemagen::logging::{init_logging, OperationTimer};
use schemagen::service::SchemaService;
use schemagen::{app_schema, Language, Schema};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./schemagen.{toml,yaml,json} if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the CREATE TABLE scripts
    Sql,
    /// Write record declarations for a target language
    Types {
        /// Target language
        #[arg(short, long, value_enum)]
        lang: Language,

        /// Output file (defaults to the configured path)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Module name in the generated header
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Create the database and apply the schema
    InitDb {
        /// Database file (defaults to the configured path)
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Insert the sample records
        #[arg(long)]
        seed: bool,

        /// Keep an existing database file instead of deleting it first
        #[arg(long)]
        no_recreate: bool,
    },
    /// Print the schema metadata as JSON
    Describe,
    /// Initialize the database and write every configured declaration file
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = AppConfig::load_from(cli.config.as_deref())?;

    // Initialize logging
    let level = cli.log_level.clone().unwrap_or_else(|| config.get_log_level());
    let _guard = init_logging(
        Some(&level),
        &config.logging.format,
        config.logging.file_path.as_deref().map(Path::new),
    )?;

    let schema = app_schema().context("Application schema is invalid")?;
    info!(tables = schema.len(), "Loaded schema");

    match cli.command {
        Commands::Sql => print_sql(&schema)?,
        Commands::Types { lang, output, module } => {
            let path = output
                .or_else(|| config.output_path(lang))
                .with_context(|| format!("No output path configured for {}", lang.dialect().name()))?;
            let module = module.unwrap_or_else(|| config.output.module_name.clone());
            write_types(&schema, lang, &path, &module)?;
        }
        Commands::InitDb {
            database,
            seed,
            no_recreate,
        } => {
            let mut db_config = config.database.clone();
            if let Some(path) = database {
                db_config.path = path.display().to_string();
            }
            db_config.seed_sample_data |= seed;
            db_config.recreate &= !no_recreate;
            init_db(&schema, &db_config)?;
        }
        Commands::Describe => {
            let json = schema.to_json()?;
            writeln!(std::io::stdout().lock(), "{json}")?;
        }
        Commands::All => {
            init_db(&schema, &config.database)?;
            let mut written = 0;
            for lang in Language::ALL {
                if let Some(path) = config.output_path(lang) {
                    write_types(&schema, lang, &path, &config.output.module_name)?;
                    written += 1;
                }
            }
            if written == 0 {
                warn!("No declaration output paths configured");
            }
        }
    }

    Ok(())
}

/// Print every CREATE TABLE script to stdout, one per line
fn print_sql(schema: &Schema) -> Result<()> {
    let service = SchemaService::new(schema);
    let mut stdout = std::io::stdout().lock();
    for script in service.sql_scripts() {
        writeln!(stdout, "{script}")?;
    }
    Ok(())
}

fn write_types(schema: &Schema, lang: Language, path: &Path, module: &str) -> Result<()> {
    let timer = OperationTimer::new("write_types");
    let written = SchemaService::new(schema)
        .write_declarations(lang, path, module)
        .with_context(|| format!("Failed to generate {} declarations", lang.dialect().name()))?;
    info!(
        "Wrote {} bytes of {} declarations to {}",
        written.bytes,
        lang.dialect().name(),
        written.path.display()
    );
    timer.finish();
    Ok(())
}

fn init_db(schema: &Schema, db_config: &schemagen::config::DatabaseConfig) -> Result<()> {
    let timer = OperationTimer::new("init_db");
    let report = SchemaService::new(schema)
        .initialize_database(db_config)
        .with_context(|| format!("Failed to initialize database at {}", db_config.path))?;
    info!(
        "Applied {} table scripts, seeded {} records into {}",
        report.scripts_applied, report.records_seeded, db_config.path
    );
    timer.finish();
    Ok(())
}
