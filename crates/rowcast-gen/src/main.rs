//! rowcast-gen CLI
//!
//! Command-line tool for generating typed table metadata from SQL schemas.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use rowcast_gen::{codegen, load_schema, source, GeneratorConfig, SchemaSource};

/// Typed table metadata and row mappers from SQL schema files.
#[derive(Parser)]
#[command(name = "rowcast-gen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory of schema and migration files.
    #[arg(short, long, env = "ROWCAST_SCHEMA_DIR", global = true)]
    schema_dir: Option<PathBuf>,

    /// Existing database file to introspect instead of a schema directory.
    #[arg(long, global = true, conflicts_with = "schema_dir")]
    snapshot: Option<PathBuf>,

    /// Generator config (JSON).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust source for the schema.
    Generate {
        /// Output file (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the introspected tables as JSON.
    Inspect,

    /// Print the DDL statements extracted from the schema directory.
    Ddl,
}

impl Cli {
    fn schema_source(&self) -> anyhow::Result<SchemaSource> {
        match (&self.snapshot, &self.schema_dir) {
            (Some(path), _) => Ok(SchemaSource::Snapshot(path.clone())),
            (None, Some(dir)) => Ok(SchemaSource::Directory(dir.clone())),
            (None, None) => bail!("either --schema-dir or --snapshot is required"),
        }
    }

    fn generator_config(&self) -> anyhow::Result<GeneratorConfig> {
        match &self.config {
            Some(path) => GeneratorConfig::load(path)
                .with_context(|| format!("loading config {}", path.display())),
            None => Ok(GeneratorConfig::default()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = cli.generator_config()?;
    let schema = cli.schema_source()?;

    match &cli.command {
        Commands::Generate { output } => {
            let (tables, report) = load_schema(&schema, &config)?;
            if let Some(report) = &report {
                for skipped in &report.skipped {
                    warn!(index = skipped.index, sql = %skipped.sql, "Statement was skipped");
                }
            }
            let code = codegen::render(&tables, &config)?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, code)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(tables = tables.len(), "Wrote {}", path.display());
                }
                None => print!("{code}"),
            }
        }

        Commands::Inspect => {
            let (tables, _) = load_schema(&schema, &config)?;
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }

        Commands::Ddl => {
            let SchemaSource::Directory(dir) = &schema else {
                bail!("ddl needs --schema-dir; a snapshot has no DDL files");
            };
            for statement in source::read_ddl(dir, &config)? {
                println!("{statement}");
            }
        }
    }

    Ok(())
}
