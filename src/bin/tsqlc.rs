//! tsqlc: compile JSON criteria into T-SQL
//!
//! # Usage
//!
//! ```bash
//! # SELECT from a criteria file
//! tsqlc select users criteria.json
//!
//! # Criteria on stdin
//! echo '{"where": {"age": {">": 30}}, "sort": "-age"}' | tsqlc select users
//!
//! # UPDATE with inline values
//! tsqlc update users --set '{"name": null}' criteria.json
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::EnvFilter;
use tsql_criteria::prelude::*;

#[derive(Parser)]
#[command(name = "tsqlc")]
#[command(version)]
#[command(
    about = "Compile declarative query criteria into SQL Server statements",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    tsqlc select users criteria.json
    echo '{\"where\": {\"id\": [1, 2]}}' | tsqlc delete users
    tsqlc insert users row.json --schema app
    tsqlc create-table users attributes.json
    tsqlc literal '[1, 2, 3]'")]
struct Cli {
    /// Compiler config file (TOML); defaults to $TSQL_CRITERIA_CONFIG or the user config dir
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a SELECT
    Select {
        table: String,
        /// Criteria JSON file ("-" or omitted for stdin)
        criteria: Option<PathBuf>,
    },
    /// Compile an UPDATE
    Update {
        table: String,
        /// Values to assign, as a JSON object
        #[arg(long = "set")]
        values: String,
        /// Criteria JSON file ("-" or omitted for stdin)
        criteria: Option<PathBuf>,
    },
    /// Compile a DELETE
    Delete {
        table: String,
        /// Criteria JSON file ("-" or omitted for stdin)
        criteria: Option<PathBuf>,
    },
    /// Compile an INSERT capturing the generated id
    Insert {
        table: String,
        /// Row JSON file ("-" or omitted for stdin)
        data: Option<PathBuf>,
        /// Schema qualifying the table (overrides the config)
        #[arg(long)]
        schema: Option<String>,
    },
    /// Compile a CREATE TABLE from an attribute mapping
    CreateTable {
        table: String,
        /// Attributes JSON file ("-" or omitted for stdin)
        attributes: Option<PathBuf>,
    },
    /// Compile a DROP TABLE
    DropTable { table: String },
    /// Compile an ALTER TABLE ... ADD
    AddColumn {
        table: String,
        attribute: String,
        /// Type name or JSON attribute definition
        definition: String,
    },
    /// Compile an ALTER TABLE ... DROP COLUMN
    DropColumn { table: String, attribute: String },
    /// Turn introspected column metadata rows into an attribute mapping
    Introspect {
        /// Metadata JSON file ("-" or omitted for stdin)
        metadata: Option<PathBuf>,
    },
    /// Render a JSON value as a SQL literal
    Literal { value: String },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "tsql_criteria=debug" } else { "tsql_criteria=warn" };
    let filter = EnvFilter::try_from_env("TSQLC_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<CompilerConfig> {
    let config = match path {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => CompilerConfig::load()?,
    };
    Ok(config)
}

fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli.config.as_deref())?;
    let compiler = Compiler::new(config).with_diagnostics(Arc::new(TracingDiagnostics));

    let sql = match &cli.command {
        Commands::Select { table, criteria } => {
            let criteria = read_criteria(criteria.as_deref())?;
            compiler.compile_select(&criteria, table)?
        }
        Commands::Update {
            table,
            values,
            criteria,
        } => {
            let values = parse_values(&json_value(values).context("parsing --set")?)?;
            let criteria = read_criteria(criteria.as_deref())?;
            compiler.compile_update(table, &values, &criteria)?
        }
        Commands::Delete { table, criteria } => {
            let criteria = read_criteria(criteria.as_deref())?;
            compiler.compile_delete(table, &criteria)?
        }
        Commands::Insert { table, data, schema } => {
            let data = parse_values(&json_value(&read_input(data.as_deref())?)?)?;
            let schema = schema.as_deref().unwrap_or(&compiler.config().schema);
            compiler.compile_insert(table, schema, &data)?
        }
        Commands::CreateTable { table, attributes } => {
            let attributes = parse_attributes_json(&read_input(attributes.as_deref())?)?;
            compiler.compile_create_table(table, &attributes)?
        }
        Commands::DropTable { table } => compiler.compile_drop_table(table),
        Commands::AddColumn {
            table,
            attribute,
            definition,
        } => {
            let def = attribute_definition(definition)?;
            compiler.compile_add_column(table, attribute, &def)
        }
        Commands::DropColumn { table, attribute } => compiler.compile_drop_column(table, attribute),
        Commands::Introspect { metadata } => {
            let rows: Vec<ColumnMetadata> = serde_json::from_str(&read_input(metadata.as_deref())?)
                .context("parsing column metadata")?;
            let mut map = serde_json::Map::new();
            for (name, def) in normalize_schema(&rows) {
                map.insert(name, serde_json::to_value(def)?);
            }
            return Ok(serde_json::to_string_pretty(&map)?);
        }
        Commands::Literal { value } => {
            let value = json_value(value).unwrap_or_else(|_| Value::from(value.as_str()));
            return Ok(compiler.normalize_value(value).to_sql());
        }
    };

    if cli.verbose {
        eprintln!("{}", "Generated SQL:".green().bold());
    }
    Ok(sql)
}

/// Read a file, or stdin when `path` is absent or `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn read_criteria(path: Option<&Path>) -> Result<Criteria> {
    let text = read_input(path)?;
    if text.trim().is_empty() {
        return Ok(Criteria::new());
    }
    Ok(parse_criteria_json(&text)?)
}

fn json_value(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

fn attribute_definition(definition: &str) -> Result<AttributeDef> {
    if definition.trim_start().starts_with('{') {
        return serde_json::from_str(definition).context("parsing attribute definition");
    }
    Ok(AttributeDef::new(definition))
}
