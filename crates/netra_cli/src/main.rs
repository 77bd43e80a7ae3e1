//! Command-line request adapter for the issue store.
//!
//! # Responsibility
//! - Translate arguments into `NewIssue`/`FilterSpec` values.
//! - Render records as JSON on stdout and failures as JSON on stderr.
//! - Map store error kinds to distinct exit codes.

use clap::{Parser, Subcommand};
use log::error;
use netra_core::{
    init_logging, FilterSpec, IssueService, NetraConfig, NewIssue, SqliteIssueStore, StoreError,
    StoreErrorKind, StoreConfig,
};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_DB_FILE: &str = "netra.db";

#[derive(Debug, Parser)]
#[command(name = "netra", version, about = "Create, inspect and search issues")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file; overrides the configured location.
    /// Defaults to `netra.db` when no config file is given.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an issue and print it with its assigned id.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value_t = 0)]
        priority: u32,
    },
    /// Print one issue.
    Get { id: String },
    /// Delete one issue and print what was removed.
    Delete { id: String },
    /// Print every issue.
    List,
    /// Print issues matching all given criteria.
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Inclusive lower priority bound; negative means unbounded.
        #[arg(long, allow_negative_numbers = true)]
        priority_low: Option<i64>,
        /// Inclusive upper priority bound; negative means unbounded.
        #[arg(long, allow_negative_numbers = true)]
        priority_high: Option<i64>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{}", json!({ "status": "Invalid configuration.", "error": message }));
            return ExitCode::from(2);
        }
    };

    if let Some(logging) = &config.logging {
        if let Err(err) = init_logging(logging) {
            eprintln!("{}", json!({ "status": "Logging unavailable.", "error": err.to_string() }));
        }
    }

    let service = match SqliteIssueStore::open(&config.store) {
        Ok(store) => IssueService::new(store),
        Err(err) => return report(&err),
    };

    match run(&service, cli.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => report(&err),
    }
}

fn load_config(cli: &Cli) -> Result<NetraConfig, String> {
    let mut config = match &cli.config {
        Some(path) => NetraConfig::load(path).map_err(|err| err.to_string())?,
        None => NetraConfig::default(),
    };
    let db = cli
        .db
        .clone()
        .or_else(|| cli.config.is_none().then(|| PathBuf::from(DEFAULT_DB_FILE)));
    if let Some(db) = db {
        config.store = StoreConfig {
            busy_timeout_ms: config.store.busy_timeout_ms,
            ..StoreConfig::file(db)
        };
    }
    Ok(config)
}

fn run(
    service: &IssueService<SqliteIssueStore>,
    command: Command,
) -> Result<serde_json::Value, StoreError> {
    let output = match command {
        Command::Create {
            title,
            description,
            priority,
        } => {
            let input = NewIssue::new(title)
                .with_description(description)
                .with_priority(priority);
            let id = service.create(&input)?;
            json!(service.get(&id)?)
        }
        Command::Get { id } => json!(service.get(&id)?),
        Command::Delete { id } => json!(service.delete_by_id(&id)?),
        Command::List => json!(service.list()?),
        Command::Search {
            title,
            description,
            priority_low,
            priority_high,
        } => {
            let spec = FilterSpec::from_raw(
                title.as_deref().unwrap_or_default(),
                description.as_deref().unwrap_or_default(),
                priority_low.unwrap_or(-1),
                priority_high.unwrap_or(-1),
            );
            json!(service.search(&spec)?)
        }
    };
    Ok(output)
}

fn report(err: &StoreError) -> ExitCode {
    let (status, code) = match err.kind() {
        StoreErrorKind::Validation => ("Invalid request.", 2),
        StoreErrorKind::NotFound => ("Resource not found.", 3),
        StoreErrorKind::Persistence => ("Internal Server Error.", 1),
    };
    error!("event=cli_command module=cli status=error error_kind={:?}", err.kind());
    eprintln!("{}", json!({ "status": status, "error": err.to_string() }));
    ExitCode::from(code)
}
