//! presto-import CLI - bulk-load delimited text files into a Presto table.

mod prompt;

use clap::{ArgAction, Parser};
use presto_import::{
    Config, ImportError, ImportResult, InputFormat, NoPassword, Orchestrator, PasswordProvider,
    PrestoClient, StaticPassword,
};
use prompt::ConsolePassword;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser)]
#[command(name = "presto-import")]
#[command(about = "Bulk-load delimited text files into a Presto table")]
#[command(version)]
struct Cli {
    /// Path to YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Presto server location [default: localhost:8080]
    #[arg(long)]
    server: Option<String>,

    /// Username [default: current OS user]
    #[arg(long)]
    user: Option<String>,

    /// Prompt for password (PRESTO_PASSWORD overrides the prompt)
    #[arg(long)]
    password: bool,

    /// Target table as catalog.schema.table
    #[arg(long)]
    table: Option<String>,

    /// Max rows per INSERT statement [default: 1000]
    #[arg(long)]
    batch_size: Option<usize>,

    /// Drop and recreate the table before loading [default: true]
    #[arg(long, action = ArgAction::Set, value_name = "BOOL")]
    drop_create: Option<bool>,

    /// Delimited input file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Input format: csv, tsv or csv_unquoted [default: csv_unquoted]
    #[arg(long)]
    input_format: Option<InputFormat>,

    /// Continue with the next batch when a batch fails (default is to exit immediately)
    #[arg(long)]
    ignore_errors: bool,

    /// Output JSON result to stdout
    #[arg(long)]
    output_json: bool,

    /// Log format: text or json
    #[arg(long, default_value = "text")]
    log_format: String,

    /// Log verbosity: debug, info, warn, error
    #[arg(long, default_value = "info")]
    verbosity: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.format_detailed());
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ImportError> {
    let cli = Cli::parse();

    setup_logging(&cli.verbosity, &cli.log_format).map_err(ImportError::Config)?;

    let config = build_config(&cli)?;
    config.validate()?;

    let credentials: Box<dyn PasswordProvider> = match &config.client.password {
        Some(password) => Box::new(StaticPassword::new(password.clone())),
        None if cli.password => Box::new(ConsolePassword::from_env()),
        None => Box::new(NoPassword),
    };

    let client = PrestoClient::connect(&config.client, credentials.as_ref())?;
    info!("Connected to {} as {}", client.base_url(), config.client.user);

    let result = Orchestrator::new(config.import, client).run().await?;

    if cli.output_json {
        println!("{}", result.to_json()?);
    } else {
        print_summary(&result);
    }

    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn build_config(cli: &Cli) -> Result<Config, ImportError> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!("Loaded configuration from {:?}", path);
            config
        }
        None => Config::default(),
    };

    if let Some(server) = &cli.server {
        config.client.server = server.clone();
    }
    if let Some(user) = &cli.user {
        config.client.user = user.clone();
    }
    if config.client.user.is_empty() {
        config.client.user = current_user();
    }
    if let Some(table) = &cli.table {
        config.import.table = table.clone();
    }
    if let Some(file) = &cli.file {
        config.import.file = file.clone();
    }
    if let Some(batch_size) = cli.batch_size {
        config.import.batch_size = batch_size;
    }
    if let Some(drop_create) = cli.drop_create {
        config.import.drop_create = drop_create;
    }
    if let Some(format) = cli.input_format {
        config.import.input_format = format;
    }
    if cli.ignore_errors {
        config.import.ignore_errors = true;
    }

    Ok(config)
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default()
}

fn print_summary(result: &ImportResult) {
    println!("FINISHED");
    println!(
        "{} seconds [{} rows]",
        result.duration_seconds as u64, result.rows_inserted
    );
    if result.batches_failed > 0 {
        println!(
            "  Skipped: {} rows in {} failed batches",
            result.rows_skipped, result.batches_failed
        );
    }
}

fn setup_logging(verbosity: &str, format: &str) -> Result<(), String> {
    let level = match verbosity.to_lowercase().as_str() {
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        "json" => subscriber.json().init(),
        "text" => subscriber.init(),
        other => return Err(format!("log format must be text or json, got '{}'", other)),
    }

    Ok(())
}
