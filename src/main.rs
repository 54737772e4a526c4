use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use passwall::cli::{
    handle_audit, handle_backup_command, handle_config, handle_export, handle_import, handle_init,
    handle_migrate, BackupCommands, ImportArgs, Outcome,
};
use passwall::config::{paths::VaultPaths, settings::Settings};
use passwall::storage::{run_migrations, Storage};
use passwall::{Response, VaultError};

#[derive(Parser)]
#[command(
    name = "passwall",
    version,
    about = "Encrypted backup/restore and CSV import/export for a PassWall vault",
    long_about = "Moves vault credentials between the live store, encrypted backup \
                  snapshots and plaintext CSV files. Set PASSWALL_DATA_DIR to choose \
                  the vault location and PASSWALL_PASSPHRASE to skip the prompt."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print results as a JSON response envelope
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new vault and set its passphrase
    Init,

    /// Import credentials from a CSV file
    Import(ImportArgs),

    /// Export all credentials as CSV
    ///
    /// Without --output the CSV goes to stdout, which cannot be combined
    /// with --json.
    Export {
        /// Write to this file (or PassWall.csv in this directory) instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Add missing fields to stored records
    Migrate,

    /// Show recent entries of the audit log
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json = cli.json;
    match run(cli) {
        Ok(Outcome::Done(response)) => {
            if json {
                print_json(&response);
            } else {
                println!("{}", response.message);
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::Printed) => ExitCode::SUCCESS,
        Err(err) => {
            let response = match err.downcast_ref::<VaultError>() {
                Some(vault_err) => Response::from_error(vault_err),
                None => Response {
                    code: 500,
                    status: "Error".to_string(),
                    message: format!("{:#}", err),
                },
            };
            if json {
                print_json(&response);
            } else {
                eprintln!("Error: {}", response.message);
            }
            ExitCode::FAILURE
        }
    }
}

fn print_json(response: &Response) {
    match response.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("passwall={}", level))),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<Outcome> {
    // Initialize paths and settings
    let paths = VaultPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let paths = settings.apply_to(paths);

    let Some(command) = cli.command else {
        println!("PassWall - encrypted backups and CSV import/export for your vault");
        println!();
        println!("Run 'passwall --help' for usage information.");
        println!("Run 'passwall init' to set up a new vault.");
        return Ok(Outcome::Printed);
    };

    let storage = Storage::new(paths.clone())?;

    // Bring stored records up to the current schema before anything reads them
    let report = run_migrations(&storage);
    tracing::debug!(
        "Startup migration: {} collections, {} fields added, {} failed",
        report.succeeded.len(),
        report.fields_added(),
        report.failed.len()
    );

    storage
        .logins()
        .load()
        .context("Failed to load stored credentials")?;

    let outcome = match command {
        Commands::Init => handle_init(&paths, &mut settings)?,
        Commands::Import(args) => handle_import(&storage, &settings, args)?,
        Commands::Export { output } => handle_export(&storage, &settings, output, cli.json)?,
        Commands::Backup(cmd) => handle_backup_command(&storage, &settings, cmd, cli.json)?,
        Commands::Migrate => handle_migrate(&storage)?,
        Commands::Audit { limit } => handle_audit(&storage, limit, cli.json)?,
        Commands::Config => handle_config(&paths, &settings)?,
    };

    Ok(outcome)
}
