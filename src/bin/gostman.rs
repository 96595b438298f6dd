//! Gostman command-line entry point.
//!
//! A thin shell over [`gostman::commands::Commands`]: list saved requests,
//! send or delete one by id, and show or replace the environment.
//!
//! Logging goes to stderr through env_logger; set `RUST_LOG=debug` for
//! request-level detail.

use clap::{Parser, Subcommand};
use gostman::commands::{CommandOutcome, Commands};
use gostman::config::{load_config, load_config_file, EngineConfig};
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "gostman", version, about = "Send and manage saved HTTP requests")]
struct Cli {
    /// Saved-requests file (defaults to the platform data directory)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List saved requests
    List,
    /// Send a saved request
    Send {
        /// Request id
        id: String,
        /// Store the response body on the saved request
        #[arg(long)]
        save_response: bool,
    },
    /// Delete a saved request
    Delete {
        /// Request id
        id: String,
    },
    /// Show or replace environment variables
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
}

#[derive(Debug, Subcommand)]
enum EnvAction {
    /// Print the environment JSON
    Show,
    /// Replace the environment with a JSON object of strings
    Set {
        /// Environment JSON text
        json: String,
    },
}

fn engine_config(cli: &Cli) -> Result<EngineConfig, String> {
    let mut config = match &cli.config {
        Some(path) => load_config_file(path).map_err(|e| e.to_string())?,
        None => load_config(None).map_err(|e| e.to_string())?,
    };
    if let Some(store) = &cli.store {
        config.store_path = Some(store.clone());
    }
    Ok(config)
}

fn report(outcome: CommandOutcome) -> ExitCode {
    if outcome.is_success() {
        println!("{}", outcome.message);
        ExitCode::SUCCESS
    } else {
        eprintln!("{}: {}", outcome.label, outcome.message);
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let commands = match engine_config(&cli)
        .and_then(|config| Commands::from_config(&config).map_err(|e| e.to_string()))
    {
        Ok(commands) => commands,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::FAILURE;
        }
    };
    debug!("Using store at {}", commands.store().path().display());

    match cli.command {
        Command::List => {
            for request in commands.list_requests() {
                println!(
                    "{}\t{}\t{}\t{}",
                    request.id, request.method, request.name, request.url
                );
            }
            ExitCode::SUCCESS
        }
        Command::Send { id, save_response } => {
            let result = commands.send_saved(&id, save_response).await;
            if result.is_completed() {
                println!("{} ({} ms)", result.status, result.duration.as_millis());
                println!("{}", result.body);
                ExitCode::SUCCESS
            } else {
                eprintln!("{}", result.status_label());
                eprintln!("{}", result.body);
                ExitCode::FAILURE
            }
        }
        Command::Delete { id } => report(commands.delete_request(&id)),
        Command::Env { action } => match action {
            EnvAction::Show => {
                println!("{}", commands.environment());
                ExitCode::SUCCESS
            }
            EnvAction::Set { json } => report(commands.save_environment(&json)),
        },
    }
}
