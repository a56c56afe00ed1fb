// crates/file-router-server/src/main.rs
// ============================================================================
// Module: File Router Entry Point
// Description: Command dispatcher for the File Router server.
// Purpose: Load configuration and run the HTTP server to completion.
// Dependencies: clap, file-router-server, tokio
// ============================================================================

//! ## Overview
//! The binary exposes one `serve` command that loads the TOML configuration,
//! wires the production backends, and serves the events and report endpoints
//! until the process is stopped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use file_router_server::FileRouterConfig;
use file_router_server::RouterServer;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Command-line interface definition.
#[derive(Parser, Debug)]
#[command(name = "file-router", version, about = "Event-driven file routing service")]
struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Configuration file path.
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// User-facing error message.
    message: String,
}

impl CliError {
    /// Creates a CLI error from any displayable message.
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve {
            config,
        } => command_serve(config).await,
    }
}

/// Executes the `serve` command.
async fn command_serve(config_path: Option<PathBuf>) -> CliResult<ExitCode> {
    let config = FileRouterConfig::load(config_path.as_deref())
        .map_err(|err| CliError::new(format!("failed to load configuration: {err}")))?;
    let server = tokio::task::spawn_blocking(move || RouterServer::from_config(config))
        .await
        .map_err(|err| CliError::new(format!("server init join failed: {err}")))?
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server
        .serve()
        .await
        .map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

/// Writes an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = writeln!(std::io::stderr(), "{message}");
    ExitCode::FAILURE
}
