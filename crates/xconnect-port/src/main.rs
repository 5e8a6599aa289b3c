//! xconnect-port command line entry point.
//!
//! Drives one port resource through its lifecycle. The desired configuration
//! is read from a JSON file and local state is kept in a JSON state file
//! between invocations.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use xconnect_client::config_file::DEFAULT_CONFIG_PATH;
use xconnect_client::{ProviderConfig, XconnectClient};
use xconnect_common::{ApiError, PortId, PortResourceError};
use xconnect_port::{read_desired, LifecycleSettings, PortResource, StateFile};

#[derive(Parser, Debug)]
#[command(name = "xconnect-port")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Provider configuration file
    #[arg(short, long, env = "XCONNECT_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Local state file for the managed port
    #[arg(short, long, default_value = "port.state.json")]
    state: PathBuf,

    /// Log filter used when RUST_LOG is not set
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Order a new port and wait for it to be provisioned
    Create {
        /// Desired configuration (JSON)
        desired: PathBuf,
    },
    /// Refresh local state from the remote record
    Read,
    /// Apply name, visibility and lock changes
    Update {
        /// Desired configuration (JSON)
        desired: PathBuf,
    },
    /// Delete or cancel the port, according to the delete policy
    Delete,
    /// Start tracking an existing port
    Import {
        /// Identifier of the existing port
        port_id: String,
    },
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    let config = ProviderConfig::load_from(&args.config)?;
    let client = Arc::new(XconnectClient::new(&config)?);
    let resource = PortResource::new(client, LifecycleSettings::from(&config));
    let state_file = StateFile::new(&args.state);

    info!(
        "Using API {} (delete ports: {})",
        config.api.base_url,
        resource.settings().delete_ports
    );

    match args.command {
        Command::Create { desired } => {
            let desired = read_desired(&desired)?;
            let mut state = state_file.load()?;
            let result = resource.create(&desired, &mut state).await;

            // A bound id means a port exists remotely; keep it even on failure.
            if state.id().is_some() {
                state_file.save(&state)?;
            }
            result?;
        }
        Command::Read => {
            let mut state = state_file.load()?;
            resource.read(&mut state).await?;
            state_file.save(&state)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
        Command::Update { desired } => {
            let desired = read_desired(&desired)?;
            let mut state = state_file.load()?;
            resource.update(&desired, &mut state).await?;
            state_file.save(&state)?;
        }
        Command::Delete => {
            let state = state_file.load()?;
            resource.delete(&state).await?;
            state_file.remove()?;
        }
        Command::Import { port_id } => {
            if let Some(existing) = state_file.load()?.id() {
                bail!(
                    "{} already tracks port {}",
                    state_file.path().display(),
                    existing
                );
            }
            let state = resource.import(PortId::from(port_id)).await?;
            state_file.save(&state)?;
        }
    }

    Ok(())
}

/// One-line failure report. Error messages already embed their cause, so
/// only the outermost message is printed.
fn describe_failure(e: &anyhow::Error) -> String {
    let transient = e
        .downcast_ref::<PortResourceError>()
        .and_then(PortResourceError::api_error)
        .is_some_and(ApiError::is_retryable);

    if transient {
        format!("{e} (transient; retrying may succeed)")
    } else {
        e.to_string()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(&args.log_level) {
        eprintln!("xconnect-port: {e:#}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", describe_failure(&e));
            ExitCode::FAILURE
        }
    }
}
