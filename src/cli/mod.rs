//! Thin command-line shell: load settings, replay a snapshot, print the report.

pub mod system_clock;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tix_config::{Config, ConfigManager};
use tix_core::{scan, Clock};
use tix_domain::Network;
use tix_source_json::JsonSnapshotSource;

use crate::{errors::CliError, report::TicketReport, utils::build_info};

pub use system_clock::SystemClock;

#[derive(Debug, Parser)]
#[command(
    name = "ticket_core_cli",
    version,
    about = "Reports the lifecycle of a wallet's stake tickets"
)]
pub struct Cli {
    /// Config file to use instead of the per-user default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify the tickets found in a transaction snapshot.
    Scan(ScanArgs),
    /// Print the effective configuration and consensus parameters.
    Config,
    /// Print build metadata.
    Version,
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// JSON snapshot of the wallet's mined transactions.
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Network whose consensus parameters apply (overrides the config).
    #[arg(long)]
    pub network: Option<Network>,

    /// Skip blocks below this height (overrides the config).
    #[arg(long)]
    pub starting_height: Option<i64>,

    /// Unix timestamp to measure waiting ages against, instead of the wall clock.
    #[arg(long)]
    pub now: Option<i64>,

    /// Emit the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable coloured statuses.
    #[arg(long)]
    pub no_color: bool,
}

/// Parses process arguments and runs the selected command against stdout.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    crate::init_with_level(if cli.verbose { "debug" } else { "info" });
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &SystemClock, &mut out)
}

pub fn run(cli: Cli, clock: &dyn Clock, out: &mut dyn Write) -> Result<(), CliError> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::with_default_path(),
    };

    match cli.command {
        Command::Scan(args) => run_scan(&manager, args, clock, out),
        Command::Config => {
            let config = manager.load()?;
            let params = config.network_params()?;
            let document = json!({
                "path": manager.config_path().display().to_string(),
                "config": config,
                "params": params,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&document)?)?;
            Ok(())
        }
        Command::Version => {
            writeln!(out, "{}", build_info::current().summary())?;
            Ok(())
        }
    }
}

fn run_scan(
    manager: &ConfigManager,
    args: ScanArgs,
    clock: &dyn Clock,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let mut config: Config = manager.load()?;
    if let Some(network) = args.network {
        config.network = network;
    }
    if let Some(height) = args.starting_height {
        if height < 0 {
            return Err(CliError::InvalidArgument(format!(
                "starting height must not be negative, got {height}"
            )));
        }
        config.starting_height = height;
    }
    let params = config.network_params()?;

    let mut source = JsonSnapshotSource::open(&args.snapshot)?;
    let scanned = scan(&mut source, params, config.starting_height)?;
    let now = args.now.unwrap_or_else(|| clock.unix_now());

    let mut report = TicketReport::build(&scanned.classification, now);
    if let Some(err) = &scanned.interrupted {
        report = report.with_interruption(err.to_string());
    }
    tracing::info!(
        network = %config.network,
        tickets = report.summary.ticket_count,
        votes = report.summary.vote_count,
        expired = report.summary.expired_count,
        "report ready"
    );

    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", report.render(!args.no_color))?;
    }

    match scanned.interrupted {
        Some(err) => Err(CliError::Incomplete(err)),
        None => Ok(()),
    }
}
