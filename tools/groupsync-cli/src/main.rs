use clap::{ArgAction, Parser};
use groupsync_core::{SyncError, BUILD_INFO};
use std::process::ExitCode;
use sync_engine::{Credentials, SyncOptions, SyncSession};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use workload_client::WorkloadClient;

mod console;

use console::TerminalConsole;

#[derive(Parser)]
#[command(name = "groupsync")]
#[command(about = "Copy child policies missing between the dev, prd and qas WinSvr policy groups")]
#[command(version = groupsync_core::VERSION)]
struct Cli {
    /// Cloud One region, e.g. us-1 (prompted when omitted)
    #[arg(long)]
    region: Option<String>,

    /// Cloud One API key (prompted when omitted)
    #[arg(long)]
    api_key: Option<String>,

    /// Use this API host instead of the region's Workload Security host
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// List missing policies without duplicating anything
    #[arg(long)]
    dry_run: bool,

    /// Log more detail to stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    info!("Starting {}", BUILD_INFO);

    let mut console = TerminalConsole::new();
    let credentials = Credentials::resolve(&mut console, cli.region, cli.api_key)?;

    let mut client = WorkloadClient::new(credentials.api_key, &credentials.region);
    if let Some(url) = cli.base_url {
        client = client.with_base_url(url);
    }
    debug!(base_url = client.base_url(), "Using policy API");

    let options = SyncOptions {
        dry_run: cli.dry_run,
    };
    match SyncSession::new(&client, &mut console, options).run().await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        // already reported on the console
        Err(SyncError::Api(_) | SyncError::NoPolicies) => Ok(ExitCode::FAILURE),
        Err(err) => Err(err.into()),
    }
}
