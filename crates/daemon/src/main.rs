// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! haaasd: node-local agent that owns the local LB (haproxy) process and
//! coordinates its two-phase cluster rollout over the message bus.

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod admin;
mod supervisor;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use haaas_adapters::{ShellReloader, ShellSyslogCtl, TcpBusClient};
use haaas_core::{Config, SystemClock};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

use crate::admin::NullAdminSurface;
use crate::supervisor::Supervisor;

/// Node-local LB lifecycle agent.
#[derive(Parser, Debug)]
#[command(name = "haaasd", version)]
struct Cli {
    /// Node ip address
    #[arg(long = "ip", default_value = "4.3.2.1")]
    ip: String,

    /// Configuration file
    #[arg(long = "config", default_value = "haaas.conf")]
    config: PathBuf,

    /// Print current version
    #[arg(long = "version", default_value_t = false)]
    version: bool,

    /// Log in verbose mode
    #[arg(long = "verbose", default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.version {
        println!(env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let _log_guard = setup_logging(cli.verbose);

    let config = match Config::load(&cli.config) {
        Ok(config) => config.with_ip(cli.ip),
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            std::process::exit(1);
        }
    };

    info!(status = %config.status, id = %config.node_id(), "starting haaasd");

    let bus = Arc::new(TcpBusClient::new(config.producer_addr.clone(), config.producer_rest_addr.clone()));
    let reloader = Arc::new(ShellReloader);
    let syslog_ctl = Arc::new(ShellSyslogCtl::default());
    let admin = Arc::new(NullAdminSurface);

    let supervisor = Supervisor::start(&config, bus, reloader, syslog_ctl, SystemClock, admin).await?;

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
        _ = sigquit.recv() => info!("received SIGQUIT, shutting down"),
    }

    supervisor.shutdown().await;
    info!("haaasd stopped");
    Ok(())
}

/// Set up a non-blocking, env-filtered tracing subscriber writing to stdout.
/// `-verbose` raises the default level to debug when `RUST_LOG` is unset.
fn setup_logging(verbose: bool) -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    guard
}
