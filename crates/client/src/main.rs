//! Headless battle client entry point.
//!
//! Runs a single battle to completion, streaming the battle log to stdout.
//! Diagnostics go to stderr so the log stays pipeable.
mod cli;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use battle_runtime::{BattleHandle, BattleRuntime, BattleSnapshot, Event, RuntimeConfig, Topic};
use cli::Cli;
use report::Summary;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    setup_logging();

    let config = cli.apply(RuntimeConfig::from_env())?;
    info!(
        turn_delay = %config.turn_delay,
        seed = ?config.seed,
        "Starting battle"
    );

    let runtime = BattleRuntime::builder()
        .config(config)
        .build()
        .context("failed to build battle runtime")?;
    let handle = runtime.handle();

    let printer = (!cli.json).then(|| spawn_log_printer(&handle));

    if !handle.start().await?.is_applied() {
        anyhow::bail!("battle runtime refused to start");
    }
    let snapshot = run_until_done(&handle).await?;

    drop(handle);
    runtime.shutdown().await?;
    if let Some(printer) = printer {
        printer.await?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", Summary::from_snapshot(&snapshot));
    }

    Ok(())
}

/// Waits for a winner, or resets the battle on Ctrl-C.
async fn run_until_done(handle: &BattleHandle) -> Result<BattleSnapshot> {
    tokio::select! {
        snapshot = handle.wait_for_finish() => Ok(snapshot?),
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl-C")?;
            warn!("Interrupted, resetting battle");
            let interrupted = handle.snapshot();
            handle.reset().await?;
            Ok(interrupted)
        }
    }
}

/// Prints log entries as the worker appends them.
///
/// Ends once the runtime has shut down and every event sender is gone.
fn spawn_log_printer(handle: &BattleHandle) -> JoinHandle<()> {
    let mut log_rx = handle.subscribe(Topic::Log);

    tokio::spawn(async move {
        loop {
            match log_rx.recv().await {
                Ok(Event::Log(entry)) => println!("{}", report::format_entry(&entry)),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Log printer fell behind, entries skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Setup logging to stderr
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
