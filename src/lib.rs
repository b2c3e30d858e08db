// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, WatchConfig};
use crate::engine::{Coalescer, WatchLoop};
use crate::errors::Result;
use crate::exec::{Dispatcher, ProcessRunner, RealProcessRunner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::path_utils::watch_path;
use crate::watch::{scan, EventStreams, NotificationCapability, NotifyCapability, Subscription};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (command line + optional `Swatch.toml`)
/// - dry-run output
/// - the watch pipeline
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> anyhow::Result<()> {
    let cfg = load_and_validate(&args)?;
    let fs = RealFileSystem;

    if args.dry_run {
        print_dry_run(&cfg, &fs)?;
        return Ok(());
    }

    tokio::select! {
        res = watch(&cfg, &fs) => res.map_err(anyhow::Error::from),
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("interrupted; shutting down");
            Ok(())
        }
    }
}

/// Run the full pipeline with the real `notify` backend and real processes.
///
/// Only returns on a fatal condition: an unscannable root, a backend that
/// cannot be created, or a lost notification stream.
pub async fn watch(config: &WatchConfig, fs: &dyn FileSystem) -> Result<()> {
    watch_with(config, fs, NotifyCapability::create, RealProcessRunner::new()).await
}

/// [`watch`] with an injected notification backend and process runner.
///
/// scan -> subscribe -> coalesce/dispatch loop. The subscription is
/// released before this returns, whatever the outcome.
pub async fn watch_with<N, F, R>(
    config: &WatchConfig,
    fs: &dyn FileSystem,
    create_capability: F,
    runner: R,
) -> Result<()>
where
    N: NotificationCapability,
    F: FnOnce() -> Result<(N, EventStreams)>,
    R: ProcessRunner,
{
    let dirs = scan(fs, &config.root, &config.exclusions)?;
    let targets: Vec<PathBuf> = dirs.iter().map(|d| watch_path(&config.root, d)).collect();
    debug!(?targets, "watch targets");

    let (mut subscription, streams) = Subscription::open(create_capability, &targets)?;

    let dispatcher = Dispatcher::new(Arc::new(config.command.clone()), runner);
    let watch_loop = WatchLoop::new(Coalescer::new(config.debounce), streams, dispatcher);

    let result = watch_loop.run().await;
    subscription.close();
    result
}

/// Dry-run output: resolved config and the directories that would be watched.
fn print_dry_run(cfg: &WatchConfig, fs: &dyn FileSystem) -> Result<()> {
    let dirs = scan(fs, &cfg.root, &cfg.exclusions)?;

    println!("swatch dry-run");
    println!("  directory: {}", cfg.root.display());
    println!("  debounce: {}ms", cfg.debounce.as_millis());
    println!(
        "  exclude: {}",
        cfg.exclusions.iter().collect::<Vec<_>>().join(", ")
    );
    println!(
        "  command: {} {}",
        cfg.command.program,
        cfg.command.args.join(" ")
    );
    println!();

    println!("directories ({}):", dirs.len());
    for dir in &dirs {
        println!("  - {dir}");
    }

    debug!("dry-run complete (nothing watched)");
    Ok(())
}
