//! CLI for the torq torrent manager.

mod commands;
mod control_socket;

use anyhow::Result;
use clap::{Parser, Subcommand};
use torq_core::config;
use torq_core::store::Store;

use commands::{
    run_add, run_daemon, run_force, run_label, run_remove, run_status, run_stop, LabelAction,
};

/// Top-level CLI for the torq torrent manager.
#[derive(Debug, Parser)]
#[command(name = "torq")]
#[command(about = "torq: queued torrent manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Track a new torrent by magnet link.
    Add {
        /// Magnet link (btih).
        magnet: String,
    },

    /// Run the daemon: admission scheduler, lifecycle workers, control
    /// socket.
    Run {
        /// Override the configured number of concurrently active torrents.
        #[arg(long, value_name = "N")]
        max_active: Option<usize>,
    },

    /// Show all tracked torrents.
    Status,

    /// Stop a torrent. It keeps its data but needs an explicit re-add to
    /// run again.
    Stop {
        /// Torrent info-hash.
        hash: String,
    },

    /// Start a torrent immediately, ahead of the queue and the
    /// concurrency limit. Needs a running daemon.
    Force {
        /// Torrent info-hash.
        hash: String,
    },

    /// Forget a torrent (and optionally its downloaded data).
    Remove {
        /// Torrent info-hash.
        hash: String,
        /// Also delete the downloaded payload.
        #[arg(long)]
        with_data: bool,
    },

    /// Manage labels.
    Label {
        #[command(subcommand)]
        action: LabelAction,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let store = Store::open_default().await?;

        match cli.command {
            CliCommand::Add { magnet } => run_add(&store, &magnet).await?,
            CliCommand::Run { max_active } => {
                let mut cfg = cfg;
                if let Some(n) = max_active {
                    cfg.max_active = n;
                }
                run_daemon(cfg, store).await?;
            }
            CliCommand::Status => run_status(&store).await?,
            CliCommand::Stop { hash } => run_stop(&store, &hash).await?,
            CliCommand::Force { hash } => run_force(&hash).await?,
            CliCommand::Remove { hash, with_data } => {
                run_remove(&cfg, &store, &hash, with_data).await?;
            }
            CliCommand::Label { action } => run_label(&store, action).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
