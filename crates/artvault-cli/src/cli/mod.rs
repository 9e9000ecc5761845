//! CLI for the artvault image downloader.
//!
//! One process invocation is one session: every URL given to a single command
//! shares the same version lineage and download order.

mod commands;

use anyhow::Result;
use artvault_core::config::{self, VaultConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_batch, run_fetch, run_split};

/// Top-level CLI for artvault.
#[derive(Debug, Parser)]
#[command(name = "artvault")]
#[command(about = "artvault: versioned, deduplicating image downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Options shared by commands that download.
#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Version lineage name (default from config, normally "downloaded_images").
    #[arg(long, value_name = "NAME")]
    pub logical_name: Option<String>,

    /// Write artifact bytes to this directory instead of keeping them in memory.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

impl SessionArgs {
    /// Config with command-line overrides applied.
    pub fn apply(&self, mut cfg: VaultConfig) -> VaultConfig {
        if let Some(name) = &self.logical_name {
            cfg.logical_name = name.clone();
        }
        if let Some(dir) = &self.output_dir {
            cfg.output_dir = Some(dir.clone());
        }
        cfg
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download one or more single image URLs (one `download_one` call each).
    Fetch {
        /// Direct HTTP/HTTPS image URLs.
        #[arg(required = true)]
        urls: Vec<String>,

        #[command(flatten)]
        session: SessionArgs,

        /// Re-issue transient failures using the `[retry]` policy from config.
        #[arg(long)]
        retry: bool,
    },

    /// Download free-form URL lists (one `download_batch` call per argument).
    Batch {
        /// URL list, separated by ", ", commas or whitespace.
        #[arg(required = true)]
        inputs: Vec<String>,

        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show how a free-form URL list is split, one URL per line.
    Split {
        /// URL list to parse.
        input: String,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                urls,
                session,
                retry,
            } => {
                let cfg = session.apply(config::load_or_init()?);
                tracing::debug!("loaded config: {:?}", cfg);
                run_fetch(&cfg, &urls, retry).await?;
            }
            CliCommand::Batch { inputs, session } => {
                let cfg = session.apply(config::load_or_init()?);
                tracing::debug!("loaded config: {:?}", cfg);
                run_batch(&cfg, &inputs).await?;
            }
            CliCommand::Split { input } => run_split(&input)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
