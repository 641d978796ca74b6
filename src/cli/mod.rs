//! CLI for procbar.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use procbar::config::{self, ProcbarConfig};
use procbar::TrackerOption;
use std::path::PathBuf;

use commands::{run_copy, run_simulate};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "procbar")]
#[command(about = "procbar: in-place terminal progress bar for byte-counted I/O", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub bar: BarArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Bar appearance flags shared by every subcommand. They override config.toml.
#[derive(Debug, Default, Args)]
pub struct BarArgs {
    /// Label shown left of the bar.
    #[arg(long, global = true)]
    pub prefix: Option<String>,

    /// Leave the finished bar on screen followed by a newline.
    #[arg(long, global = true)]
    pub keep: bool,

    /// Use the configured bar width instead of fitting the terminal.
    #[arg(long, global = true)]
    pub fixed_width: bool,

    /// Source URL; with --show-file-name its last path segment becomes the label.
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Label the bar with the file name taken from --url.
    #[arg(long, global = true)]
    pub show_file_name: bool,

    /// Do not draw the bar.
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Read settings from this file instead of ~/.config/procbar/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl BarArgs {
    /// Config file options first, then the flags that were given.
    pub fn options(&self, cfg: &ProcbarConfig) -> Vec<TrackerOption> {
        let mut opts = cfg.options();
        if let Some(prefix) = &self.prefix {
            opts.push(TrackerOption::Prefix(prefix.clone()));
        }
        if self.keep {
            opts.push(TrackerOption::CleanAfterFinish(false));
        }
        if self.fixed_width {
            opts.push(TrackerOption::FullWidth(false));
        }
        if let Some(url) = &self.url {
            opts.push(TrackerOption::Url(url.clone()));
        }
        if self.show_file_name {
            opts.push(TrackerOption::ShowFileName(true));
        }
        if self.quiet {
            opts.push(TrackerOption::Invisible(true));
        }
        opts
    }

    fn load_config(&self) -> Result<ProcbarConfig> {
        match &self.config {
            Some(path) => config::load_from(path),
            None => config::load_or_init(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Copy a file, drawing progress by bytes written.
    Copy {
        /// Source file.
        src: PathBuf,
        /// Destination file (created or truncated).
        dst: PathBuf,
    },

    /// Feed synthetic units to the bar, for trying out settings.
    Simulate {
        /// Total units.
        #[arg(long)]
        total: u64,
        /// Units per step.
        #[arg(long, default_value = "4096")]
        chunk: u64,
        /// Pause between steps in milliseconds.
        #[arg(long, default_value = "10", value_name = "MS")]
        delay_ms: u64,
    },
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.bar.load_config()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let opts = cli.bar.options(&cfg);

        match cli.command {
            CliCommand::Copy { src, dst } => run_copy(&src, &dst, opts)?,
            CliCommand::Simulate {
                total,
                chunk,
                delay_ms,
            } => run_simulate(total, chunk, delay_ms, opts)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
