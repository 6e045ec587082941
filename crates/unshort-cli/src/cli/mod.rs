//! CLI for the unshort URL expander.

mod commands;
mod prompt;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use unshort_core::config;
use unshort_core::output::OutputFormat;

use commands::{run_canonicalize, run_expand};

/// Top-level CLI for unshort.
#[derive(Debug, Parser)]
#[command(name = "unshort")]
#[command(about = "Expand short URLs, look up page titles and truncate the results", long_about = None)]
pub struct Cli {
    /// Defaults to `expand` when omitted.
    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Expand URLs pasted on stdin (or read from a file) and write the results.
    Expand(ExpandArgs),

    /// Print the truncated form of each URL (no network access).
    Canonicalize {
        /// URLs to normalize.
        #[arg(required = true)]
        urls: Vec<String>,
    },
}

#[derive(Debug, Default, Args)]
pub struct ExpandArgs {
    /// Output format; skips the interactive menu.
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Read URLs from this file instead of prompting on stdin.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory for urls.csv / urls.txt (default from config: "output").
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Do not ask the suggestion service about failed URLs.
    #[arg(long)]
    pub no_suggest: bool,

    /// Hide the progress spinner.
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Csv,
    #[value(alias = "txt")]
    Text,
    #[value(alias = "terminal")]
    Console,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Console => OutputFormat::Console,
        }
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command.unwrap_or(CliCommand::Expand(ExpandArgs::default())) {
            CliCommand::Expand(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_expand(&cfg, &args)?;
            }
            CliCommand::Canonicalize { urls } => run_canonicalize(&urls)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
