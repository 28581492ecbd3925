use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use weekly_review_core::ReviewMode;

#[derive(Parser)]
#[command(name = "weekly-review")]
#[command(version)]
#[command(about = "AI review of weekly markdown reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze this week's report, write the AI summary and notify
    Run {
        /// Review depth; auto picks detailed on Friday to Sunday
        #[arg(long, value_enum, default_value_t = ModeArg::Auto)]
        mode: ModeArg,

        /// Vault root (overrides VAULT_PATH)
        #[arg(long)]
        vault: Option<String>,

        /// Print the rendered section instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Skip desktop and LINE notifications
        #[arg(long)]
        no_notify: bool,
    },

    /// Print the parsed summary of a weekly report
    Show {
        /// Use last week's report
        #[arg(long)]
        previous: bool,

        /// Read this file instead of resolving the week
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print JSON
        #[arg(long)]
        json: bool,

        /// Vault root (overrides VAULT_PATH)
        #[arg(long)]
        vault: Option<String>,
    },

    /// Print the expected path of a weekly report
    Locate {
        /// Use last week's report
        #[arg(long)]
        previous: bool,

        /// Vault root (overrides VAULT_PATH)
        #[arg(long)]
        vault: Option<String>,
    },

    /// Print version information
    Version,
}

impl Commands {
    /// Vault override given on the command line, if any
    pub fn vault(&self) -> Option<&str> {
        match self {
            Commands::Run { vault, .. }
            | Commands::Show { vault, .. }
            | Commands::Locate { vault, .. } => vault.as_deref(),
            Commands::Version => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Auto,
    Quick,
    Detailed,
}

impl ModeArg {
    pub fn resolve(self, today: NaiveDate) -> ReviewMode {
        match self {
            ModeArg::Auto => ReviewMode::for_date(today),
            ModeArg::Quick => ReviewMode::Quick,
            ModeArg::Detailed => ReviewMode::Detailed,
        }
    }
}
