use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "instrumap")]
#[command(
    about = "Select instrumentation candidates and diff mutation testing classifications",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./.instrumap.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Only log warnings and errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,

    /// Disable colored console output
    #[arg(long, global = true)]
    pub plain: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Select instrumentation candidates from an extracted method list
    Filter {
        /// Path to the extracted method list (CSV)
        methods: PathBuf,

        /// Directory the candidate file is written to
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,

        /// Drop rows with malformed tags instead of aborting
        #[arg(long = "skip-invalid")]
        skip_invalid: bool,
    },

    /// Check the classification of invoked methods against Descartes reports
    #[command(
        after_help = "Example: instrumap diff -i invoked-methods.csv -d methods.json -o result.csv"
    )]
    Diff {
        /// Path to invoked-methods.csv
        #[arg(short = 'i', long = "invoked-methods")]
        invoked_methods: PathBuf,

        /// Path to a methods.json report (can be specified multiple times)
        #[arg(short = 'd', long = "descartes-report")]
        descartes_reports: Vec<PathBuf>,

        /// Folder searched recursively for methods.json reports (can be specified multiple times)
        #[arg(long = "descartes-folder", visible_alias = "reports-dir")]
        descartes_folders: Vec<PathBuf>,

        /// Output CSV file (default: ./invoked-methods-result.csv)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Also write the transition histogram as JSON
        #[arg(long = "summary-json")]
        summary_json: Option<PathBuf>,

        /// Drop rows that cannot be classified instead of aborting
        #[arg(long = "skip-invalid")]
        skip_invalid: bool,
    },
}

impl Cli {
    /// Log filter derived from the verbosity flags.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Warn;
        }
        match self.verbosity {
            0 => log::LevelFilter::Info,
            1 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
