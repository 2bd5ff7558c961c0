//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Integration test harness for the document-intake and booking APIs
#[derive(Parser, Debug)]
#[command(name = "intake-harness")]
#[command(version = "0.1.0")]
#[command(about = "Run integration scenarios against the intake and booking APIs")]
#[command(long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run test scenarios
    Run(RunArgs),

    /// List catalog entries and scenarios
    List(ListArgs),

    /// Print the query parameters for a catalog entry or explicit values
    Payload(PayloadArgs),

    /// Regenerate the HTML report from a stored run
    Report(ReportArgs),

    /// Show recognised environment variables and their values
    Env,

    /// Show or create configuration files
    Config(ConfigArgs),
}

/// Arguments for run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Suite to run (intake, booking, all)
    #[arg(short, long, default_value = "all")]
    pub suite: String,

    /// Only run scenarios whose name contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Output format (table, json, json-pretty, csv, summary)
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// HTML report path (overrides config)
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Do not write the HTML report
    #[arg(long, conflicts_with = "report")]
    pub no_report: bool,

    /// Store the run summary for later `report` calls
    #[arg(long)]
    pub save: bool,

    /// Write the concatenated scenario logs to this file
    #[arg(long)]
    pub logs: Option<PathBuf>,

    /// Intake service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Booking service base URL
    #[arg(long)]
    pub booking_url: Option<String>,

    /// Intake request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Arguments for list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Show file URLs and identifiers for each catalog entry
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for payload command
#[derive(Parser, Debug)]
pub struct PayloadArgs {
    /// Catalog file id
    #[arg(required_unless_present = "custom")]
    pub file_id: Option<String>,

    /// Explicit values instead of a catalog lookup
    #[arg(
        long,
        num_args = 5,
        value_names = ["FILE_URL", "FILE_TYPE", "FILE_ID", "BUILDER_ID", "ENTITY_ID"],
        conflicts_with = "file_id"
    )]
    pub custom: Option<Vec<String>>,
}

/// Arguments for report command
#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Stored run: a JSON file path or a run id (latest run when omitted)
    #[arg(short, long)]
    pub input: Option<String>,

    /// HTML output path (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as YAML
    Show,

    /// Write an example configuration file
    Init {
        /// Destination path
        #[arg(default_value = "intake-harness.yaml")]
        path: PathBuf,
    },
}
