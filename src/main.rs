//! intake-harness - integration test harness for HTTP APIs
//!
//! Runs scenario suites against a document-intake service and a
//! booking-demo service, logs every request and response, and writes an
//! HTML report.
//!
//! ## Features
//!
//! - Intake scenarios: processing success, response schema, one scenario per
//!   catalog entry, and validation errors
//! - Booking scenarios: login, listing, and rejection of unauthenticated updates
//! - Layered configuration (file, environment, `.env`, CLI flags)
//! - Multiple output formats (Table, JSON, CSV, summary)
//! - Stored run summaries and report regeneration
//!
//! ## Usage
//!
//! ```bash
//! # Run everything
//! intake-harness run
//!
//! # Run only the catalog scenarios against a local service
//! intake-harness run --suite intake --filter catalog --base-url http://localhost:8000
//!
//! # Show the query parameters for a catalog entry
//! intake-harness payload abcd1234
//!
//! # Rebuild the HTML report from the latest stored run
//! intake-harness report
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

mod cli;
mod config;
mod data;
mod executor;
mod http;
mod models;
mod output;
mod results;
mod tests;
mod utils;

use cli::Args;
use config::{HarnessConfig, CONFIG_LOCATIONS};
use data::{Catalog, PayloadBuilder};
use executor::TestRunner;
use output::{OutputFormat, ResultFormatter};
use results::{ReportGenerator, ResultsStorage};
use utils::logger::{init_logger, LogLevel};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logger(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let config_path = args.config.as_deref();

    match args.command {
        cli::Command::Run(run_args) => {
            run_scenarios(run_args, config_path).await?;
        }
        cli::Command::List(list_args) => {
            list_scenarios(list_args, config_path)?;
        }
        cli::Command::Payload(payload_args) => {
            show_payload(payload_args)?;
        }
        cli::Command::Report(report_args) => {
            regenerate_report(report_args, config_path)?;
        }
        cli::Command::Env => {
            show_env();
        }
        cli::Command::Config(config_args) => {
            manage_config(config_args, config_path)?;
        }
    }

    Ok(())
}

async fn run_scenarios(args: cli::RunArgs, config_path: Option<&Path>) -> Result<()> {
    let mut config = HarnessConfig::resolve(config_path)?;
    if let Some(url) = args.base_url {
        config.intake.base_url = url;
    }
    if let Some(url) = args.booking_url {
        config.booking.base_url = url;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.intake.timeout_ms = timeout_ms;
    }

    let suite: tests::Suite = args.suite.parse()?;
    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow::anyhow!("Unknown output format: {}", args.format))?;

    info!(
        "Running {} suite (intake: {}, booking: {})",
        suite, config.intake.base_url, config.booking.base_url
    );

    let runner = TestRunner::new(config.clone())
        .with_suite(suite)
        .with_filter(args.filter);
    let report = runner.run().await?;

    let mut formatter = ResultFormatter::new(format);
    if !std::io::stdout().is_terminal() {
        formatter = formatter.no_color();
    }
    if format == OutputFormat::Summary {
        for outcome in &report.summary.outcomes {
            println!("{}", formatter.format_outcome(outcome));
        }
    }
    println!("{}", formatter.format_summary(&report.summary));

    if !args.no_report {
        let path = args
            .report
            .unwrap_or_else(|| PathBuf::from(&config.report.html_path));
        report_generator(&config).write(&report.summary.outcomes, &path)?;
    }

    if let Some(path) = args.logs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(&path, report.combined_logs())
            .with_context(|| format!("Failed to write logs: {}", path.display()))?;
        info!("Scenario logs written to {}", path.display());
    }

    if args.save {
        let saved = results_storage(&config).save(&report.summary)?;
        println!("✓ Run {} saved to {}", report.summary.id, saved.display());
    }

    if report.summary.has_failures() {
        anyhow::bail!(
            "{} of {} scenarios failed",
            report.summary.failed,
            report.summary.total
        );
    }

    Ok(())
}

fn list_scenarios(args: cli::ListArgs, config_path: Option<&Path>) -> Result<()> {
    let config = HarnessConfig::resolve(config_path)?;
    let catalog = Catalog::builtin();

    println!("\nIntake Catalog ({} entries)\n", catalog.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    for (index, case) in catalog.all().iter().enumerate() {
        println!("  [{index}] {:10} {}", case.file_type, case.description);
        if args.detailed {
            println!(
                "      file_id: {}  builder_id: {}  entity_id: {}",
                case.file_id, case.builder_id, case.entity_id
            );
            println!("      file_url: {}", case.file_url);
        }
    }

    let duplicates = catalog.duplicate_ids();
    if !duplicates.is_empty() {
        warn!(
            "Duplicate file ids in catalog: {} (lookups by id return the first entry)",
            duplicates.join(", ")
        );
    }

    println!("\nScenarios:");
    println!("──────────────────────────────────────────────────────────────────────");
    for name in TestRunner::new(config).scenario_names()? {
        println!("  {name}");
    }
    println!();

    Ok(())
}

fn show_payload(args: cli::PayloadArgs) -> Result<()> {
    let params = match (args.custom, args.file_id) {
        (Some(values), _) => {
            let [file_url, file_type, file_id, builder_id, entity_id]: [String; 5] = values
                .try_into()
                .map_err(|v: Vec<String>| {
                    anyhow::anyhow!("--custom expects 5 values, got {}", v.len())
                })?;
            PayloadBuilder::build_query_params_custom(
                file_url, file_type, file_id, builder_id, entity_id,
            )
        }
        (None, Some(file_id)) => PayloadBuilder::new(Catalog::builtin()).build_query_params(&file_id)?,
        (None, None) => anyhow::bail!("Provide a file id or --custom values"),
    };

    println!("{}", serde_json::to_string_pretty(&params.to_value())?);
    Ok(())
}

fn regenerate_report(args: cli::ReportArgs, config_path: Option<&Path>) -> Result<()> {
    let config = HarnessConfig::resolve(config_path)?;
    let storage = results_storage(&config);

    let run = match args.input {
        Some(input) if Path::new(&input).exists() => {
            ResultsStorage::load_from_path(Path::new(&input))?
        }
        Some(run_id) => storage.load(&run_id)?,
        None => storage.latest()?.with_context(|| {
            format!(
                "No stored runs in {}. Run with --save first.",
                storage.base_dir().display()
            )
        })?,
    };

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.report.html_path));
    let written = report_generator(&config).write(&run.outcomes, &output)?;

    println!("✓ Report for run {} written to {}", run.id, written.display());
    print!("{run}");
    Ok(())
}

fn show_env() {
    config::print_env_help();
    println!();

    let env = config::EnvConfig::load();
    if env.has_any() {
        env.print_summary();
    } else {
        println!("No harness environment variables are set.");
    }
}

fn manage_config(args: cli::ConfigArgs, config_path: Option<&Path>) -> Result<()> {
    match args.action {
        cli::ConfigAction::Show => {
            match config_path
                .map(Path::to_path_buf)
                .or_else(config::find_config_file)
            {
                Some(path) => println!("# Config file: {}", path.display()),
                None => println!(
                    "# No config file found (searched: {})",
                    CONFIG_LOCATIONS.join(", ")
                ),
            }
            let config = HarnessConfig::resolve(config_path)?;
            println!("{}", serde_yaml::to_string(&config)?);
        }

        cli::ConfigAction::Init { path } => {
            if path.exists() {
                anyhow::bail!("Configuration file already exists: {}", path.display());
            }

            HarnessConfig::default().save(&path)?;
            println!("✓ Configuration file created: {}", path.display());
            println!("\nEdit the file to customize your settings.");
        }
    }

    Ok(())
}

fn report_generator(config: &HarnessConfig) -> ReportGenerator {
    ReportGenerator::new()
        .title(config.report.title.as_str())
        .endpoint(format!(
            "{}{}",
            config.intake.base_url, config.intake.endpoint
        ))
}

fn results_storage(config: &HarnessConfig) -> ResultsStorage {
    match &config.report.results_dir {
        Some(dir) => ResultsStorage::new(config::expand_path(dir)),
        None => ResultsStorage::default_dir(),
    }
}
