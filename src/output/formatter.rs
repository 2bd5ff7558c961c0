//! Output formatters for run results
//!
//! Table, JSON, CSV and one-line summary renderings of a `RunSummary`.

use crate::models::{OutcomeStatus, RunSummary, TestOutcome};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single scenario outcome
    pub fn format_outcome(&self, outcome: &TestOutcome) -> String {
        match self.format {
            OutputFormat::Table => self.format_outcome_table(outcome),
            OutputFormat::Json => serde_json::to_string(outcome).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(outcome).unwrap_or_default(),
            OutputFormat::Csv => format_outcome_csv(outcome),
            OutputFormat::Summary => format!(
                "{} {} ({}ms)",
                outcome.status.symbol(),
                outcome.name,
                outcome.duration_ms
            ),
        }
    }

    fn status_label(&self, status: OutcomeStatus) -> String {
        let label = format!("{} {}", status.symbol(), status);
        if !self.colorize {
            return label;
        }
        let color = match status {
            OutcomeStatus::Passed => "32",
            OutcomeStatus::Failed => "31",
            OutcomeStatus::Skipped => "33",
        };
        format!("\x1b[{color}m{label}\x1b[0m")
    }

    fn format_outcome_table(&self, outcome: &TestOutcome) -> String {
        let mut line = format!(
            "{:34} {} [{:>6}ms]",
            outcome.name,
            self.status_label(outcome.status),
            outcome.duration_ms
        );
        if outcome.status != OutcomeStatus::Passed {
            if let Some(error) = &outcome.error {
                line.push_str(&format!("\n      {error}"));
            }
        }
        line
    }

    /// Format a run summary
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => format_summary_csv(summary),
            OutputFormat::Summary => format!(
                "{}: {}/{} passed, {} failed, {} skipped ({:.1}%) in {}ms",
                summary.label,
                summary.passed,
                summary.total,
                summary.failed,
                summary.skipped,
                summary.pass_rate(),
                summary.total_duration_ms
            ),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let mut output = String::new();

        output.push_str("\n══════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(" Run {} - {}\n", summary.id, summary.label));
        output.push_str("══════════════════════════════════════════════════════════════\n");

        for outcome in &summary.outcomes {
            output.push_str(&format!(" {}\n", self.format_outcome_table(outcome)));
        }

        output.push_str("──────────────────────────────────────────────────────────────\n");

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            " Total: {} | Passed: {} | Failed: {} | Skipped: {}\n",
            summary.total, pass_str, fail_str, summary.skipped
        ));
        output.push_str(&format!(
            " Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));

        output
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

const CSV_HEADER: [&str; 4] = ["name", "status", "duration_ms", "error"];

fn write_csv(outcomes: &[TestOutcome], header: bool) -> csv::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if header {
        writer.write_record(CSV_HEADER)?;
    }
    for outcome in outcomes {
        let duration = outcome.duration_ms.to_string();
        writer.write_record([
            outcome.name.as_str(),
            outcome.status.as_str(),
            duration.as_str(),
            outcome.error.as_deref().unwrap_or(""),
        ])?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_outcome_csv(outcome: &TestOutcome) -> String {
    write_csv(std::slice::from_ref(outcome), false)
        .map(|line| line.trim_end().to_string())
        .unwrap_or_default()
}

fn format_summary_csv(summary: &RunSummary) -> String {
    write_csv(&summary.outcomes, true).unwrap_or_default()
}
