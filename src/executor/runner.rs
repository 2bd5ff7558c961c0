//! Test execution runner
//!
//! Runs the intake and booking suites in order. Each scenario gets its own
//! log; outcomes are collected into a `RunSummary`.

use anyhow::Result;
use chrono::Utc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::config::HarnessConfig;
use crate::models::{OutcomeStatus, RunSummary};
use crate::results::generate_run_id;
use crate::tests::{BookingSuite, CaseContext, IntakeSuite, ScenarioRun, Suite};
use crate::utils::timer::Timer;

/// Result of a full run: the summary plus each scenario's log report
#[derive(Clone, Debug)]
pub struct RunReport {
    pub summary: RunSummary,
    /// `(scenario name, log report)` in run order
    pub logs: Vec<(String, String)>,
}

impl RunReport {
    /// All scenario logs concatenated, each under a header line
    pub fn combined_logs(&self) -> String {
        let mut combined = String::new();
        for (name, report) in &self.logs {
            combined.push_str(&format!("===== {name} =====\n"));
            combined.push_str(report);
            combined.push('\n');
        }
        combined
    }
}

/// Sequential scenario runner
pub struct TestRunner {
    config: HarnessConfig,
    suite: Suite,
    filter: Option<String>,
}

impl TestRunner {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            suite: Suite::All,
            filter: None,
        }
    }

    /// Restrict the run to one suite
    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.suite = suite;
        self
    }

    /// Only run scenarios whose name contains `filter`
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }

    fn selects(&self, name: &str) -> bool {
        self.filter.as_deref().map_or(true, |f| name.contains(f))
    }

    /// Names of the scenarios this runner would execute
    pub fn scenario_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        if self.suite.includes_intake() {
            let intake = IntakeSuite::new(&self.config.intake)?;
            names.extend(intake.scenarios().iter().map(ToString::to_string));
        }
        if self.suite.includes_booking() {
            let booking = BookingSuite::new(&self.config.booking)?;
            names.extend(booking.scenarios().iter().map(ToString::to_string));
        }
        names.retain(|name| self.selects(name));
        Ok(names)
    }

    /// Run all selected scenarios
    pub async fn run(&self) -> Result<RunReport> {
        info!("Starting {} suite run", self.suite);
        let started_at = Utc::now();
        let start = Instant::now();
        let mut runs = Vec::new();

        if self.suite.includes_intake() {
            let intake = IntakeSuite::new(&self.config.intake)?;
            info!("Intake service: {}", self.config.intake.base_url);

            for scenario in intake.scenarios() {
                let name = scenario.to_string();
                if !self.selects(&name) {
                    continue;
                }
                let mut ctx = CaseContext::new();
                let timer = Timer::start(name.as_str());
                info!("Running {}", name);
                let result = intake.run(scenario, &mut ctx).await;
                runs.push(finish(&name, ctx, result, timer));
            }
        }

        if self.suite.includes_booking() {
            let mut booking = BookingSuite::new(&self.config.booking)?;
            info!("Booking service: {}", self.config.booking.base_url);

            for scenario in booking.scenarios() {
                let name = scenario.to_string();
                if !self.selects(&name) {
                    continue;
                }
                let mut ctx = CaseContext::new();
                let timer = Timer::start(name.as_str());
                info!("Running {}", name);
                let result = booking.run(scenario, &mut ctx).await;
                runs.push(finish(&name, ctx, result, timer));
            }
        }

        if runs.is_empty() {
            warn!("No scenarios matched the selection");
        }

        let logs = runs
            .iter()
            .map(|run| (run.outcome.name.clone(), run.log_report.clone()))
            .collect();
        let outcomes = runs.into_iter().map(|run| run.outcome).collect();
        let summary = RunSummary::new(
            generate_run_id(),
            format!("{} suite", self.suite),
            started_at,
            outcomes,
        );

        info!(
            "Run completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate()
        );

        Ok(RunReport { summary, logs })
    }
}

fn finish(name: &str, ctx: CaseContext, result: Result<()>, timer: Timer) -> ScenarioRun {
    let run = ctx.finish(name, result, timer.elapsed_ms());
    match run.outcome.status {
        OutcomeStatus::Failed => error!("  {}", run.outcome),
        _ => info!("  {}", run.outcome),
    }
    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        config.intake.base_url = server.uri();
        config.intake.endpoint = "/process".to_string();
        config.intake.timeout_ms = 2_000;
        config.intake.processing_timeout_ms = 2_000;
        config.booking.base_url = server.uri();
        config.booking.timeout_secs = 2;
        config
    }

    #[test]
    fn test_scenario_names_with_filter() {
        let runner = TestRunner::new(HarnessConfig::default());
        let all = runner.scenario_names().unwrap();
        assert!(all.contains(&"intake::process_success".to_string()));
        assert!(all.contains(&"booking::unauthorized_update".to_string()));

        let runner = TestRunner::new(HarnessConfig::default())
            .with_suite(Suite::Intake)
            .with_filter(Some("catalog".to_string()));
        let names = runner.scenario_names().unwrap();
        assert!(!names.is_empty());
        assert!(names.iter().all(|n| n.starts_with("intake::catalog[")));
    }

    #[test]
    fn test_empty_filter_selects_everything() {
        let runner = TestRunner::new(HarnessConfig::default()).with_filter(Some(String::new()));
        assert!(runner.selects("booking::authenticate"));
    }

    #[tokio::test]
    async fn test_run_collects_outcomes_and_logs() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": [] })))
            .mount(&server)
            .await;

        let runner = TestRunner::new(config_for(&server))
            .with_suite(Suite::Intake)
            .with_filter(Some("invalid_file_type".to_string()));
        let report = runner.run().await.unwrap();

        assert_eq!(report.summary.total, 1);
        assert_eq!(report.summary.passed, 1);
        assert!(!report.summary.has_failures());
        assert_eq!(report.logs.len(), 1);
        assert!(report.combined_logs().starts_with("===== intake::invalid_file_type ====="));
        assert!(report.combined_logs().contains("RESPONSE: Status 422"));
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_raised() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let runner = TestRunner::new(config_for(&server))
            .with_suite(Suite::Intake)
            .with_filter(Some("process_success".to_string()));
        let report = runner.run().await.unwrap();

        assert_eq!(report.summary.failed, 1);
        assert!(report.summary.has_failures());
        let error = report.summary.outcomes[0].error.as_deref().unwrap();
        assert!(error.contains("got 500"));
    }

    #[tokio::test]
    async fn test_booking_suite_runs_after_intake() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "detail": [] })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/booking"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let runner = TestRunner::new(config_for(&server))
            .with_filter(Some("i".to_string()));
        let report = runner.run().await.unwrap();
        let names: Vec<&str> = report
            .summary
            .outcomes
            .iter()
            .map(|o| o.name.as_str())
            .collect();

        let first_booking = names.iter().position(|n| n.starts_with("booking::")).unwrap();
        assert!(names[..first_booking].iter().all(|n| n.starts_with("intake::")));
    }
}
