//! API test scenarios
//!
//! Scenarios are grouped into suites, one per target service.
//!
//! ## Intake suite
//! - `intake::process_success`
//! - `intake::response_schema`
//! - `intake::catalog[<i>]` (one per catalog row)
//! - `intake::invalid_file_type`
//! - `intake::missing_file_url`
//!
//! ## Booking suite
//! - `booking::authenticate`
//! - `booking::list_bookings`
//! - `booking::unauthorized_update`
//!
//! A scenario body returns `anyhow::Result<()>`: `Ok` passes, a [`Skipped`]
//! error skips, any other error fails with its message.


pub use booking::BookingSuite;
pub use intake::IntakeSuite;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;
use crate::models::TestOutcome;
use crate::results::TestLogger;

/// Which suites a run covers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Suite {
    Intake,
    Booking,
    #[default]
    All,
}

impl Suite {
    pub fn includes_intake(&self) -> bool {
        matches!(self, Suite::Intake | Suite::All)
    }

    pub fn includes_booking(&self) -> bool {
        matches!(self, Suite::Booking | Suite::All)
    }
}

impl FromStr for Suite {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intake" => Ok(Suite::Intake),
            "booking" => Ok(Suite::Booking),
            "all" => Ok(Suite::All),
            other => anyhow::bail!("Unknown suite: {other} (expected intake, booking or all)"),
        }
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suite::Intake => write!(f, "intake"),
            Suite::Booking => write!(f, "booking"),
            Suite::All => write!(f, "all"),
        }
    }
}

/// Marks a scenario as skipped rather than failed
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Skipped(pub String);

/// Shorthand for returning a skip from a scenario body
pub fn skip(reason: impl Into<String>) -> anyhow::Error {
    Skipped(reason.into()).into()
}

/// Per-scenario state: the log plus the last request and response summaries
#[derive(Debug, Default)]
pub struct CaseContext {
    pub log: TestLogger,
    request: Option<String>,
    response: Option<String>,
}

impl CaseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an outgoing request and keep a summary for the report
    pub fn record_request(
        &mut self,
        method: &str,
        url: &str,
        params: Option<&Value>,
        body: Option<&Value>,
    ) {
        self.log.log_request(method, url, params, body);

        let mut summary = format!("{method} {url}");
        if let Some(params) = params {
            summary.push_str(&format!("\nQuery: {params}"));
        }
        if let Some(body) = body {
            summary.push_str(&format!("\nBody: {body}"));
        }
        self.request = Some(summary);
    }

    /// Log a response and keep a summary for the report
    pub fn record_response(&mut self, response: &HttpResponse) {
        let data = response.json_or_text();
        self.log.log_response(
            response.status_code,
            Some(&data),
            Some(response.duration_ms as f64),
        );

        let rendered = serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string());
        self.response = Some(format!(
            "Status {} ({}ms)\n{}",
            response.status_code, response.duration_ms, rendered
        ));
    }

    /// Turn a scenario result into its outcome and log report
    pub fn finish(self, name: &str, result: anyhow::Result<()>, duration_ms: u64) -> ScenarioRun {
        let mut outcome = outcome_from(name, result).with_duration(duration_ms);
        if let Some(request) = self.request {
            outcome = outcome.with_request(request);
        }
        if let Some(response) = self.response {
            outcome = outcome.with_response(response);
        }

        ScenarioRun {
            outcome,
            log_report: self.log.get_report(),
        }
    }
}

/// A finished scenario
#[derive(Clone, Debug)]
pub struct ScenarioRun {
    pub outcome: TestOutcome,
    pub log_report: String,
}

/// Classify a scenario result
pub fn outcome_from(name: &str, result: anyhow::Result<()>) -> TestOutcome {
    match result {
        Ok(()) => TestOutcome::passed(name),
        Err(e) => match e.downcast_ref::<Skipped>() {
            Some(Skipped(reason)) => TestOutcome::skipped(name, reason.clone()),
            None => TestOutcome::failed(name, format!("{e:#}")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeStatus;
    use std::collections::HashMap;

    #[test]
    fn test_suite_parse() {
        assert_eq!("intake".parse::<Suite>().unwrap(), Suite::Intake);
        assert_eq!("BOOKING".parse::<Suite>().unwrap(), Suite::Booking);
        assert_eq!("all".parse::<Suite>().unwrap(), Suite::All);
        assert!("gateway".parse::<Suite>().is_err());
        assert!(Suite::All.includes_intake() && Suite::All.includes_booking());
        assert!(!Suite::Intake.includes_booking());
    }

    #[test]
    fn test_outcome_classification() {
        assert_eq!(outcome_from("a", Ok(())).status, OutcomeStatus::Passed);

        let skipped = outcome_from("b", Err(skip("service unavailable")));
        assert_eq!(skipped.status, OutcomeStatus::Skipped);
        assert_eq!(skipped.error.as_deref(), Some("service unavailable"));

        let failed = outcome_from("c", Err(anyhow::anyhow!("Expected status 200, got 500")));
        assert_eq!(failed.status, OutcomeStatus::Failed);
        assert!(failed.error.unwrap().contains("got 500"));
    }

    #[test]
    fn test_skip_survives_context() {
        use anyhow::Context;
        let result: anyhow::Result<()> = Err(skip("no token")).context("authenticate");
        assert_eq!(outcome_from("d", result).status, OutcomeStatus::Skipped);
    }

    #[test]
    fn test_case_context_finish() {
        let mut ctx = CaseContext::new();
        ctx.record_request("POST", "http://localhost/process", None, Some(&serde_json::json!({})));
        ctx.record_response(&HttpResponse {
            status_code: 200,
            headers: HashMap::new(),
            body: r#"{"status":"SUCCESS"}"#.to_string(),
            duration_ms: 12,
        });
        assert!(ctx.request.as_deref().unwrap().starts_with("POST http://localhost/process"));
        assert!(ctx.response.as_deref().unwrap().starts_with("Status 200"));

        let run = ctx.finish("intake::process_success", Ok(()), 15);
        assert_eq!(run.outcome.status, OutcomeStatus::Passed);
        assert_eq!(run.outcome.duration_ms, 15);
        assert!(run.outcome.response.unwrap().contains("SUCCESS"));
        assert!(run.log_report.contains("RESPONSE: Status 200"));
    }
}
