//! Per-scenario request/response log
//!
//! An append-only list of timestamped entries, one logger per scenario.
//! Entries are mirrored to `tracing` and can be rendered as a text report.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;
use tracing::{debug, error, info, trace, warn};

use crate::utils::logger::LogLevel;

/// A single log line
#[derive(Clone, Debug, Serialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// In-memory scenario log
#[derive(Clone, Debug)]
pub struct TestLogger {
    entries: Vec<LogEntry>,
    start_time: DateTime<Local>,
}

impl TestLogger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            start_time: Local::now(),
        }
    }

    /// Append a message at INFO
    pub fn log(&mut self, message: impl Into<String>) {
        self.log_at(LogLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.log_at(LogLevel::Warn, message);
    }

    /// Append a message at the given level
    pub fn log_at(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Trace => trace!("{}", message),
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info => info!("{}", message),
            LogLevel::Warn => warn!("{}", message),
            LogLevel::Error => error!("{}", message),
        }
        self.entries.push(LogEntry {
            timestamp: Local::now(),
            level,
            message,
        });
    }

    /// Record an outgoing request
    pub fn log_request(
        &mut self,
        method: &str,
        url: &str,
        params: Option<&Value>,
        json_body: Option<&Value>,
    ) {
        self.log(format!("REQUEST: {method} {url}"));
        if let Some(params) = params.filter(|v| !is_empty_value(v)) {
            self.log(format!("  Query Params: {params}"));
        }
        if let Some(body) = json_body.filter(|v| !is_empty_value(v)) {
            self.log(format!("  Body: {body}"));
        }
    }

    /// Record a received response
    pub fn log_response(&mut self, status: u16, data: Option<&Value>, response_time_ms: Option<f64>) {
        self.log(format!("RESPONSE: Status {status}"));
        if let Some(ms) = response_time_ms.filter(|ms| *ms > 0.0) {
            self.log(format!("  Response Time: {ms:.2}ms"));
        }
        if let Some(data) = data.filter(|v| !is_empty_value(v)) {
            self.log(format!("  Data: {data}"));
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render all entries as a plain-text report.
    ///
    /// Always `len() + 6` lines; newlines inside messages
    /// are escaped.
    pub fn get_report(&self) -> String {
        let mut report = String::new();
        let _ = writeln!(report, "Test Execution Report");
        let _ = writeln!(report, "Start Time: {}", self.start_time.to_rfc3339());
        let _ = writeln!(report, "End Time: {}", Local::now().to_rfc3339());
        let _ = writeln!(report, "Total Logs: {}", self.len());
        let _ = writeln!(report);
        let _ = writeln!(report, "Logs:");
        for entry in self.entries() {
            let _ = writeln!(
                report,
                "[{}] [{}] {}",
                entry.timestamp.to_rfc3339(),
                entry.level,
                entry.message.replace('\r', "\\r").replace('\n', "\\n")
            );
        }
        report
    }
}

impl Default for TestLogger {
    fn default() -> Self {
        Self::new()
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
