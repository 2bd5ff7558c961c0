//! Results logging, storage and reporting module
//!
//! Per-scenario logs, persisted run summaries and HTML report generation.

mod logger;
mod report;
mod storage;

pub use logger::TestLogger;
pub use report::{ReportGenerator, DEFAULT_REPORT_PATH};
pub use storage::{generate_run_id, ResultsStorage};
