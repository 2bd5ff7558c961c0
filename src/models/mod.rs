//! Data models for API testing
//!
//! Scenario outcomes and typed views of service responses.

mod intake;
mod test_result;

pub use intake::{ProcessResponse, ValidationErrorBody};
pub use test_result::{OutcomeCounts, OutcomeStatus, RunSummary, TestOutcome};
