//! Test execution engine
//!
//! Runs the selected suites one scenario at a time.

mod runner;

pub use runner::TestRunner;
