//! HTTP client module
//!
//! Authenticated client used by the intake and booking suites.

mod client;
mod token;

pub use client::{ApiClient, ClientError, HttpResponse, RequestOptions};
