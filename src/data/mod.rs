//! Test data for the intake API
//!
//! Static catalog of document fixtures and the query-parameter builder
//! that turns them into request payloads.

mod catalog;
mod payload;

pub use catalog::{Catalog, TestCase};
pub use payload::{PayloadBuilder, QueryParams};
