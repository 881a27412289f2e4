//! Parse raw web-hosting access logs into typed records, convert them to CSV
//! or JSON, and search them with exact field/value predicates.

pub mod batch;
pub mod cli;
pub mod error;
pub mod export;
pub mod log_parser;
pub mod logging;
pub mod utils;

pub use error::{LogError, MalformedReason};
