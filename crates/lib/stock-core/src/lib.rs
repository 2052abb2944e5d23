//! Core client and record types for stock-mcp.
//!
//! This crate owns the single upstream integration: a Tushare Pro JSON client
//! that sends one POST per call, validates the response envelope, and decodes
//! each operation's positional tuples into typed records.

pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod records;

pub use client::{ResponseData, TushareClient};
pub use config::TushareConfig;
pub use error::TushareError;
pub use params::Params;
pub use reqwest::Url;
pub use tokio_util::sync::CancellationToken;
