//! Skinpack Common Utilities
//!
//! Shared infrastructure for all skinpack crates:
//! - Error taxonomy and result alias
//! - Tracing/logging initialization
//! - Configuration loading (pack defaults, output directory, logging)

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
