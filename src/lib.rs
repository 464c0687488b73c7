//! Readiness map analytics
//!
//! Loads a table of base records, buckets each base into a readiness quartile
//! and produces the map feed and country rankings consumed by the dashboards.

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;

pub use analyzer::ReadinessAnalyzer;
pub use config::{AnalyzerConfig, MapVariant, RadiusPolicy};
pub use error::{AnalysisError, Result};
pub use loader::{load_dataset, Dataset};
