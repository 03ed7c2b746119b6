//! # scholarstreak
//!
//! Continuous-author abstract collector for the Semantic Scholar Graph API
//!
//! ## Modules
//!
//! - [`semanticscholar`] - Semantic Scholar Graph API client and data model
//! - [`filters`] - Candidate filter chain
//! - [`qualifier`] - Continuity qualification state machine
//! - [`collector`] - Collection orchestration and file persistence
//! - [`report`] - Run report generation
//! - [`cache`] - File-backed API response cache
//! - [`fields`] - Field configuration tables
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scholarstreak::collector::{AbstractCollector, CollectorConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let collector = AbstractCollector::new(CollectorConfig {
//!         field: "CS".to_string(),
//!         output_dir: "output_CS".into(),
//!         api_key: None,
//!         required_years: (2020..=2024).collect(),
//!         scholars_file: None,
//!         debug_data: None,
//!     })?;
//!     collector.run(20, true).await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod collector;
pub mod error;
pub mod fields;
pub mod filters;
pub mod qualifier;
pub mod report;
pub mod semanticscholar;

pub use error::{CollectorError, Result};
