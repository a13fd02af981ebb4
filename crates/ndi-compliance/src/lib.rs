//! Compliance analysis for Nexus Dashboard Insights.
//!
//! A run resolves the snapshot to analyse, fires the six analytic queries
//! against that one snapshot and assembles a [`ComplianceReport`]. Runs are
//! all-or-nothing: any failure aborts the run and no partial report is
//! produced.
//!
//! # Example
//!
//! ```rust,ignore
//! use ndi_compliance::{AnalysisRequest, ComplianceAnalysis};
//!
//! let analysis = ComplianceAnalysis::new(&client);
//! let report = analysis
//!     .run(&AnalysisRequest::new(Scope::for_fabric("fab1")))
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! ```

#![doc(html_root_url = "https://docs.rs/ndi-compliance/0.3.0")]

mod analysis;
mod error;
mod orchestrator;
pub mod report;
mod resolver;

pub use analysis::{AnalysisOutcome, AnalysisRequest, ComplianceAnalysis};
pub use error::{ComplianceError, ComplianceResult, QueryError, ResolutionError};
pub use ndi_core::ComplianceReport;
pub use orchestrator::QueryOrchestrator;
pub use resolver::SnapshotResolver;
