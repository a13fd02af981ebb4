//! Core types and traits for Nexus Dashboard Insights compliance analysis.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - **Types**: the query [`Scope`], [`SnapshotId`], [`EpochDescriptor`], the six
//!   [`AnalyticQuery`] endpoints and the fixed-shape [`ComplianceReport`]
//! - **Errors**: transport-level error handling with [`NdiError`]
//! - **Gateway**: the [`ComplianceGateway`] trait the analysis layer talks to
//!
//! # Example
//!
//! ```rust,ignore
//! use ndi_core::{AnalyticQuery, Scope, SnapshotId};
//!
//! let scope = Scope::new("default", "fab1");
//! let snapshot = SnapshotId::new("e-123");
//! let request = AnalyticQuery::Count.request(&scope, &snapshot);
//! println!("{request}");
//! ```

#![doc(html_root_url = "https://docs.rs/ndi-core/0.3.0")]

mod error;
mod gateway;
pub mod types;

pub use error::{NdiError, Result};
pub use gateway::ComplianceGateway;
pub use types::*;
