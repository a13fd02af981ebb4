//! Rust client and compliance analysis for Cisco Nexus Dashboard Insights.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use ndi::{AnalysisRequest, ComplianceAnalysis, Credentials, NdClient, Scope};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NdClient::builder("nd.example.com")
//!         .credentials(Credentials::password("admin", "secret"))
//!         .build()?;
//!
//!     // Latest finished snapshot of fabric "fab1"
//!     let report = ComplianceAnalysis::new(&client)
//!         .run(&AnalysisRequest::new(Scope::for_fabric("fab1")))
//!         .await?;
//!
//!     println!("Score: {}", report.compliance_score);
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `default` - Uses rustls for TLS
//! - `rustls` - Use rustls for TLS (recommended)
//! - `native-tls` - Use system native TLS

#![doc(html_root_url = "https://docs.rs/ndi/0.3.0")]

// Re-export core types
pub use ndi_core::*;

// Re-export client
pub use ndi_client::{Credentials, NdClient, NdClientBuilder, RetryConfig, DEFAULT_LOGIN_DOMAIN};

// Re-export analysis
pub use ndi_compliance::{
    report, AnalysisOutcome, AnalysisRequest, ComplianceAnalysis, ComplianceError,
    ComplianceResult, QueryError, QueryOrchestrator, ResolutionError, SnapshotResolver,
};

// Re-export runtime for convenience
pub use tokio;
pub use serde;
pub use serde_json;
