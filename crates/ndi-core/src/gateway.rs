//! The transport seam between the analysis layer and Nexus Dashboard.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{EpochDescriptor, Scope, ScopedRequest};

/// Read-only access to the Nexus Dashboard Insights telemetry API.
///
/// Implementations own authentication, timeouts and retries. They must be
/// safe to call concurrently: the orchestrator issues its queries in parallel
/// through a shared reference.
#[async_trait]
pub trait ComplianceGateway: Send + Sync {
    /// Fetch the most recent finished epoch for `scope`.
    ///
    /// Returns `Ok(None)` when the fabric has no finished epoch yet.
    async fn latest_epoch(&self, scope: &Scope) -> Result<Option<EpochDescriptor>>;

    /// Perform a scoped GET and return the parsed JSON body untouched.
    async fn get_json(&self, request: &ScopedRequest) -> Result<Value>;
}
