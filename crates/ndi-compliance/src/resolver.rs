//! Snapshot resolution.

use ndi_core::{ComplianceGateway, Scope, SnapshotId};
use tracing::{debug, info, instrument};

use crate::error::ResolutionError;

/// Turns an optional caller-supplied snapshot id into a concrete one
pub struct SnapshotResolver<'a, G: ?Sized> {
    gateway: &'a G,
}

impl<'a, G: ComplianceGateway + ?Sized> SnapshotResolver<'a, G> {
    /// Create a resolver backed by `gateway`
    pub const fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Resolve the snapshot to analyse.
    ///
    /// A non-empty `supplied` id is returned as is, without asking the
    /// backend. Otherwise the latest finished epoch of `scope` is looked up
    /// once.
    #[instrument(skip_all, fields(scope = %scope))]
    pub async fn resolve(
        &self,
        scope: &Scope,
        supplied: Option<&str>,
    ) -> Result<SnapshotId, ResolutionError> {
        if let Some(id) = supplied.filter(|id| !id.is_empty()) {
            debug!(snapshot = id, "using supplied snapshot");
            return Ok(SnapshotId::new(id));
        }

        let epoch = self
            .gateway
            .latest_epoch(scope)
            .await
            .map_err(|source| ResolutionError::Lookup {
                scope: scope.clone(),
                source,
            })?
            .ok_or_else(|| ResolutionError::NoSnapshot {
                scope: scope.clone(),
            })?;

        let id = epoch.id().ok_or_else(|| ResolutionError::MissingEpochId {
            scope: scope.clone(),
        })?;

        info!(snapshot = id, collected_at = ?epoch.collected_at(), "resolved latest snapshot");
        Ok(SnapshotId::new(id))
    }
}
