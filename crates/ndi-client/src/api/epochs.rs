//! Epoch (snapshot) API endpoints.

use crate::NdClient;
use ndi_core::{EpochDescriptor, Envelope, Result, Scope, ScopedRequest};
use tracing::debug;

/// Epoch API endpoints
pub struct EpochApi<'a> {
    client: &'a NdClient,
}

impl<'a> EpochApi<'a> {
    pub(crate) const fn new(client: &'a NdClient) -> Self {
        Self { client }
    }

    /// Get the most recent finished epoch of a fabric
    ///
    /// Returns `Ok(None)` when the fabric has no finished epoch.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let epoch = client.epochs().latest(&Scope::for_fabric("fab1")).await?;
    /// println!("Latest: {:?}", epoch.and_then(|e| e.epoch_id));
    /// ```
    pub async fn latest(&self, scope: &Scope) -> Result<Option<EpochDescriptor>> {
        let envelope: Envelope<Vec<EpochDescriptor>> = self
            .client
            .get_scoped(&ScopedRequest::latest_epoch(scope))
            .await?;

        let epoch = envelope.into_data().into_iter().next();
        debug!(scope = %scope, epoch = ?epoch.as_ref().and_then(EpochDescriptor::id), "latest epoch");
        Ok(epoch)
    }
}
