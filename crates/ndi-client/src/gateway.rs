use async_trait::async_trait;
use ndi_core::{ComplianceGateway, EpochDescriptor, Result, Scope, ScopedRequest};
use serde_json::Value;

use crate::NdClient;

#[async_trait]
impl ComplianceGateway for NdClient {
    async fn latest_epoch(&self, scope: &Scope) -> Result<Option<EpochDescriptor>> {
        self.epochs().latest(scope).await
    }

    async fn get_json(&self, request: &ScopedRequest) -> Result<Value> {
        self.get_scoped(request).await
    }
}
