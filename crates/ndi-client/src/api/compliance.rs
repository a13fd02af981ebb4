//! Compliance analysis API endpoints.

use crate::NdClient;
use ndi_core::{AnalyticQuery, Envelope, ResponseShape, Result, Scope, SnapshotId};
use serde_json::Value;

/// Compliance analysis API endpoints.
///
/// Each call returns the endpoint's payload: enveloped responses are
/// unwrapped, raw responses are returned as sent.
pub struct ComplianceApi<'a> {
    client: &'a NdClient,
}

impl<'a> ComplianceApi<'a> {
    pub(crate) const fn new(client: &'a NdClient) -> Self {
        Self { client }
    }

    /// Compliance smart events (first page, most severe first)
    pub async fn smart_events(&self, scope: &Scope, snapshot: &SnapshotId) -> Result<Value> {
        self.fetch(AnalyticQuery::SmartEvents, scope, snapshot).await
    }

    /// Event counts grouped by severity
    pub async fn events_by_severity(&self, scope: &Scope, snapshot: &SnapshotId) -> Result<Value> {
        self.fetch(AnalyticQuery::EventsBySeverity, scope, snapshot)
            .await
    }

    /// Resources flagged unhealthy by the compliance analysis
    pub async fn unhealthy_resources(&self, scope: &Scope, snapshot: &SnapshotId) -> Result<Value> {
        self.fetch(AnalyticQuery::UnhealthyResources, scope, snapshot)
            .await
    }

    /// Aggregate compliance score
    pub async fn score(&self, scope: &Scope, snapshot: &SnapshotId) -> Result<Value> {
        self.fetch(AnalyticQuery::ComplianceScore, scope, snapshot)
            .await
    }

    /// Total compliance event count
    pub async fn count(&self, scope: &Scope, snapshot: &SnapshotId) -> Result<Value> {
        self.fetch(AnalyticQuery::Count, scope, snapshot).await
    }

    /// First page of per-requirement results, sorted by requirement name descending
    pub async fn results_by_requirement(
        &self,
        scope: &Scope,
        snapshot: &SnapshotId,
    ) -> Result<Value> {
        self.fetch(AnalyticQuery::ResultByRequirement, scope, snapshot)
            .await
    }

    /// Run any analytic query and return its payload
    pub async fn fetch(
        &self,
        query: AnalyticQuery,
        scope: &Scope,
        snapshot: &SnapshotId,
    ) -> Result<Value> {
        let request = query.request(scope, snapshot);

        match query.shape() {
            ResponseShape::Raw => self.client.get_scoped(&request).await,
            ResponseShape::Enveloped => {
                let envelope: Envelope<Value> = self.client.get_scoped(&request).await?;
                Ok(envelope.into_data())
            }
        }
    }
}
