//! Concurrent execution of the six analytic queries.

use ndi_core::{AnalyticQuery, ComplianceGateway, ComplianceReport, Scope, SnapshotId};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::error::QueryError;
use crate::report::{assemble, RawResponses};

/// Issues the analytic queries of one run and assembles the report
pub struct QueryOrchestrator<'a, G: ?Sized> {
    gateway: &'a G,
}

impl<'a, G: ComplianceGateway + ?Sized> QueryOrchestrator<'a, G> {
    /// Create an orchestrator backed by `gateway`
    pub const fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Run every analytic query against `snapshot`.
    ///
    /// The queries run concurrently. The first failure cancels the others
    /// and is returned; no partial report is ever produced.
    #[instrument(skip_all, fields(scope = %scope, snapshot = %snapshot))]
    pub async fn run(
        &self,
        scope: &Scope,
        snapshot: &SnapshotId,
    ) -> Result<ComplianceReport, QueryError> {
        let (
            smart_events,
            events_by_severity,
            unhealthy_resources,
            compliance_score,
            count,
            result_by_requirement,
        ) = tokio::try_join!(
            self.fetch(AnalyticQuery::SmartEvents, scope, snapshot),
            self.fetch(AnalyticQuery::EventsBySeverity, scope, snapshot),
            self.fetch(AnalyticQuery::UnhealthyResources, scope, snapshot),
            self.fetch(AnalyticQuery::ComplianceScore, scope, snapshot),
            self.fetch(AnalyticQuery::Count, scope, snapshot),
            self.fetch(AnalyticQuery::ResultByRequirement, scope, snapshot),
        )?;

        assemble(
            scope,
            snapshot,
            RawResponses {
                smart_events,
                events_by_severity,
                unhealthy_resources,
                compliance_score,
                count,
                result_by_requirement,
            },
        )
    }

    async fn fetch(
        &self,
        query: AnalyticQuery,
        scope: &Scope,
        snapshot: &SnapshotId,
    ) -> Result<Value, QueryError> {
        let request = query.request(scope, snapshot);
        debug!(%query, %request, "issuing query");

        self.gateway.get_json(&request).await.map_err(|source| {
            warn!(%query, error = %source, "query failed");
            QueryError::Transport {
                query,
                scope: scope.clone(),
                snapshot: snapshot.clone(),
                source,
            }
        })
    }
}
