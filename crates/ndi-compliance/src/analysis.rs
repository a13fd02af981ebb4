//! Entry point of a compliance analysis run.

use ndi_core::{ComplianceGateway, ComplianceReport, Scope, SnapshotId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ComplianceResult;
use crate::orchestrator::QueryOrchestrator;
use crate::resolver::SnapshotResolver;

/// What to analyse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Insights group and fabric
    pub scope: Scope,

    /// Snapshot to analyse; the latest finished one when absent
    pub snapshot_id: Option<String>,

    /// Check mode. The run is read-only, so this changes nothing but logging.
    #[serde(default)]
    pub check_mode: bool,
}

impl AnalysisRequest {
    /// Analyse the latest snapshot of `scope`
    #[must_use]
    pub const fn new(scope: Scope) -> Self {
        Self {
            scope,
            snapshot_id: None,
            check_mode: false,
        }
    }

    /// Analyse a specific snapshot
    #[must_use]
    pub fn snapshot(mut self, snapshot_id: impl Into<String>) -> Self {
        self.snapshot_id = Some(snapshot_id.into());
        self
    }

    /// Mark the run as a check-mode run
    #[must_use]
    pub const fn check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }
}

/// A finished run: the snapshot that was analysed and its report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisOutcome {
    /// Snapshot every query was scoped to
    pub snapshot: SnapshotId,

    /// The assembled report
    pub report: ComplianceReport,
}

/// Runs compliance analyses through a [`ComplianceGateway`]
pub struct ComplianceAnalysis<'a, G: ?Sized> {
    gateway: &'a G,
}

impl<'a, G: ComplianceGateway + ?Sized> ComplianceAnalysis<'a, G> {
    /// Create an analysis backed by `gateway`
    pub const fn new(gateway: &'a G) -> Self {
        Self { gateway }
    }

    /// Resolve the snapshot, run the queries and return the report
    pub async fn run(&self, request: &AnalysisRequest) -> ComplianceResult<ComplianceReport> {
        self.run_detailed(request).await.map(|outcome| outcome.report)
    }

    /// Like [`run`](Self::run), also returning the snapshot that was analysed
    #[instrument(skip_all, fields(scope = %request.scope, check_mode = request.check_mode))]
    pub async fn run_detailed(&self, request: &AnalysisRequest) -> ComplianceResult<AnalysisOutcome> {
        if request.check_mode {
            debug!("check mode: queries are read-only and run as usual");
        }

        let snapshot = SnapshotResolver::new(self.gateway)
            .resolve(&request.scope, request.snapshot_id.as_deref())
            .await?;

        let report = QueryOrchestrator::new(self.gateway)
            .run(&request.scope, &snapshot)
            .await?;

        info!(snapshot = %snapshot, "compliance report assembled");
        Ok(AnalysisOutcome { snapshot, report })
    }
}
