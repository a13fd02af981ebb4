use ndi_core::{AnalyticQuery, NdiError, Scope, SnapshotId};
use thiserror::Error;

/// Result type alias for compliance analysis runs
pub type ComplianceResult<T> = std::result::Result<T, ComplianceError>;

/// The snapshot to analyse could not be determined
#[derive(Error, Debug)]
pub enum ResolutionError {
    /// The latest-epoch lookup failed
    #[error("failed to look up the latest snapshot of {scope}")]
    Lookup {
        /// Scope of the lookup
        scope: Scope,
        /// Transport failure
        #[source]
        source: NdiError,
    },

    /// The backend has no finished epoch for the fabric
    #[error("no finished snapshot found for {scope}")]
    NoSnapshot {
        /// Scope of the lookup
        scope: Scope,
    },

    /// The latest epoch carries no `epochId`
    #[error("latest snapshot of {scope} has no epochId")]
    MissingEpochId {
        /// Scope of the lookup
        scope: Scope,
    },
}

impl ResolutionError {
    /// The scope resolution was attempted for
    #[must_use]
    pub const fn scope(&self) -> &Scope {
        match self {
            Self::Lookup { scope, .. }
            | Self::NoSnapshot { scope }
            | Self::MissingEpochId { scope } => scope,
        }
    }
}

/// One of the analytic queries failed
#[derive(Error, Debug)]
pub enum QueryError {
    /// The request itself failed
    #[error("{query} query failed for {scope} at snapshot {snapshot}")]
    Transport {
        /// The failing query
        query: AnalyticQuery,
        /// Scope of the run
        scope: Scope,
        /// Snapshot of the run
        snapshot: SnapshotId,
        /// Transport failure
        #[source]
        source: NdiError,
    },

    /// The response did not have the shape the endpoint is known to use
    #[error("{query} query returned a malformed response for {scope} at snapshot {snapshot}: {reason}")]
    Malformed {
        /// The failing query
        query: AnalyticQuery,
        /// Scope of the run
        scope: Scope,
        /// Snapshot of the run
        snapshot: SnapshotId,
        /// What was wrong with the body
        reason: String,
    },
}

impl QueryError {
    /// The query that failed
    #[must_use]
    pub const fn query(&self) -> AnalyticQuery {
        match self {
            Self::Transport { query, .. } | Self::Malformed { query, .. } => *query,
        }
    }

    /// The snapshot the failing query was scoped to
    #[must_use]
    pub const fn snapshot(&self) -> &SnapshotId {
        match self {
            Self::Transport { snapshot, .. } | Self::Malformed { snapshot, .. } => snapshot,
        }
    }
}

/// Errors that abort a compliance analysis run
#[derive(Error, Debug)]
pub enum ComplianceError {
    /// Snapshot resolution failed; no query was issued
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// An analytic query failed; no report was produced
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl ComplianceError {
    /// The underlying transport error, if any
    #[must_use]
    pub const fn transport(&self) -> Option<&NdiError> {
        match self {
            Self::Resolution(ResolutionError::Lookup { source, .. })
            | Self::Query(QueryError::Transport { source, .. }) => Some(source),
            _ => None,
        }
    }
}
