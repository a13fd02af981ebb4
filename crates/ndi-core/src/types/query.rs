//! Typed descriptions of the scoped GET requests sent to the telemetry API.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::scope::{Scope, SnapshotId};

/// Path prefix of every telemetry endpoint, relative to the dashboard root
pub const TELEMETRY_PREFIX: &str = "sedgeapi/v1/cisco-nir/api/api/telemetry/v2";

/// Page size used by the paged compliance endpoints
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Event category filter for compliance-only results
pub const COMPLIANCE_CATEGORY: &str = "COMPLIANCE";

const COMPLIANCE_ANALYSIS: [&str; 3] = ["model", "aciPolicy", "complianceAnalysis"];

/// Ordered query parameters of a request.
///
/// Backend-reserved parameters carry a `$` prefix (`$epochId`, `$page`, ...);
/// the transport is responsible for percent-encoding them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter list
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Scope the request to an epoch (`$epochId`)
    #[must_use]
    pub fn epoch(self, snapshot: &SnapshotId) -> Self {
        self.param("$epochId", snapshot.as_str())
    }

    /// Zero-based page number (`$page`)
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("$page", page.to_string())
    }

    /// Page size (`$size`)
    #[must_use]
    pub fn size(self, size: u32) -> Self {
        self.param("$size", size.to_string())
    }

    /// Sort descending by `field` (`$sort=-field`)
    #[must_use]
    pub fn sort_desc(self, field: &str) -> Self {
        self.param("$sort", format!("-{field}"))
    }

    /// Filter on processing status (`$status`)
    #[must_use]
    pub fn status(self, status: &str) -> Self {
        self.param("$status", status)
    }

    /// Plain attribute filter such as `category=COMPLIANCE`
    #[must_use]
    pub fn filter(self, key: &str, value: &str) -> Self {
        self.param(key, value)
    }

    fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.0.push((key.to_string(), value.into()));
        self
    }

    /// Look up the first value of `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no parameter is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A read-only GET against the telemetry API, relative to its prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedRequest {
    /// Scope the request was built for
    pub scope: Scope,

    /// Unencoded path segments
    pub segments: Vec<String>,

    /// Query parameters
    pub params: QueryParams,
}

impl ScopedRequest {
    /// The epoch listing request used to resolve the latest finished epoch
    #[must_use]
    pub fn latest_epoch(scope: &Scope) -> Self {
        Self {
            scope: scope.clone(),
            segments: vec![
                "config".to_string(),
                "insightsGroup".to_string(),
                scope.insights_group.clone(),
                "fabric".to_string(),
                scope.fabric.clone(),
                "epochs".to_string(),
            ],
            params: QueryParams::new().size(1).status("FINISHED"),
        }
    }

    /// The path joined with `/`, unencoded
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// The epoch this request is scoped to, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<&str> {
        self.params.get("$epochId")
    }
}

impl fmt::Display for ScopedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())?;
        for (i, (key, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

/// How an endpoint wraps its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// Payload lives under `value.data`
    Enveloped,
    /// The body is the payload
    Raw,
}

/// The six analytic dimensions of a compliance report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticQuery {
    /// Compliance smart-event alerts
    SmartEvents,
    /// Event breakdown by severity
    EventsBySeverity,
    /// Resources flagged unhealthy by the compliance analysis
    UnhealthyResources,
    /// Aggregate compliance score
    ComplianceScore,
    /// Total compliance event count
    Count,
    /// First page of per-requirement results, sorted by requirement name descending
    ResultByRequirement,
}

impl AnalyticQuery {
    /// Every query, in report order
    pub const ALL: [Self; 6] = [
        Self::SmartEvents,
        Self::EventsBySeverity,
        Self::UnhealthyResources,
        Self::ComplianceScore,
        Self::Count,
        Self::ResultByRequirement,
    ];

    /// The report key this query fills
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::SmartEvents => "smart_events",
            Self::EventsBySeverity => "events_by_severity",
            Self::UnhealthyResources => "unhealthy_resources",
            Self::ComplianceScore => "compliance_score",
            Self::Count => "count",
            Self::ResultByRequirement => "result_by_requirement",
        }
    }

    /// Whether the endpoint wraps its payload.
    ///
    /// The score and count endpoints answer with the object itself; every
    /// other endpoint uses the `value.data` envelope.
    #[must_use]
    pub const fn shape(self) -> ResponseShape {
        match self {
            Self::ComplianceScore | Self::Count => ResponseShape::Raw,
            _ => ResponseShape::Enveloped,
        }
    }

    /// Build the request for this query under `scope` at `snapshot`
    #[must_use]
    pub fn request(self, scope: &Scope, snapshot: &SnapshotId) -> ScopedRequest {
        let (segments, params) = match self {
            Self::SmartEvents => (
                events_segments(scope, "smartEvents"),
                QueryParams::new()
                    .epoch(snapshot)
                    .page(0)
                    .size(DEFAULT_PAGE_SIZE)
                    .sort_desc("severity")
                    .filter("category", COMPLIANCE_CATEGORY),
            ),
            Self::EventsBySeverity => (
                analysis_segments(scope, "eventsBySeverity"),
                QueryParams::new().epoch(snapshot),
            ),
            Self::UnhealthyResources => (
                events_segments(scope, "unhealthyResources"),
                QueryParams::new()
                    .epoch(snapshot)
                    .filter("category", COMPLIANCE_CATEGORY),
            ),
            Self::ComplianceScore => (
                analysis_segments(scope, "complianceScore"),
                QueryParams::new().epoch(snapshot),
            ),
            Self::Count => (
                analysis_segments(scope, "count"),
                QueryParams::new().epoch(snapshot),
            ),
            Self::ResultByRequirement => (
                analysis_segments(scope, "complianceResultsByRequirement"),
                QueryParams::new()
                    .epoch(snapshot)
                    .sort_desc("requirementName")
                    .page(0)
                    .size(DEFAULT_PAGE_SIZE),
            ),
        };

        ScopedRequest {
            scope: scope.clone(),
            segments,
            params,
        }
    }
}

impl fmt::Display for AnalyticQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

fn scope_segments(scope: &Scope) -> Vec<String> {
    vec![
        "insightsGroup".to_string(),
        scope.insights_group.clone(),
        "fabric".to_string(),
        scope.fabric.clone(),
    ]
}

fn events_segments(scope: &Scope, endpoint: &str) -> Vec<String> {
    let mut segments = vec!["events".to_string()];
    segments.extend(scope_segments(scope));
    segments.push(endpoint.to_string());
    segments
}

fn analysis_segments(scope: &Scope, endpoint: &str) -> Vec<String> {
    let mut segments = scope_segments(scope);
    segments.extend(COMPLIANCE_ANALYSIS.iter().map(ToString::to_string));
    segments.push(endpoint.to_string());
    segments
}
