//! Report assembly.
//!
//! Enveloped endpoints answer `{"value": {"data": ...}}` and contribute the
//! inner `data`; raw endpoints contribute their body unchanged. Which is
//! which is fixed per endpoint by [`AnalyticQuery::shape`].

use ndi_core::{AnalyticQuery, ComplianceReport, ResponseShape, Scope, SnapshotId};
use serde_json::Value;

use crate::error::QueryError;

/// Response bodies of the six queries, as received
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponses {
    /// Body of the smart events query
    pub smart_events: Value,
    /// Body of the events-by-severity query
    pub events_by_severity: Value,
    /// Body of the unhealthy resources query
    pub unhealthy_resources: Value,
    /// Body of the compliance score query
    pub compliance_score: Value,
    /// Body of the count query
    pub count: Value,
    /// Body of the per-requirement results query
    pub result_by_requirement: Value,
}

/// Build the report from the raw bodies of one run
pub fn assemble(
    scope: &Scope,
    snapshot: &SnapshotId,
    raw: RawResponses,
) -> Result<ComplianceReport, QueryError> {
    let payload = |query: AnalyticQuery, body: Value| {
        unwrap_payload(query, body).ok_or_else(|| QueryError::Malformed {
            query,
            scope: scope.clone(),
            snapshot: snapshot.clone(),
            reason: "expected a value.data envelope".to_string(),
        })
    };

    Ok(ComplianceReport {
        smart_events: payload(AnalyticQuery::SmartEvents, raw.smart_events)?,
        events_by_severity: payload(AnalyticQuery::EventsBySeverity, raw.events_by_severity)?,
        unhealthy_resources: payload(AnalyticQuery::UnhealthyResources, raw.unhealthy_resources)?,
        compliance_score: payload(AnalyticQuery::ComplianceScore, raw.compliance_score)?,
        count: payload(AnalyticQuery::Count, raw.count)?,
        result_by_requirement: payload(
            AnalyticQuery::ResultByRequirement,
            raw.result_by_requirement,
        )?,
    })
}

/// Extract the payload of `query` from its response body.
///
/// Returns `None` when an enveloped endpoint answered without the envelope.
#[must_use]
pub fn unwrap_payload(query: AnalyticQuery, body: Value) -> Option<Value> {
    match query.shape() {
        ResponseShape::Raw => Some(body),
        ResponseShape::Enveloped => match body {
            Value::Object(mut outer) => match outer.remove("value")? {
                Value::Object(mut inner) => inner.remove("data"),
                _ => None,
            },
            _ => None,
        },
    }
}
