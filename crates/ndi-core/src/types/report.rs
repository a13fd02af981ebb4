use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::query::AnalyticQuery;

/// Compliance analysis results for one snapshot.
///
/// Serializes to an object with exactly the six report keys, in report order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComplianceReport {
    /// Compliance smart-event alerts
    pub smart_events: Value,

    /// Event breakdown by severity
    pub events_by_severity: Value,

    /// Resources flagged unhealthy
    pub unhealthy_resources: Value,

    /// Aggregate compliance score
    pub compliance_score: Value,

    /// Total compliance event count
    pub count: Value,

    /// Per-requirement results (first page)
    pub result_by_requirement: Value,
}

impl ComplianceReport {
    /// The payload a given query contributed
    #[must_use]
    pub const fn get(&self, query: AnalyticQuery) -> &Value {
        match query {
            AnalyticQuery::SmartEvents => &self.smart_events,
            AnalyticQuery::EventsBySeverity => &self.events_by_severity,
            AnalyticQuery::UnhealthyResources => &self.unhealthy_resources,
            AnalyticQuery::ComplianceScore => &self.compliance_score,
            AnalyticQuery::Count => &self.count,
            AnalyticQuery::ResultByRequirement => &self.result_by_requirement,
        }
    }

    /// Iterate over `(query, payload)` in report order
    pub fn iter(&self) -> impl Iterator<Item = (AnalyticQuery, &Value)> {
        AnalyticQuery::ALL.into_iter().map(|q| (q, self.get(q)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ComplianceReport {
        ComplianceReport {
            smart_events: json!([]),
            events_by_severity: json!([{"severity": "critical", "total": 2}]),
            unhealthy_resources: json!([]),
            compliance_score: json!({"score": 87}),
            count: json!({"total": 4}),
            result_by_requirement: json!([]),
        }
    }

    #[test]
    fn serializes_exactly_the_report_keys_in_order() {
        let value = serde_json::to_value(sample()).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 6);
        for query in AnalyticQuery::ALL {
            assert!(object.contains_key(query.key()), "{query}");
        }

        let text = serde_json::to_string(&sample()).unwrap();
        let positions: Vec<_> = AnalyticQuery::ALL
            .iter()
            .map(|q| text.find(&format!("\"{}\":", q.key())).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rejects_extra_keys() {
        let mut value = serde_json::to_value(sample()).unwrap();
        value["extra"] = json!(1);
        assert!(serde_json::from_value::<ComplianceReport>(value).is_err());
    }

    #[test]
    fn lookup_by_query() {
        let report = sample();
        assert_eq!(report.get(AnalyticQuery::ComplianceScore)["score"], 87);
        assert_eq!(report.iter().count(), 6);
    }
}
