use serde::{Deserialize, Serialize};
use std::fmt;

/// Insights group used when none is given.
///
/// Nexus Dashboard Insights 6.3 and later only accept `default`.
pub const DEFAULT_INSIGHTS_GROUP: &str = "default";

/// Tenant and site context shared by every query of a run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ScopeFields")]
pub struct Scope {
    /// Insights group name
    pub insights_group: String,

    /// Fabric (site) name
    pub fabric: String,
}

impl Scope {
    /// Create a scope, falling back to [`DEFAULT_INSIGHTS_GROUP`] when the
    /// insights group is empty
    #[must_use]
    pub fn new(insights_group: impl Into<String>, fabric: impl Into<String>) -> Self {
        let insights_group = insights_group.into();
        let insights_group = if insights_group.trim().is_empty() {
            DEFAULT_INSIGHTS_GROUP.to_string()
        } else {
            insights_group
        };

        Self {
            insights_group,
            fabric: fabric.into(),
        }
    }

    /// Create a scope in the default insights group
    #[must_use]
    pub fn for_fabric(fabric: impl Into<String>) -> Self {
        Self::new(DEFAULT_INSIGHTS_GROUP, fabric)
    }
}

/// Wire form of [`Scope`]; deserialization goes through [`Scope::new`]
#[derive(Deserialize)]
struct ScopeFields {
    #[serde(default)]
    insights_group: String,
    fabric: String,
}

impl From<ScopeFields> for Scope {
    fn from(fields: ScopeFields) -> Self {
        Self::new(fields.insights_group, fields.fabric)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.insights_group, self.fabric)
    }
}

/// Opaque identifier of a point-in-time capture (epoch)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Wrap an epoch identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as sent to the backend
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SnapshotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_insights_group_falls_back_to_default() {
        let scope = Scope::new("", "fab1");
        assert_eq!(scope.insights_group, "default");
        assert_eq!(scope.fabric, "fab1");
        assert_eq!(scope.to_string(), "default/fab1");
    }

    #[test]
    fn explicit_insights_group_is_kept() {
        let scope = Scope::new("igName", "fab1");
        assert_eq!(scope.insights_group, "igName");
    }

    #[test]
    fn deserialized_scope_gets_the_default_group() {
        let blank: Scope =
            serde_json::from_str(r#"{"insights_group": " ", "fabric": "fab1"}"#).unwrap();
        assert_eq!(blank, Scope::for_fabric("fab1"));

        let missing: Scope = serde_json::from_str(r#"{"fabric": "fab1"}"#).unwrap();
        assert_eq!(missing.insights_group, "default");

        let named: Scope =
            serde_json::from_str(r#"{"insights_group": "ig1", "fabric": "fab1"}"#).unwrap();
        assert_eq!(named, Scope::new("ig1", "fab1"));
    }

    #[test]
    fn snapshot_id_serializes_as_plain_string() {
        let id = SnapshotId::new("e-123");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"e-123\"");
    }
}
