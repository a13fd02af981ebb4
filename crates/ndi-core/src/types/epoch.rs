use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A captured epoch as returned by the epoch listing endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpochDescriptor {
    /// Epoch identifier; optional so a malformed descriptor can be detected
    #[serde(default)]
    pub epoch_id: Option<String>,

    /// When the data was collected, as reported by the backend
    #[serde(default, rename = "collectionTimeRfc3339")]
    pub collection_time: Option<String>,

    /// Every other field, kept verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EpochDescriptor {
    /// The epoch id, if present and non-empty
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.epoch_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Collection time parsed as UTC, if present and well-formed
    #[must_use]
    pub fn collected_at(&self) -> Option<DateTime<Utc>> {
        self.collection_time
            .as_deref()
            .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
            .map(|t| t.with_timezone(&Utc))
    }
}

/// The `{"value": {"data": [...]}}` envelope used by listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Outer wrapper
    pub value: EnvelopeValue<T>,
}

/// Inner part of an [`Envelope`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeValue<T> {
    /// The wrapped payload
    pub data: T,
}

impl<T> Envelope<T> {
    /// Take the wrapped payload
    pub fn into_data(self) -> T {
        self.value.data
    }
}
