use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/availability`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeQuery {
    pub event_urls: Vec<String>,
    pub start_date: String,
    pub end_date: String,
}

impl TimeRangeQuery {
    pub fn new(event_urls: &[String], start_date: &str, end_date: &str) -> Self {
        Self {
            event_urls: event_urls.to_vec(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        }
    }
}

/// One window where every queried calendar is free.
///
/// The shape belongs to the availability service, so the slot is kept as raw
/// JSON. `start`/`end` are read when the service provides them.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct CommonSlot(pub Value);

impl CommonSlot {
    pub fn start(&self) -> Option<&str> {
        self.0.get("start").and_then(Value::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.0.get("end").and_then(Value::as_str)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AvailabilityResponse {
    pub slots: Vec<CommonSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_serializes_camel_case() {
        let query = TimeRangeQuery::new(
            &["https://host/alice/intro".to_string()],
            "2024-03-15",
            "2024-03-22",
        );
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "eventUrls": ["https://host/alice/intro"],
                "startDate": "2024-03-15",
                "endDate": "2024-03-22"
            })
        );
    }

    #[test]
    fn slot_accessors_tolerate_other_shapes() {
        let slot: CommonSlot = serde_json::from_value(json!({"from": 1})).unwrap();
        assert_eq!(slot.start(), None);
        assert_eq!(slot.end(), None);

        let slot: CommonSlot =
            serde_json::from_value(json!({"start": "2024-03-15T14:00:00Z", "end": 5})).unwrap();
        assert_eq!(slot.start(), Some("2024-03-15T14:00:00Z"));
        assert_eq!(slot.end(), None);
    }
}
