//! Image Record Module
//!
//! Defines the JSON record stored under each `cached_image_` key.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// == Image Record ==
/// A cached image entry as written by the app.
///
/// Only `timestamp` is interpreted; every other field is carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Creation time (Unix milliseconds)
    pub timestamp: i64,
    /// Opaque payload fields
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ImageRecord {
    // == Constructor ==
    /// Creates a record stamped at `now_ms` holding `data`.
    pub fn new(data: Value, now_ms: i64) -> Self {
        let mut payload = Map::new();
        payload.insert("data".to_string(), data);
        Self {
            timestamp: now_ms,
            payload,
        }
    }

    // == Is Expired ==
    /// Checks whether the record is older than `ttl_ms` at `now_ms`.
    ///
    /// An entry exactly `ttl_ms` old is still live.
    pub fn is_expired_at(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms.saturating_sub(self.timestamp) > ttl_ms
    }

    /// Returns the `data` payload field, if present.
    pub fn data(&self) -> Option<&Value> {
        self.payload.get("data")
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::IMAGE_TTL_MS;
    use serde_json::json;

    #[test]
    fn test_parse_keeps_opaque_fields() {
        let raw = r#"{"timestamp": 1700000000000, "uri": "file:///a.png", "width": 64}"#;
        let record: ImageRecord = serde_json::from_str(raw).unwrap();

        assert_eq!(record.timestamp, 1_700_000_000_000);
        assert_eq!(record.payload["uri"], json!("file:///a.png"));
        assert_eq!(record.payload["width"], json!(64));
    }

    #[test]
    fn test_parse_missing_timestamp_fails() {
        let raw = r#"{"uri": "file:///a.png"}"#;
        assert!(serde_json::from_str::<ImageRecord>(raw).is_err());
    }

    #[test]
    fn test_parse_non_object_fails() {
        assert!(serde_json::from_str::<ImageRecord>("42").is_err());
        assert!(serde_json::from_str::<ImageRecord>(r#"{"timestamp": "yesterday"}"#).is_err());
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let record = ImageRecord::new(json!("x"), 0);

        assert!(!record.is_expired_at(IMAGE_TTL_MS, IMAGE_TTL_MS));
        assert!(record.is_expired_at(IMAGE_TTL_MS + 1, IMAGE_TTL_MS));
    }

    #[test]
    fn test_future_timestamp_is_live() {
        let now = current_timestamp_ms();
        let record = ImageRecord::new(json!("x"), now + 60_000);
        assert!(!record.is_expired_at(now, IMAGE_TTL_MS));
    }

    #[test]
    fn test_serialize_roundtrips_data() {
        let record = ImageRecord::new(json!({"uri": "a"}), 5);
        let raw = serde_json::to_string(&record).unwrap();
        let back: ImageRecord = serde_json::from_str(&raw).unwrap();

        assert_eq!(back.timestamp, 5);
        assert_eq!(back.data(), Some(&json!({"uri": "a"})));
    }
}
