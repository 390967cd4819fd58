//! Shared-cart record as stored under `shared_cart_<cartId>`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Shared-cart record. Only `expiresAt` is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedCartRecord {
    /// Absolute deadline (Unix milliseconds); absent means no expiry
    #[serde(rename = "expiresAt", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
    /// Cart payload, carried through untouched
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl SharedCartRecord {
    /// A cart is active until its deadline has strictly passed.
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        match self.expires_at {
            Some(deadline) => deadline >= now_ms,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_deadline_is_active() {
        let record: SharedCartRecord = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(record.expires_at, None);
        assert!(record.is_active_at(i64::MAX));
    }

    #[test]
    fn test_deadline_boundary() {
        let record: SharedCartRecord =
            serde_json::from_str(r#"{"expiresAt": 1000, "items": [1, 2]}"#).unwrap();

        assert!(record.is_active_at(999));
        assert!(record.is_active_at(1000));
        assert!(!record.is_active_at(1001));
        assert_eq!(record.payload["items"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_null_deadline_is_active() {
        let record: SharedCartRecord = serde_json::from_str(r#"{"expiresAt": null}"#).unwrap();
        assert!(record.is_active_at(0));
    }

    #[test]
    fn test_malformed_records_fail_to_parse() {
        assert!(serde_json::from_str::<SharedCartRecord>("not json").is_err());
        assert!(serde_json::from_str::<SharedCartRecord>("[1, 2]").is_err());
        assert!(serde_json::from_str::<SharedCartRecord>(r#"{"expiresAt": "soon"}"#).is_err());
    }
}
