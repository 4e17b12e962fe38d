//! Feature keys
//!
//! A feature key unlocks the extended setup flow (the organization step).
//! Keys are distributed as a base64 text block wrapping a small JSON payload
//! with the organization name and an expiry date.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{SetupError, SetupResult};

/// Decoded payload of a feature key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureKeyPayload {
    /// Organization the key was issued to
    pub organization: String,
    /// Expiry date; keys are invalid from this instant on
    pub expires: DateTime<Utc>,
}

/// A feature key as entered or stored: raw text plus its decoded payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureKey {
    /// The base64 text the key was entered as
    pub raw: String,
    /// Decoded payload
    pub payload: FeatureKeyPayload,
}

impl FeatureKey {
    /// Parse a feature key from its base64 text form
    ///
    /// Whitespace (including line breaks from pasted keys) is ignored.
    pub fn parse(raw: &str) -> SetupResult<Self> {
        let compact: String = raw.split_whitespace().collect();
        if compact.is_empty() {
            return Err(SetupError::FeatureKey("Feature key is empty".into()));
        }

        let bytes = BASE64
            .decode(compact.as_bytes())
            .map_err(|e| SetupError::FeatureKey(format!("Not valid base64: {}", e)))?;

        let payload: FeatureKeyPayload = serde_json::from_slice(&bytes)
            .map_err(|e| SetupError::FeatureKey(format!("Malformed key payload: {}", e)))?;

        Ok(Self {
            raw: compact,
            payload,
        })
    }

    /// Whether the key is valid at the given instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.payload.expires
    }

    /// Whether the key is valid now
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    /// Encode a payload into the distributable text form (used by tests and
    /// by the key issuance tooling on the vendor side)
    pub fn encode(payload: &FeatureKeyPayload) -> SetupResult<String> {
        let json = serde_json::to_vec(payload)
            .map_err(|e| SetupError::FeatureKey(format!("Failed to encode payload: {}", e)))?;
        Ok(BASE64.encode(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn make_key(expires_in: Duration) -> String {
        FeatureKey::encode(&FeatureKeyPayload {
            organization: "Example Corp".into(),
            expires: Utc::now() + expires_in,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_round_trip() {
        let raw = make_key(Duration::days(30));
        let key = FeatureKey::parse(&raw).unwrap();
        assert_eq!(key.payload.organization, "Example Corp");
        assert!(key.is_valid());
    }

    #[test]
    fn test_expired_key() {
        let raw = make_key(Duration::days(-1));
        let key = FeatureKey::parse(&raw).unwrap();
        assert!(!key.is_valid());
    }

    #[test]
    fn test_whitespace_tolerated() {
        let raw = make_key(Duration::days(30));
        let wrapped = format!("{}\n{}", &raw[..10], &raw[10..]);
        let key = FeatureKey::parse(&wrapped).unwrap();
        assert_eq!(key.payload.organization, "Example Corp");
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(FeatureKey::parse("").is_err());
        assert!(FeatureKey::parse("!!not-base64!!").is_err());

        let not_json = BASE64.encode(b"hello");
        assert!(FeatureKey::parse(&not_json).is_err());
    }
}
