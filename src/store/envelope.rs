//! Versioned wrapper around serialized records

use serde::{Deserialize, Serialize};

/// Serialization schema version written into every envelope.
///
/// Bump whenever the shape of `AnalysisRecord` changes. Entries written
/// under any other version read as missing and get recomputed.
pub const FORMAT_VERSION: u32 = 1;

/// The unit actually written to the key-value store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEnvelope {
    /// Serialized record bytes, opaque at this layer
    #[serde(with = "hex_bytes")]
    pub payload: Vec<u8>,

    /// Schema version in effect when written
    pub format_version: u32,
}

impl StoredEnvelope {
    /// Wrap `payload` with the current format version
    pub fn current(payload: Vec<u8>) -> Self {
        Self {
            payload,
            format_version: FORMAT_VERSION,
        }
    }

    /// Whether this envelope was written under the current format version
    pub fn is_current(&self) -> bool {
        self.format_version == FORMAT_VERSION
    }

    pub fn encode(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    pub fn decode(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_envelope_is_current() {
        let env = StoredEnvelope::current(b"{}".to_vec());
        assert!(env.is_current());

        let stale = StoredEnvelope {
            payload: vec![],
            format_version: FORMAT_VERSION + 1,
        };
        assert!(!stale.is_current());
    }

    #[test]
    fn payload_is_hex_on_the_wire() {
        let env = StoredEnvelope::current(vec![0xde, 0xad]);
        let json = String::from_utf8(env.encode().unwrap()).unwrap();
        assert!(json.contains("\"payload\":\"dead\""));
        assert_eq!(StoredEnvelope::decode(json.as_bytes()).unwrap(), env);
    }

    #[test]
    fn bad_hex_fails_to_decode() {
        let json = br#"{"payload":"zz","format_version":1}"#;
        assert!(StoredEnvelope::decode(json).is_err());
    }
}
