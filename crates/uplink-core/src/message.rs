//! Inbound message types supplied by the host platform.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::codec;
use crate::config::metadata;
use crate::error::{DecodeError, Result};

/// Uplink payload.
///
/// Hosts deliver either the raw bytes (as a sequence of character codes) or
/// the text those codes spell out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Bytes(Vec<u8>),
    Text(String),
}

impl Payload {
    /// Run the payload codec.
    pub fn decode(&self) -> Result<Value> {
        match self {
            Payload::Bytes(bytes) => codec::decode(bytes),
            Payload::Text(text) => codec::parse_text(text),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Bytes(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::Bytes(bytes.to_vec())
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

/// Routing metadata.
///
/// Only `topicName` is interpreted. A `topicName` that is not text is treated
/// as absent; other keys are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(
        rename = "topicName",
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub topic_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Metadata {
    pub fn with_topic(topic: impl Into<String>) -> Self {
        Self {
            topic_name: Some(topic.into()),
            extra: Map::new(),
        }
    }

    /// Parse a metadata JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DecodeError::Metadata(e.to_string()))
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic_name.as_deref()
    }

    /// Any other metadata value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == metadata::TOPIC_NAME {
            return None;
        }
        self.extra.get(key)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// One inbound device message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    pub payload: Payload,
    #[serde(default)]
    pub metadata: Metadata,
}

impl RawMessage {
    pub fn new(payload: impl Into<Payload>, metadata: Metadata) -> Self {
        Self {
            payload: payload.into(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_topic() {
        let m = Metadata::from_json(r#"{"topicName": "data/A/environment", "qos": 1}"#).unwrap();
        assert_eq!(m.topic(), Some("data/A/environment"));
        assert_eq!(m.get("qos"), Some(&json!(1)));
    }

    #[test]
    fn test_metadata_non_text_topic_is_absent() {
        let m = Metadata::from_json(r#"{"topicName": 7}"#).unwrap();
        assert_eq!(m.topic(), None);
        let m = Metadata::from_json("{}").unwrap();
        assert_eq!(m.topic(), None);
    }

    #[test]
    fn test_metadata_malformed() {
        assert!(matches!(
            Metadata::from_json("not json"),
            Err(DecodeError::Metadata(_))
        ));
    }

    #[test]
    fn test_message_payload_forms() {
        let text: RawMessage = serde_json::from_value(json!({
            "payload": "{\"alarmType\":\"Poweroff\"}",
            "metadata": {"topicName": "alarm/1/power"}
        }))
        .unwrap();
        assert!(matches!(text.payload, Payload::Text(_)));

        let bytes: RawMessage = serde_json::from_value(json!({
            "payload": [123, 125],
            "metadata": {"topicName": "alarm/1/power"}
        }))
        .unwrap();
        assert_eq!(bytes.payload, Payload::Bytes(vec![b'{', b'}']));
        assert_eq!(bytes.payload.decode().unwrap(), json!({}));
    }
}
