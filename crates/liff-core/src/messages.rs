//! Port messages exchanged between the application and the bridge.
//!
//! Both directions use the same structured shape:
//!
//! ```json
//! { "method": "getProfile", "data": { "userId": "U123" } }
//! ```
//!
//! The positional tuple form `["method", data]` is not accepted.

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A capability request emitted by the application.
///
/// Deserializes from a JSON object only. Sequences are rejected, so the
/// positional `["method", data]` form fails through every serde entry point.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OutboundMessage {
    /// Capability name, e.g. `"isLoggedIn"`.
    pub method: String,
    /// Method-specific payload. Missing payloads decode as `null`.
    pub data: Value,
}

impl OutboundMessage {
    /// Create a request with a payload.
    pub fn new(method: impl Into<String>, data: Value) -> Self {
        Self {
            method: method.into(),
            data,
        }
    }

    /// Create a request whose payload is `null`.
    pub fn bare(method: impl Into<String>) -> Self {
        Self::new(method, Value::Null)
    }

    /// Decode a request from one JSON document.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Field layout of the object encoding.
#[derive(Deserialize)]
struct Wire {
    method: String,
    #[serde(default)]
    data: Value,
}

struct OutboundVisitor;

impl<'de> Visitor<'de> for OutboundVisitor {
    type Value = OutboundMessage;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outbound message object with `method` and `data`")
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let Wire { method, data } = Wire::deserialize(MapAccessDeserializer::new(map))?;
        Ok(OutboundMessage { method, data })
    }
}

impl<'de> Deserialize<'de> for OutboundMessage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OutboundVisitor)
    }
}

/// A capability result relayed back to the application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Name of the method this result answers.
    pub method: String,
    /// Result payload.
    pub data: Value,
}

impl InboundMessage {
    /// Create a result message.
    pub fn new(method: impl Into<String>, data: Value) -> Self {
        Self {
            method: method.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn outbound_decodes_object() {
        let msg = OutboundMessage::from_json(r#"{"method":"openWindow","data":{"url":"u"}}"#)
            .unwrap();
        assert_eq!(msg.method, "openWindow");
        assert_eq!(msg.data["url"], "u");
    }

    #[test]
    fn outbound_missing_data_is_null() {
        let msg = OutboundMessage::from_json(r#"{"method":"isLoggedIn"}"#).unwrap();
        assert_eq!(msg, OutboundMessage::bare("isLoggedIn"));
        assert!(msg.data.is_null());
    }

    #[test]
    fn outbound_rejects_positional_tuple() {
        let err = OutboundMessage::from_json(r#"["isLoggedIn", null]"#).unwrap_err();
        assert!(err.to_string().contains("expected an outbound message object"));
    }

    #[test]
    fn outbound_serde_entry_points_reject_tuple() {
        assert!(serde_json::from_value::<OutboundMessage>(json!(["isLoggedIn", null])).is_err());
        assert!(serde_json::from_value::<OutboundMessage>(json!(["sendMessages", [1]])).is_err());
        assert!(serde_json::from_str::<OutboundMessage>(r#"["isLoggedIn", null]"#).is_err());
        assert!(serde_json::from_reader::<_, OutboundMessage>(&b"[\"getVersion\"]"[..]).is_err());
    }

    #[test]
    fn outbound_from_value_accepts_object() {
        let msg: OutboundMessage =
            serde_json::from_value(json!({"method": "sendMessages", "data": [1]})).unwrap();
        assert_eq!(msg, OutboundMessage::new("sendMessages", json!([1])));

        let bare: OutboundMessage = serde_json::from_value(json!({"method": "getVersion"})).unwrap();
        assert_eq!(bare, OutboundMessage::bare("getVersion"));
    }

    #[test]
    fn outbound_rejects_scalars() {
        assert!(serde_json::from_value::<OutboundMessage>(json!("isLoggedIn")).is_err());
        assert!(serde_json::from_value::<OutboundMessage>(Value::Null).is_err());
    }

    #[test]
    fn outbound_rejects_missing_method() {
        assert!(OutboundMessage::from_json(r#"{"data":1}"#).is_err());
    }

    #[test]
    fn outbound_rejects_invalid_json() {
        assert!(OutboundMessage::from_json("{not json").is_err());
    }

    #[test]
    fn inbound_serializes_method_and_data() {
        let msg = InboundMessage::new("isLoggedIn", json!(true));
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value, json!({"method": "isLoggedIn", "data": true}));
    }

    #[test]
    fn inbound_keeps_null_data() {
        let msg = InboundMessage::new("getAccessToken", Value::Null);
        let encoded = serde_json::to_string(&msg).unwrap();
        assert_eq!(encoded, r#"{"method":"getAccessToken","data":null}"#);
    }
}
