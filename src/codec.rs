//! Encoders for the serialized column.
//!
//! A codec turns the decoded attribute map into the bytes stored in the row and back.
//! Decoding failures are reported as `MalformedSerializedColumn` so callers of
//! `unpack` see which column was unreadable.

use crate::core::{AttrError, AttributeMap, Result};
use std::fmt;

pub trait SerializedCodec: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn encode(&self, map: &AttributeMap) -> Result<Vec<u8>>;

    fn decode(&self, column: &str, bytes: &[u8]) -> Result<AttributeMap>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl SerializedCodec for JsonCodec {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, map: &AttributeMap) -> Result<Vec<u8>> {
        serde_json::to_vec(map).map_err(|e| AttrError::Codec(e.to_string()))
    }

    fn decode(&self, column: &str, bytes: &[u8]) -> Result<AttributeMap> {
        serde_json::from_slice(bytes).map_err(|e| AttrError::MalformedSerializedColumn {
            column: column.to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec;

impl SerializedCodec for MessagePackCodec {
    fn name(&self) -> &'static str {
        "msgpack"
    }

    fn encode(&self, map: &AttributeMap) -> Result<Vec<u8>> {
        rmp_serde::to_vec(map).map_err(|e| AttrError::Codec(e.to_string()))
    }

    fn decode(&self, column: &str, bytes: &[u8]) -> Result<AttributeMap> {
        rmp_serde::from_slice(bytes).map_err(|e| AttrError::MalformedSerializedColumn {
            column: column.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn sample() -> AttributeMap {
        let mut map = AttributeMap::new();
        map.insert("title".to_string(), Value::from("Hi"));
        map.insert("published".to_string(), Value::Boolean(false));
        map.insert("size".to_string(), Value::Integer(99));
        map.insert("note".to_string(), Value::Null);
        map
    }

    #[test]
    fn test_json_codec() {
        let codec = JsonCodec;
        let bytes = codec.encode(&sample()).unwrap();
        assert_eq!(
            String::from_utf8(bytes.clone()).unwrap(),
            r#"{"note":null,"published":false,"size":99,"title":"Hi"}"#
        );
        assert_eq!(codec.decode("data", &bytes).unwrap(), sample());
    }

    #[test]
    fn test_msgpack_codec() {
        let codec = MessagePackCodec;
        let bytes = codec.encode(&sample()).unwrap();
        assert_eq!(codec.decode("data", &bytes).unwrap(), sample());
    }

    #[test]
    fn test_malformed_blob() {
        let err = JsonCodec.decode("data", b"{not json").unwrap_err();
        assert!(matches!(
            err,
            AttrError::MalformedSerializedColumn { ref column, .. } if column == "data"
        ));

        // A valid document that is not a mapping is malformed as well.
        assert!(JsonCodec.decode("data", b"[1, 2]").is_err());
    }
}
