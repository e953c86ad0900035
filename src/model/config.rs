use crate::codec::{JsonCodec, SerializedCodec};
use std::sync::Arc;

pub const DEFAULT_SERIALIZED_COLUMN: &str = "serialized_attributes";

/// Per-type settings fixed when a model includes serialized attributes.
///
/// Subtypes inherit the settings of the type that first included the capability.
#[derive(Debug, Clone)]
pub struct SerializedAttributesConfig {
    /// Name of the column holding the encoded attribute map
    pub column: String,

    /// Codec used to encode and decode that column
    pub codec: Arc<dyn SerializedCodec>,
}

impl SerializedAttributesConfig {
    pub fn new() -> Self {
        Self {
            column: DEFAULT_SERIALIZED_COLUMN.to_string(),
            codec: Arc::new(JsonCodec),
        }
    }

    /// Set the serialized column name
    pub fn column(mut self, column: &str) -> Self {
        self.column = column.to_string();
        self
    }

    /// Set the codec
    pub fn codec<C: SerializedCodec + 'static>(mut self, codec: C) -> Self {
        self.codec = Arc::new(codec);
        self
    }
}

impl Default for SerializedAttributesConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What mass assignment does with names that are not accessible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MassAssignmentPolicy {
    /// Skip the name and log a warning
    #[default]
    Log,
    /// Fail with `MassAssignmentDenied`
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::MessagePackCodec;

    #[test]
    fn test_default_config() {
        let config = SerializedAttributesConfig::default();
        assert_eq!(config.column, "serialized_attributes");
        assert_eq!(config.codec.name(), "json");
    }

    #[test]
    fn test_builder() {
        let config = SerializedAttributesConfig::new()
            .column("serialized_attributes_data")
            .codec(MessagePackCodec);
        assert_eq!(config.column, "serialized_attributes_data");
        assert_eq!(config.codec.name(), "msgpack");
    }
}
