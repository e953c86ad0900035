pub mod lifecycle;
mod mass_assignment;

pub use lifecycle::{pack, unpack};

use crate::core::{AttrError, AttributeMap, Result, Value};
use crate::model::ModelType;
use crate::schema::{AttributeDescriptor, AttributeType};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A single row of a model, with live field storage for native columns and
/// virtual attributes alike.
///
/// The serialized column, when the row has one, is kept as stored (`Value::Blob`
/// or `Value::Null`) under its column name and decoded on demand into an
/// [`AttributeMap`] that `pack` and `unpack` work on.
#[derive(Debug, Clone)]
pub struct Record {
    model: Arc<ModelType>,
    id: Option<u64>,
    attributes: BTreeMap<String, Value>,
    serialized_data: Option<AttributeMap>,
}

impl Record {
    /// Wraps raw column values without running any lifecycle hook.
    pub fn from_row(model: Arc<ModelType>, id: Option<u64>, row: BTreeMap<String, Value>) -> Self {
        Self {
            model,
            id,
            attributes: row,
            serialized_data: None,
        }
    }

    pub fn model(&self) -> &Arc<ModelType> {
        &self.model
    }

    pub fn id(&self) -> Option<u64> {
        self.id
    }

    pub fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    /// Whether this row's schema has the model's serialized column at all.
    pub fn has_serialized_column(&self) -> bool {
        self.model
            .serialized_column()
            .is_some_and(|column| self.attributes.contains_key(column))
    }

    pub fn serialized_attribute_names(&self) -> Result<Vec<String>> {
        self.model.serialized_attribute_names()
    }

    /// Current value of an attribute. Virtual attributes are cast through their
    /// descriptor (falling back to the default when never set); native columns are
    /// returned as stored.
    pub fn get(&self, name: &str) -> Result<Value> {
        match self.model.find_attribute(name)? {
            Some(descriptor) => Ok(self.cast_current(&descriptor)),
            None => self
                .attributes
                .get(name)
                .cloned()
                .ok_or_else(|| self.unknown(name)),
        }
    }

    pub fn get_typed<T: AttributeType>(&self, name: &str) -> Result<Option<T>> {
        Ok(T::from_value(&self.get(name)?))
    }

    /// Stores a raw value. Virtual attributes are cast on the next read, not here.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let known = self.attributes.contains_key(name) || self.model.find_attribute(name)?.is_some();
        if !known {
            return Err(self.unknown(name));
        }

        if self.model.serialized_column() == Some(name) {
            self.serialized_data = None;
        }
        self.attributes.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Predicate accessor for boolean attributes; an unset flag reads as `false`.
    pub fn predicate(&self, name: &str) -> Result<bool> {
        let descriptor = self.model.attribute_definition(name)?;
        if !descriptor.sql_type().is_boolean() {
            return Err(AttrError::NotBoolean {
                model: self.model.name().to_string(),
                name: name.to_string(),
            });
        }
        Ok(self.cast_current(&descriptor).as_bool().unwrap_or(false))
    }

    /// Raw stored value without any casting.
    pub fn read_attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Decoded contents of the serialized column, or `None` when the row has no
    /// such column.
    pub fn serialized_attributes_data(&mut self) -> Result<Option<&AttributeMap>> {
        if !self.has_serialized_column() {
            return Ok(None);
        }
        let data = self.take_decoded()?;
        let data = &*self.serialized_data.insert(data);
        Ok(Some(data))
    }

    /// Re-encodes decoded serialized data into the column slot.
    pub(crate) fn encode_serialized_column(&mut self) -> Result<()> {
        let Some(config) = self.model.serialized_config() else {
            return Ok(());
        };
        if let Some(data) = &self.serialized_data {
            let bytes = config.codec.encode(data)?;
            self.attributes.insert(config.column.clone(), Value::Blob(bytes));
        }
        Ok(())
    }

    pub(crate) fn mark_persisted(&mut self, id: u64) {
        self.id = Some(id);
    }

    pub(crate) fn write_column(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }

    fn cast_current(&self, descriptor: &AttributeDescriptor) -> Value {
        let raw = self
            .attributes
            .get(descriptor.name())
            .unwrap_or_else(|| descriptor.default());
        descriptor.type_cast(raw)
    }

    /// Decoded column contents, taken out of the cache or decoded from the slot.
    fn take_decoded(&mut self) -> Result<AttributeMap> {
        if let Some(data) = self.serialized_data.take() {
            return Ok(data);
        }
        let Some(config) = self.model.serialized_config() else {
            return Ok(AttributeMap::new());
        };

        match self.attributes.get(&config.column) {
            None | Some(Value::Null) => Ok(AttributeMap::new()),
            Some(Value::Blob(bytes)) => config.codec.decode(&config.column, bytes),
            Some(Value::Text(text)) => config.codec.decode(&config.column, text.as_bytes()),
            Some(other) => Err(AttrError::MalformedSerializedColumn {
                column: config.column.clone(),
                reason: format!("expected encoded data, found {}", other.type_name()),
            }),
        }
    }

    fn unknown(&self, name: &str) -> AttrError {
        AttrError::UnknownAttribute {
            model: self.model.name().to_string(),
            name: name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeOptions, SqlType};

    fn sprocket() -> Arc<ModelType> {
        let model = ModelType::builder("Sprocket").serialized_attributes().build();
        model
            .attribute("in_motion", SqlType::Boolean, AttributeOptions::new())
            .unwrap();
        model
            .attribute("size", SqlType::Integer, AttributeOptions::new().default_value(1_i64))
            .unwrap();
        model
    }

    fn row() -> BTreeMap<String, Value> {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), Value::Null);
        row.insert("serialized_attributes".to_string(), Value::Null);
        row
    }

    #[test]
    fn test_getter_falls_back_to_default() {
        let record = Record::from_row(sprocket(), None, row());
        assert_eq!(record.get("size").unwrap(), Value::Integer(1));
        assert_eq!(record.get("in_motion").unwrap(), Value::Null);
    }

    #[test]
    fn test_setter_stores_raw_and_getter_casts() {
        let mut record = Record::from_row(sprocket(), None, row());
        record.set("size", "42").unwrap();
        assert_eq!(record.read_attribute("size"), Some(&Value::from("42")));
        assert_eq!(record.get("size").unwrap(), Value::Integer(42));
        assert_eq!(record.get_typed::<i64>("size").unwrap(), Some(42));
    }

    #[test]
    fn test_native_columns_are_readable() {
        let mut record = Record::from_row(sprocket(), None, row());
        record.set("name", "Spacely").unwrap();
        assert_eq!(record.get("name").unwrap(), Value::from("Spacely"));
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        let mut record = Record::from_row(sprocket(), None, row());
        assert!(matches!(record.get("nope"), Err(AttrError::UnknownAttribute { .. })));
        assert!(matches!(record.set("nope", 1), Err(AttrError::UnknownAttribute { .. })));
    }

    #[test]
    fn test_predicate() {
        let mut record = Record::from_row(sprocket(), None, row());
        assert!(!record.predicate("in_motion").unwrap());
        record.set("in_motion", "1").unwrap();
        assert!(record.predicate("in_motion").unwrap());
        assert!(matches!(record.predicate("size"), Err(AttrError::NotBoolean { .. })));
    }
}
