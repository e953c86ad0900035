use crate::core::Value;
use crate::schema::SqlType;

/// Options accepted when declaring a virtual attribute.
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
    pub default: Value,
    pub accessible: bool,
}

impl AttributeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallback written into live storage when a stored blob lacks the key
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    /// Allow the attribute to be set through mass assignment
    pub fn accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }
}

#[derive(Debug, Clone)]
pub struct AttributeDescriptor {
    name: String,
    sql_type: SqlType,
    default: Value,
    accessible: bool,
}

impl AttributeDescriptor {
    /// The default is cast through `sql_type` once, here.
    pub fn new(name: impl Into<String>, sql_type: SqlType, options: AttributeOptions) -> Self {
        let default = sql_type.cast(&options.default);
        Self {
            name: name.into(),
            sql_type,
            default,
            accessible: options.accessible,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql_type(&self) -> &SqlType {
        &self.sql_type
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn is_accessible(&self) -> bool {
        self.accessible
    }

    pub fn type_cast(&self, raw: &Value) -> Value {
        self.sql_type.cast(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cast_on_creation() {
        let descriptor = AttributeDescriptor::new(
            "size",
            SqlType::Integer,
            AttributeOptions::new().default_value("12"),
        );
        assert_eq!(descriptor.default(), &Value::Integer(12));
        assert!(!descriptor.is_accessible());
    }

    #[test]
    fn test_missing_default_is_null() {
        let descriptor = AttributeDescriptor::new("title", SqlType::String, AttributeOptions::new());
        assert!(descriptor.default().is_null());
    }
}
