use crate::core::Value;
use crate::schema::coercion;
use std::fmt;
use std::sync::Arc;

/// Cast rule for a caller-defined attribute type.
pub trait Coercion: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn cast(&self, raw: &Value) -> Value;
}

/// Identity cast used for type tokens nobody recognizes.
#[derive(Debug, Clone)]
pub struct Passthrough {
    name: String,
}

impl Passthrough {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Coercion for Passthrough {
    fn name(&self) -> &str {
        &self.name
    }

    fn cast(&self, raw: &Value) -> Value {
        raw.clone()
    }
}

#[derive(Debug, Clone)]
pub enum SqlType {
    String,
    Boolean,
    Integer,
    Decimal,
    Float,
    Date,
    /// Point in time, cast to a UTC timestamp.
    Time,
    Custom(Arc<dyn Coercion>),
}

impl SqlType {
    pub fn custom<C: Coercion + 'static>(coercion: C) -> Self {
        Self::Custom(Arc::new(coercion))
    }

    /// Maps a declared type token to its coercion kind. Unknown tokens pass through unchanged.
    pub fn from_token(token: &str) -> Self {
        match token {
            "string" | "text" | "String" => Self::String,
            "boolean" | "flag" | "Boolean" => Self::Boolean,
            "integer" | "Integer" | "Fixnum" => Self::Integer,
            "decimal" | "BigDecimal" => Self::Decimal,
            "float" | "Float" => Self::Float,
            "date" | "Date" => Self::Date,
            "time" | "Time" | "DateTime" | "datetime" | "timestamp" => Self::Time,
            other => Self::Custom(Arc::new(Passthrough::new(other))),
        }
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean)
    }

    pub fn cast(&self, raw: &Value) -> Value {
        match self {
            Self::String => coercion::to_string(raw),
            Self::Boolean => coercion::to_boolean(raw),
            Self::Integer => coercion::to_integer(raw),
            Self::Decimal => coercion::to_decimal(raw),
            Self::Float => coercion::to_float(raw),
            Self::Date => coercion::to_date(raw),
            Self::Time => coercion::to_timestamp(raw),
            Self::Custom(rule) => rule.cast(raw),
        }
    }
}

impl PartialEq for SqlType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Custom(a), Self::Custom(b)) => a.name() == b.name(),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => write!(f, "string"),
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::Decimal => write!(f, "decimal"),
            Self::Float => write!(f, "float"),
            Self::Date => write!(f, "date"),
            Self::Time => write!(f, "time"),
            Self::Custom(rule) => write!(f, "{}", rule.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Upcase;

    impl Coercion for Upcase {
        fn name(&self) -> &str {
            "upcase"
        }

        fn cast(&self, raw: &Value) -> Value {
            match raw {
                Value::Text(s) => Value::Text(s.to_uppercase()),
                other => other.clone(),
            }
        }
    }

    #[test]
    fn test_type_tokens() {
        assert_eq!(SqlType::from_token("text"), SqlType::String);
        assert_eq!(SqlType::from_token("flag"), SqlType::Boolean);
        assert_eq!(SqlType::from_token("Fixnum"), SqlType::Integer);
        assert_eq!(SqlType::from_token("BigDecimal"), SqlType::Decimal);
        assert_eq!(SqlType::from_token("DateTime"), SqlType::Time);
        assert_eq!(SqlType::from_token("timestamp"), SqlType::Time);
    }

    #[test]
    fn test_unknown_token_is_identity() {
        let ty = SqlType::from_token("point");
        assert_eq!(ty.to_string(), "point");
        let raw = Value::Text("1,2".into());
        assert_eq!(ty.cast(&raw), raw);
    }

    #[test]
    fn test_custom_coercion() {
        let ty = SqlType::custom(Upcase);
        assert_eq!(ty.cast(&Value::from("abc")), Value::from("ABC"));
        assert!(!ty.is_boolean());
    }
}
