use crate::core::Value;
use crate::schema::SqlType;
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};

/// Rust types usable as typed virtual attributes.
///
/// `sql_type` picks the coercion applied to raw stored values; `from_value` reads
/// the already-cast value back out.
pub trait AttributeType: Sized {
    fn sql_type() -> SqlType;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Option<Self>;
}

impl AttributeType for String {
    fn sql_type() -> SqlType {
        SqlType::String
    }

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl AttributeType for bool {
    fn sql_type() -> SqlType {
        SqlType::Boolean
    }

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl AttributeType for i64 {
    fn sql_type() -> SqlType {
        SqlType::Integer
    }

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64()
    }
}

impl AttributeType for i32 {
    fn sql_type() -> SqlType {
        SqlType::Integer
    }

    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|i| i32::try_from(i).ok())
    }
}

impl AttributeType for f64 {
    fn sql_type() -> SqlType {
        SqlType::Float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

impl AttributeType for BigDecimal {
    fn sql_type() -> SqlType {
        SqlType::Decimal
    }

    fn into_value(self) -> Value {
        Value::Decimal(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Decimal(d) => Some(d.clone()),
            _ => None,
        }
    }
}

impl AttributeType for NaiveDate {
    fn sql_type() -> SqlType {
        SqlType::Date
    }

    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl AttributeType for DateTime<Utc> {
    fn sql_type() -> SqlType {
        SqlType::Time
    }

    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}
