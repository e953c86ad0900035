//! Everything needed to declare and use serialized attribute models.

pub use crate::serialized_model;
pub use crate::{
    AttrError, AttributeOptions, AttributeType, DataType, Database, MassAssignmentPolicy,
    ModelType, Record, Result, SerializedAttributesConfig, SqlType, TableSchema, Value,
};
