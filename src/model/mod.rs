pub mod config;
pub mod model_type;

pub use config::{DEFAULT_SERIALIZED_COLUMN, MassAssignmentPolicy, SerializedAttributesConfig};
pub use model_type::{ModelType, ModelTypeBuilder, default_table_name};
