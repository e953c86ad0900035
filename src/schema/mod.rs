pub mod attribute_type;
pub mod coercion;
pub mod descriptor;
pub mod registry;
pub mod sql_type;

pub use attribute_type::AttributeType;
pub use descriptor::{AttributeDescriptor, AttributeOptions};
pub use registry::AttributeRegistry;
pub use sql_type::{Coercion, Passthrough, SqlType};
