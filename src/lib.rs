// ============================================================================
// serialized_attributes Library
// ============================================================================

//! Typed, defaulted virtual attributes persisted together in one serialized column.
//!
//! A [`ModelType`] declares attributes (string, boolean, integer, decimal, float,
//! date, time, or a caller-defined [`Coercion`]). Records of that type read and write
//! them like ordinary fields; on load the column is unpacked into live storage with
//! defaults backfilled for keys older rows never had, and on save the current values
//! are packed back with any key the type no longer declares pruned. Subtypes copy
//! their parent's declarations on first access and never leak new ones upward.
//!
//! # Examples
//!
//! ```
//! use serialized_attributes::{
//!     AttributeOptions, DataType, Database, ModelType, SqlType, TableSchema, Value,
//! };
//!
//! # fn main() -> serialized_attributes::Result<()> {
//! let mut db = Database::new();
//! db.create_table(
//!     TableSchema::new("posts").column("serialized_attributes", DataType::Blob),
//! )?;
//!
//! let post = ModelType::builder("Post").serialized_attributes().build();
//! post.attribute("title", SqlType::String, AttributeOptions::new())?;
//! post.attribute(
//!     "published",
//!     SqlType::Boolean,
//!     AttributeOptions::new().default_value(false),
//! )?;
//!
//! let mut record = db.new_record(&post)?;
//! record.set("title", "Hi")?;
//! let id = db.save(&mut record)?;
//!
//! let loaded = db.find(&post, id)?;
//! assert_eq!(loaded.get("title")?, Value::from("Hi"));
//! assert!(!loaded.predicate("published")?);
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod core;
mod macros;
pub mod model;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod storage;

#[doc(hidden)]
pub use paste;

// Re-export main types for convenience
pub use codec::{JsonCodec, MessagePackCodec, SerializedCodec};
pub use core::{AttrError, AttributeMap, Result, Value};
pub use model::{MassAssignmentPolicy, ModelType, ModelTypeBuilder, SerializedAttributesConfig};
pub use record::Record;
pub use schema::{
    AttributeDescriptor, AttributeOptions, AttributeRegistry, AttributeType, Coercion, SqlType,
};
pub use storage::{Column, DataType, Database, TableSchema};
