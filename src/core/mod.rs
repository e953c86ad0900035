pub mod error;
pub mod value;

pub use error::{AttrError, Result};
pub use value::{AttributeMap, Value};
