use thiserror::Error;

#[derive(Error, Debug)]
pub enum AttrError {
    #[error("Unknown attribute '{name}' for model '{model}'")]
    UnknownAttribute { model: String, name: String },

    #[error("Malformed serialized column '{column}': {reason}")]
    MalformedSerializedColumn { column: String, reason: String },

    #[error("Model '{0}' does not include serialized attributes")]
    SerializedAttributesUnsupported(String),

    #[error("Attribute '{name}' on model '{model}' is not a boolean")]
    NotBoolean { model: String, name: String },

    #[error("Attribute '{name}' on model '{model}' is protected from mass assignment")]
    MassAssignmentDenied { model: String, name: String },

    #[error("Table '{0}' already exists")]
    TableExists(String),

    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Record {id} not found in table '{table}'")]
    RecordNotFound { table: String, id: u64 },

    #[error("Record of model '{0}' has not been saved")]
    NotPersisted(String),

    #[error("Column '{0}' not found in table '{1}'")]
    ColumnNotFound(String, String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, AttrError>;

impl<T> From<std::sync::PoisonError<T>> for AttrError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
