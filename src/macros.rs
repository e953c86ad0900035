//! Declarative macros for typed model wrappers.

mod attr_helpers;
mod serialized_model;
