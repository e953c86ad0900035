use crate::core::{AttrError, Result};
use crate::schema::AttributeDescriptor;

/// Ordered set of attribute descriptors declared for one model type.
///
/// Cloning produces a fully independent registry; subtypes rely on that to keep
/// their declarations from leaking into the parent.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    model: String,
    attributes: Vec<AttributeDescriptor>,
}

impl AttributeRegistry {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: Vec::new(),
        }
    }

    /// Copy of `self` re-labelled for another model.
    pub fn inherited_by(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            attributes: self.attributes.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Redefining an existing name replaces its descriptor in place.
    pub fn define(&mut self, descriptor: AttributeDescriptor) {
        match self.find_index(descriptor.name()) {
            Some(idx) => self.attributes[idx] = descriptor,
            None => self.attributes.push(descriptor),
        }
    }

    pub fn get(&self, name: &str) -> Result<&AttributeDescriptor> {
        self.find(name).ok_or_else(|| AttrError::UnknownAttribute {
            model: self.model.clone(),
            name: name.to_string(),
        })
    }

    pub fn find(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.find_index(name).map(|idx| &self.attributes[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find_index(name).is_some()
    }

    pub fn names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name().to_string()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeDescriptor> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn find_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;
    use crate::schema::{AttributeOptions, SqlType};

    fn descriptor(name: &str, sql_type: SqlType) -> AttributeDescriptor {
        AttributeDescriptor::new(name, sql_type, AttributeOptions::new())
    }

    #[test]
    fn test_define_and_get() {
        let mut registry = AttributeRegistry::new("Post");
        registry.define(descriptor("title", SqlType::String));
        registry.define(descriptor("published", SqlType::Boolean));

        assert_eq!(registry.names(), vec!["title", "published"]);
        assert_eq!(registry.get("published").unwrap().sql_type(), &SqlType::Boolean);
    }

    #[test]
    fn test_unknown_attribute() {
        let registry = AttributeRegistry::new("Post");
        match registry.get("missing") {
            Err(AttrError::UnknownAttribute { model, name }) => {
                assert_eq!(model, "Post");
                assert_eq!(name, "missing");
            }
            other => panic!("expected UnknownAttribute, got {:?}", other),
        }
    }

    #[test]
    fn test_redefine_keeps_position() {
        let mut registry = AttributeRegistry::new("Post");
        registry.define(descriptor("a", SqlType::String));
        registry.define(descriptor("b", SqlType::String));
        registry.define(AttributeDescriptor::new(
            "a",
            SqlType::Integer,
            AttributeOptions::new().default_value(1_i64),
        ));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().default(), &Value::Integer(1));
    }

    #[test]
    fn test_inherited_copy_is_independent() {
        let mut parent = AttributeRegistry::new("Comment");
        parent.define(descriptor("body", SqlType::String));

        let mut child = parent.inherited_by("CommentWithAuthor");
        child.define(descriptor("author", SqlType::String));

        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 2);
        assert_eq!(child.model(), "CommentWithAuthor");
    }
}
