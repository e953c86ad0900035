use crate::core::{AttrError, Result};
use crate::model::{MassAssignmentPolicy, SerializedAttributesConfig};
use crate::schema::{AttributeDescriptor, AttributeOptions, AttributeRegistry, SqlType};
use log::trace;
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// Declarations owned by one model type, materialized on first access.
#[derive(Debug, Clone)]
struct ModelState {
    definition: AttributeRegistry,
    accessible: BTreeSet<String>,
}

impl ModelState {
    fn new(model: &str) -> Self {
        Self {
            definition: AttributeRegistry::new(model),
            accessible: BTreeSet::new(),
        }
    }

    fn inherited_by(&self, model: &str) -> Self {
        Self {
            definition: self.definition.inherited_by(model),
            accessible: self.accessible.clone(),
        }
    }
}

/// A data-model type: its table, its place in the inheritance chain and its
/// virtual attribute declarations.
///
/// The registry is created lazily. On first access it becomes a deep copy of the
/// parent's registry (which is itself materialized if needed); from then on the two
/// evolve independently.
#[derive(Debug)]
pub struct ModelType {
    name: String,
    table_name: String,
    parent: Option<Arc<ModelType>>,
    serialized: Option<SerializedAttributesConfig>,
    mass_assignment: MassAssignmentPolicy,
    state: RwLock<Option<ModelState>>,
}

impl ModelType {
    pub fn builder(name: &str) -> ModelTypeBuilder {
        ModelTypeBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn parent(&self) -> Option<&Arc<ModelType>> {
        self.parent.as_ref()
    }

    pub fn supports_serialized_attributes(&self) -> bool {
        self.serialized.is_some()
    }

    pub fn serialized_config(&self) -> Option<&SerializedAttributesConfig> {
        self.serialized.as_ref()
    }

    pub fn serialized_column(&self) -> Option<&str> {
        self.serialized.as_ref().map(|config| config.column.as_str())
    }

    pub fn mass_assignment_policy(&self) -> MassAssignmentPolicy {
        self.mass_assignment
    }

    /// `true` when `self` is `other` or one of its descendants.
    pub fn is_a(&self, other: &ModelType) -> bool {
        let mut current = Some(self);
        while let Some(model) = current {
            if std::ptr::eq(model, other) {
                return true;
            }
            current = model.parent.as_deref();
        }
        false
    }

    /// Declare a virtual attribute stored in the serialized column.
    pub fn attribute(&self, name: &str, sql_type: SqlType, options: AttributeOptions) -> Result<()> {
        self.ensure_supported()?;
        let accessible = options.accessible;
        let descriptor = AttributeDescriptor::new(name, sql_type, options);
        trace!(
            "{}: attribute '{}' ({}, default {})",
            self.name,
            name,
            descriptor.sql_type(),
            descriptor.default()
        );

        self.with_state(|state| {
            state.definition.define(descriptor);
            if accessible {
                state.accessible.insert(name.to_string());
            }
        })
    }

    /// Declare a virtual attribute that may be set through mass assignment.
    pub fn accessible_attribute(
        &self,
        name: &str,
        sql_type: SqlType,
        options: AttributeOptions,
    ) -> Result<()> {
        self.attribute(name, sql_type, options.accessible(true))
    }

    /// Whitelist attributes (native columns or virtual ones) for mass assignment.
    pub fn attr_accessible<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_state(|state| {
            for name in names {
                state.accessible.insert(name.into());
            }
        })
    }

    pub fn serialized_attribute_names(&self) -> Result<Vec<String>> {
        self.ensure_supported()?;
        self.with_state(|state| state.definition.names())
    }

    pub fn attribute_definition(&self, name: &str) -> Result<AttributeDescriptor> {
        self.ensure_supported()?;
        self.with_state(|state| state.definition.get(name).cloned())?
    }

    /// Like `attribute_definition`, but `None` for undeclared names.
    pub fn find_attribute(&self, name: &str) -> Result<Option<AttributeDescriptor>> {
        if !self.supports_serialized_attributes() {
            return Ok(None);
        }
        self.with_state(|state| state.definition.find(name).cloned())
    }

    /// Snapshot of the current registry.
    pub fn definition(&self) -> Result<AttributeRegistry> {
        self.ensure_supported()?;
        self.with_state(|state| state.definition.clone())
    }

    pub fn accessible_attributes(&self) -> Result<BTreeSet<String>> {
        self.with_state(|state| state.accessible.clone())
    }

    /// With an empty whitelist everything but `id` is assignable.
    pub fn is_accessible(&self, name: &str) -> Result<bool> {
        self.with_state(|state| {
            if state.accessible.is_empty() {
                name != "id"
            } else {
                state.accessible.contains(name)
            }
        })
    }

    fn ensure_supported(&self) -> Result<()> {
        if self.supports_serialized_attributes() {
            Ok(())
        } else {
            Err(AttrError::SerializedAttributesUnsupported(self.name.clone()))
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut ModelState) -> R) -> Result<R> {
        let mut guard = self.state.write()?;
        let state = match guard.take() {
            Some(state) => state,
            None => self.load_parent_state()?,
        };
        Ok(f(guard.insert(state)))
    }

    fn load_parent_state(&self) -> Result<ModelState> {
        match &self.parent {
            Some(parent) => {
                trace!("{}: copying declarations from '{}'", self.name, parent.name);
                parent.with_state(|state| state.inherited_by(&self.name))
            }
            None => Ok(ModelState::new(&self.name)),
        }
    }
}

pub struct ModelTypeBuilder {
    name: String,
    table_name: Option<String>,
    parent: Option<Arc<ModelType>>,
    serialized: Option<SerializedAttributesConfig>,
    mass_assignment: Option<MassAssignmentPolicy>,
}

impl ModelTypeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            table_name: None,
            parent: None,
            serialized: None,
            mass_assignment: None,
        }
    }

    /// Set the backing table; subtypes default to their parent's table
    pub fn table(mut self, table_name: &str) -> Self {
        self.table_name = Some(table_name.to_string());
        self
    }

    pub fn inherits(mut self, parent: &Arc<ModelType>) -> Self {
        self.parent = Some(Arc::clone(parent));
        self
    }

    /// Include serialized attributes using the default column and codec
    pub fn serialized_attributes(self) -> Self {
        self.serialized_attributes_with(SerializedAttributesConfig::default())
    }

    pub fn serialized_attributes_with(mut self, config: SerializedAttributesConfig) -> Self {
        self.serialized = Some(config);
        self
    }

    pub fn mass_assignment(mut self, policy: MassAssignmentPolicy) -> Self {
        self.mass_assignment = Some(policy);
        self
    }

    pub fn build(self) -> Arc<ModelType> {
        let parent = self.parent;

        // Including the capability again below a type that already has it changes nothing.
        let serialized = match parent.as_ref().and_then(|p| p.serialized.clone()) {
            Some(inherited) => {
                if self.serialized.is_some() {
                    trace!("{}: serialized attributes already included by an ancestor", self.name);
                }
                Some(inherited)
            }
            None => self.serialized,
        };

        let table_name = self
            .table_name
            .or_else(|| parent.as_ref().map(|p| p.table_name.clone()))
            .unwrap_or_else(|| default_table_name(&self.name));

        let mass_assignment = self
            .mass_assignment
            .or_else(|| parent.as_ref().map(|p| p.mass_assignment))
            .unwrap_or_default();

        Arc::new(ModelType {
            name: self.name,
            table_name,
            parent,
            serialized,
            mass_assignment,
            state: RwLock::new(None),
        })
    }
}

/// `BlogPost` -> `blog_posts`
pub fn default_table_name(model_name: &str) -> String {
    let mut table = String::with_capacity(model_name.len() + 4);
    for (idx, ch) in model_name.chars().enumerate() {
        if ch.is_uppercase() {
            if idx > 0 {
                table.push('_');
            }
            table.extend(ch.to_lowercase());
        } else {
            table.push(ch);
        }
    }
    table.push('s');
    table
}
