use crate::core::{AttrError, Result, Value};
use crate::model::MassAssignmentPolicy;
use crate::record::Record;
use log::warn;

impl Record {
    /// Bulk assignment from untrusted input. Only names the model marks accessible
    /// are written; the rest are skipped or rejected according to the model's
    /// [`MassAssignmentPolicy`].
    pub fn assign_attributes<I, K, V>(&mut self, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (name, value) in attributes {
            let name = name.as_ref();
            if !self.model.is_accessible(name)? {
                match self.model.mass_assignment_policy() {
                    MassAssignmentPolicy::Log => {
                        warn!(
                            "{}: can't mass-assign protected attribute '{}'",
                            self.model.name(),
                            name
                        );
                        continue;
                    }
                    MassAssignmentPolicy::Strict => {
                        return Err(AttrError::MassAssignmentDenied {
                            model: self.model.name().to_string(),
                            name: name.to_string(),
                        });
                    }
                }
            }
            self.set(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelType;
    use crate::schema::{AttributeOptions, SqlType};
    use std::collections::BTreeMap;

    fn widget_row() -> BTreeMap<String, Value> {
        let mut row = BTreeMap::new();
        row.insert("id".to_string(), Value::Null);
        row.insert("name".to_string(), Value::Null);
        row.insert("active".to_string(), Value::Null);
        row
    }

    #[test]
    fn test_protected_names_are_skipped() {
        let model = ModelType::builder("Widget").serialized_attributes().build();
        model.attr_accessible(["name"]).unwrap();
        model
            .accessible_attribute("size", SqlType::Integer, AttributeOptions::new())
            .unwrap();

        let mut record = Record::from_row(model, None, widget_row());
        record
            .assign_attributes([
                ("name", Value::from("Sprocket")),
                ("active", Value::from(true)),
                ("size", Value::from(99_i64)),
            ])
            .unwrap();

        assert_eq!(record.get("name").unwrap(), Value::from("Sprocket"));
        assert_eq!(record.get("active").unwrap(), Value::Null);
        assert_eq!(record.get("size").unwrap(), Value::Integer(99));
    }

    #[test]
    fn test_strict_policy_rejects() {
        let model = ModelType::builder("Widget")
            .serialized_attributes()
            .mass_assignment(MassAssignmentPolicy::Strict)
            .build();
        model.attr_accessible(["name"]).unwrap();

        let mut record = Record::from_row(model, None, widget_row());
        let err = record.assign_attributes([("active", true)]).unwrap_err();
        assert!(matches!(err, AttrError::MassAssignmentDenied { ref name, .. } if name == "active"));
    }

    #[test]
    fn test_id_is_never_mass_assignable() {
        let model = ModelType::builder("Widget").build();
        let mut record = Record::from_row(model, None, widget_row());
        record.assign_attributes([("id", 5_i64), ("name", 1_i64)]).unwrap();
        assert_eq!(record.get("id").unwrap(), Value::Null);
        assert_eq!(record.get("name").unwrap(), Value::Integer(1));
    }
}
