use serialized_attributes::prelude::*;
use std::sync::Arc;

serialized_model! {
    /// Sprocket with typed accessors over its serialized attributes.
    pub struct Sprocket {
        in_motion: bool = false,
        #[accessible]
        size: i64 = 1,
        #[accessible]
        label: String,
    }
}

fn setup() -> Result<(Database, Arc<ModelType>)> {
    let mut db = Database::new();
    db.create_table(
        TableSchema::new("sprockets")
            .column("serialized_attributes", DataType::Blob)
            .timestamps(),
    )?;

    let model = ModelType::builder("Sprocket")
        .serialized_attributes()
        .mass_assignment(MassAssignmentPolicy::Strict)
        .build();
    Sprocket::declare(&model)?;
    Ok((db, model))
}

#[test]
fn test_declare_registers_fields_in_order() -> Result<()> {
    let (_db, model) = setup()?;
    assert_eq!(Sprocket::field_names(), &["in_motion", "size", "label"]);
    assert_eq!(model.serialized_attribute_names()?, vec!["in_motion", "size", "label"]);
    assert_eq!(model.attribute_definition("size")?.sql_type(), &SqlType::Integer);
    assert_eq!(model.attribute_definition("size")?.default(), &Value::Integer(1));
    assert!(model.attribute_definition("label")?.default().is_null());
    Ok(())
}

#[test]
fn test_typed_accessors_round_trip_through_storage() -> Result<()> {
    let (mut db, model) = setup()?;

    let mut sprocket = Sprocket::from_record(db.new_record(&model)?);
    assert_eq!(sprocket.size()?, Some(1));
    assert!(!sprocket.is_in_motion()?);
    assert_eq!(sprocket.label()?, None);

    sprocket.set_in_motion(true)?;
    sprocket.set_size(42)?;
    sprocket.set_label("cog".to_string())?;
    let id = db.save(sprocket.record_mut())?;

    let loaded = Sprocket::from_record(db.find(&model, id)?);
    assert!(loaded.is_in_motion()?);
    assert_eq!(loaded.in_motion()?, Some(true));
    assert_eq!(loaded.size()?, Some(42));
    assert_eq!(loaded.label()?, Some("cog".to_string()));
    Ok(())
}

#[test]
fn test_accessible_flags_drive_mass_assignment() -> Result<()> {
    let (mut db, model) = setup()?;

    let record = db.create(&model, [("size", Value::from("7 teeth")), ("label", Value::from("gear"))])?;
    let sprocket = Sprocket::from_record(record);
    assert_eq!(sprocket.size()?, Some(7));
    assert_eq!(sprocket.label()?, Some("gear".to_string()));

    let denied = db.create(&model, [("in_motion", Value::from(true))]);
    assert!(matches!(
        denied,
        Err(AttrError::MassAssignmentDenied { ref name, .. }) if name == "in_motion"
    ));
    Ok(())
}
