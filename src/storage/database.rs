use crate::core::{AttrError, Result, Value};
use crate::model::ModelType;
use crate::record::Record;
use crate::storage::{Row, Table, TableSchema};
use chrono::Utc;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Minimal in-memory persistence layer that drives the serialized attribute
/// lifecycle: records are unpacked right after they are read and packed right
/// before they are written.
#[derive(Debug, Default)]
pub struct Database {
    tables: HashMap<String, Table>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_table(&mut self, schema: TableSchema) -> Result<()> {
        let name = schema.name().to_string();
        if self.tables.contains_key(&name) {
            return Err(AttrError::TableExists(name));
        }
        debug!("Creating table '{}' with {} columns", name, schema.columns().len());
        self.tables.insert(name, Table::new(schema));
        Ok(())
    }

    pub fn table_exists(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| AttrError::TableNotFound(name.to_string()))
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| AttrError::TableNotFound(name.to_string()))
    }

    /// Unsaved record with every column of the model's table set to `NULL`.
    ///
    /// No unpack happens here: virtual attributes read their defaults through the
    /// getter until the record is saved and loaded again.
    pub fn new_record(&self, model: &Arc<ModelType>) -> Result<Record> {
        let table = self.table(model.table_name())?;
        let mut row = table.schema().empty_row();
        if model.parent().is_some() && row.contains_key("type") {
            row.insert("type".to_string(), Value::from(model.name()));
        }
        Ok(Record::from_row(Arc::clone(model), None, row))
    }

    /// Materializes a stored row as `model` and unpacks its serialized column.
    pub fn instantiate(&self, model: &Arc<ModelType>, id: u64, row: Row) -> Result<Record> {
        let mut record = Record::from_row(Arc::clone(model), Some(id), row);
        record.unpack_serialized_attributes()?;
        Ok(record)
    }

    pub fn find(&self, model: &Arc<ModelType>, id: u64) -> Result<Record> {
        let table = self.table(model.table_name())?;
        let row = table.get(id).cloned().ok_or_else(|| AttrError::RecordNotFound {
            table: table.schema().name().to_string(),
            id,
        })?;
        debug!("Loading {} #{} from '{}'", model.name(), id, model.table_name());
        self.instantiate(model, id, row)
    }

    /// Packs and encodes the serialized column, then inserts or updates the row.
    pub fn save(&mut self, record: &mut Record) -> Result<u64> {
        record.pack_serialized_attributes()?;
        record.encode_serialized_column()?;

        let model = Arc::clone(record.model());
        let table = self.table_mut(model.table_name())?;
        let id = match record.id() {
            Some(id) => id,
            None => table.next_id(),
        };

        let now = Value::Timestamp(Utc::now());
        let schema = table.schema();
        if schema.has_column("id") {
            record.write_column("id", Value::Integer(id as i64));
        }
        if schema.has_column("created_at")
            && record.read_attribute("created_at").is_none_or(Value::is_null)
        {
            record.write_column("created_at", now.clone());
        }
        if schema.has_column("updated_at") {
            record.write_column("updated_at", now);
        }

        table.write(id, record.attributes())?;
        record.mark_persisted(id);
        debug!("Saved {} #{} to '{}'", model.name(), id, model.table_name());
        Ok(id)
    }

    /// Stores a row as given, bypassing the lifecycle hooks.
    pub fn insert_row(&mut self, table_name: &str, row: Row) -> Result<u64> {
        let table = self.table_mut(table_name)?;
        if let Some(unknown) = row.keys().find(|c| !table.schema().has_column(c)) {
            return Err(AttrError::ColumnNotFound(unknown.clone(), table_name.to_string()));
        }
        let id = table.next_id();
        let mut row = row;
        if table.schema().has_column("id") {
            row.insert("id".to_string(), Value::Integer(id as i64));
        }
        table.write(id, &row)?;
        Ok(id)
    }

    /// `new_record`, mass assignment, then `save`.
    pub fn create<I, K, V>(&mut self, model: &Arc<ModelType>, attributes: I) -> Result<Record>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut record = self.new_record(model)?;
        record.assign_attributes(attributes)?;
        self.save(&mut record)?;
        Ok(record)
    }

    /// Replaces `record` with a fresh load of its stored row.
    pub fn reload(&self, record: &mut Record) -> Result<()> {
        let id = record
            .id()
            .ok_or_else(|| AttrError::NotPersisted(record.model().name().to_string()))?;
        let model = Arc::clone(record.model());
        *record = self.find(&model, id)?;
        Ok(())
    }
}
