use crate::core::{AttrError, Result, Value};
use std::collections::BTreeMap;
use std::fmt;

pub type Row = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Integer,
    Float,
    Decimal,
    Text,
    Boolean,
    Date,
    Timestamp,
    /// Holds an encoded serialized column.
    Blob,
}

impl DataType {
    pub fn is_compatible(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (Self::Integer, Value::Integer(_)) => true,
            (Self::Float, Value::Float(_) | Value::Integer(_)) => true,
            (Self::Decimal, Value::Decimal(_) | Value::Integer(_)) => true,
            (Self::Text, Value::Text(_)) => true,
            (Self::Boolean, Value::Boolean(_)) => true,
            (Self::Date, Value::Date(_)) => true,
            (Self::Timestamp, Value::Timestamp(_)) => true,
            (Self::Blob, Value::Blob(_) | Value::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => write!(f, "INTEGER"),
            Self::Float => write!(f, "FLOAT"),
            Self::Decimal => write!(f, "DECIMAL"),
            Self::Text => write!(f, "TEXT"),
            Self::Boolean => write!(f, "BOOLEAN"),
            Self::Date => write!(f, "DATE"),
            Self::Timestamp => write!(f, "TIMESTAMP"),
            Self::Blob => write!(f, "BLOB"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn validate(&self, value: &Value) -> Result<()> {
        if !self.data_type.is_compatible(value) {
            return Err(AttrError::TypeMismatch(format!(
                "Column '{}' expects type {}, got {}",
                self.name,
                self.data_type,
                value.type_name()
            )));
        }
        Ok(())
    }
}

/// Physical layout of a table. Every table gets an `id INTEGER` column.
#[derive(Debug, Clone)]
pub struct TableSchema {
    name: String,
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![Column::new("id", DataType::Integer)],
        }
    }

    pub fn column(mut self, name: &str, data_type: DataType) -> Self {
        self.columns.retain(|c| c.name != name);
        self.columns.push(Column::new(name, data_type));
        self
    }

    /// Adds `created_at` and `updated_at`, stamped on save.
    pub fn timestamps(self) -> Self {
        self.column("created_at", DataType::Timestamp)
            .column("updated_at", DataType::Timestamp)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// A row with every column set to `NULL`.
    pub fn empty_row(&self) -> Row {
        self.columns
            .iter()
            .map(|col| (col.name.clone(), Value::Null))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    schema: TableSchema,
    rows: BTreeMap<u64, Row>,
    next_row_id: u64,
}

impl Table {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: BTreeMap::new(),
            next_row_id: 1,
        }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next_row_id;
        self.next_row_id += 1;
        id
    }

    /// Keeps only the schema's columns and checks their types before storing.
    pub fn write(&mut self, id: u64, values: &Row) -> Result<()> {
        let mut row = Row::new();
        for column in self.schema.columns() {
            let value = values.get(&column.name).cloned().unwrap_or(Value::Null);
            column.validate(&value)?;
            row.insert(column.name.clone(), value);
        }
        self.rows.insert(id, row);
        Ok(())
    }

    pub fn get(&self, id: u64) -> Option<&Row> {
        self.rows.get(&id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_always_has_id() {
        let schema = TableSchema::new("widgets").column("name", DataType::Text);
        assert!(schema.has_column("id"));
        assert_eq!(schema.columns().len(), 2);
    }

    #[test]
    fn test_write_drops_unknown_columns() {
        let mut table = Table::new(TableSchema::new("widgets").column("name", DataType::Text));
        let id = table.next_id();
        let mut values = Row::new();
        values.insert("name".to_string(), Value::from("a"));
        values.insert("size".to_string(), Value::Integer(1));
        table.write(id, &values).unwrap();

        let row = table.get(id).unwrap();
        assert!(!row.contains_key("size"));
        assert_eq!(row["id"], Value::Null);
    }

    #[test]
    fn test_type_check() {
        let mut table = Table::new(TableSchema::new("widgets").column("active", DataType::Boolean));
        let mut values = Row::new();
        values.insert("active".to_string(), Value::from("yes"));
        assert!(table.write(1, &values).is_err());
    }
}
