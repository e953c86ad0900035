pub mod database;
pub mod table;

pub use database::Database;
pub use table::{Column, DataType, Row, Table, TableSchema};
