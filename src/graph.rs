use std::collections::BTreeMap;

use serde_json::Value;

use crate::{
    errors::{HypergraphError, Result},
    key::PrimaryKey,
    registry::TableName,
};

/// One row: attribute name to scalar or nested value.
pub type Record = serde_json::Map<String, Value>;

/// A table keyed by primary key. Key uniqueness follows from the map.
pub type Table = BTreeMap<PrimaryKey, Record>;

static EMPTY_TABLE: Table = BTreeMap::new();

/// Every declared table at one point in time; the unit of load and commit.
#[derive(Clone, Debug, PartialEq)]
pub struct Hypergraph {
    tables: BTreeMap<TableName, Table>,
}

impl Default for Hypergraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Hypergraph {
    /// A snapshot with one empty table per declared table.
    pub fn new() -> Self {
        Self {
            tables: TableName::ALL
                .into_iter()
                .map(|name| (name, Table::new()))
                .collect(),
        }
    }

    pub fn table(&self, name: TableName) -> &Table {
        self.tables.get(&name).unwrap_or(&EMPTY_TABLE)
    }

    pub fn table_mut(&mut self, name: TableName) -> &mut Table {
        self.tables.entry(name).or_default()
    }

    pub fn set_table(&mut self, name: TableName, table: Table) {
        self.tables.insert(name, table);
    }

    pub fn tables(&self) -> impl Iterator<Item = (TableName, &Table)> {
        TableName::ALL.into_iter().map(|name| (name, self.table(name)))
    }

    pub fn get(&self, table: TableName, key: &PrimaryKey) -> Result<&Record> {
        self.table(table)
            .get(key)
            .ok_or_else(|| HypergraphError::not_found(format!("{table} {key}")))
    }

    pub fn contains(&self, table: TableName, key: &PrimaryKey) -> bool {
        self.table(table).contains_key(key)
    }

    pub fn record_count(&self) -> usize {
        self.tables.values().map(|t| t.len()).sum()
    }

    /// Next free integer id: one past the largest integer key, or 1 for an empty table.
    pub fn next_id(&self, table: TableName) -> i64 {
        self.table(table)
            .keys()
            .filter_map(PrimaryKey::as_int)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Converts a JSON object into a record.
pub fn record(value: Value) -> Result<Record> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(HypergraphError::invalid_input(format!(
            "record must be an object, got {other}"
        ))),
    }
}
