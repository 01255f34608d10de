//! Read-side relational operators over snapshot tables.
//!
//! Every operator is pure: inputs are borrowed and results are fresh tables keyed
//! by the primary keys of their input.

use serde_json::Value;

use crate::{
    errors::Result,
    graph::{Hypergraph, Record, Table},
    key::PrimaryKey,
    predicate::Predicate,
    registry::TableName,
};

/// Records satisfying `predicate`. Records lacking the attribute are left out.
pub fn select(table: &Table, predicate: &Predicate) -> Table {
    table
        .iter()
        .filter(|(_, record)| predicate.matches(record))
        .map(|(key, record)| (key.clone(), record.clone()))
        .collect()
}

/// [`select`] with a textual predicate such as `"stock>0"` or `"orderid$[1, 2]"`.
pub fn select_where(table: &Table, predicate: &str) -> Result<Table> {
    Ok(select(table, &Predicate::parse(predicate)?))
}

/// Keeps only the comma-separated `columns` of each record; `"*"` keeps everything.
/// Attributes a record does not carry are simply absent from its projection.
pub fn project(columns: &str, table: &Table) -> Table {
    let columns: Vec<&str> = columns.split(',').map(str::trim).collect();
    if columns == ["*"] {
        return table.clone();
    }
    table
        .iter()
        .map(|(key, record)| {
            let projected: Record = columns
                .iter()
                .filter_map(|c| record.get(*c).map(|v| (c.to_string(), v.clone())))
                .collect();
            (key.clone(), projected)
        })
        .collect()
}

/// Renames `old` to `new` on every record carrying `old`. The input is left as is.
pub fn rename(table: &Table, old: &str, new: &str) -> Table {
    table
        .iter()
        .map(|(key, record)| {
            let mut record = record.clone();
            if let Some(value) = record.remove(old) {
                record.insert(new.to_string(), value);
            }
            (key.clone(), record)
        })
        .collect()
}

/// The values of `attribute` across the table, in key order, skipping records without it.
pub fn values_of(table: &Table, attribute: &str) -> Vec<Value> {
    table
        .values()
        .filter_map(|record| record.get(attribute).cloned())
        .collect()
}

/// Named-table view over a loaded snapshot.
pub struct TableQuery<'a> {
    graph: &'a Hypergraph,
}

impl<'a> TableQuery<'a> {
    pub fn new(graph: &'a Hypergraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'a Hypergraph {
        self.graph
    }

    pub fn select(&self, table: TableName, predicate: &Predicate) -> Table {
        select(self.graph.table(table), predicate)
    }

    pub fn select_where(&self, table: TableName, predicate: &str) -> Result<Table> {
        select_where(self.graph.table(table), predicate)
    }

    pub fn project(&self, table: TableName, columns: &str) -> Table {
        project(columns, self.graph.table(table))
    }

    pub fn keys(&self, table: TableName, predicate: &Predicate) -> Vec<PrimaryKey> {
        self.graph
            .table(table)
            .iter()
            .filter(|(_, record)| predicate.matches(record))
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl Hypergraph {
    pub fn query(&self) -> TableQuery<'_> {
        TableQuery::new(self)
    }
}
