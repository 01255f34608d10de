//! Key-lookup joins.
//!
//! Each left record's join attribute is read as a primary key of the right table.
//! Joined rows embed the right record under the join attribute and are then
//! flattened, so `productid` joined against products yields `productid.price`,
//! `productid.product_name` and so on. Inputs are never modified.

use ahash::AHashSet;
use serde_json::Value;

use crate::{
    flatten::flatten,
    graph::{Record, Table},
    key::{PrimaryKey, Scalar},
    query::TableQuery,
    registry::TableName,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
    Cartesian,
}

pub fn join(kind: JoinKind, left: &Table, right: &Table, key: &str) -> Table {
    match kind {
        JoinKind::Inner => inner_join(left, right, key),
        JoinKind::Left => left_join(left, right, key),
        JoinKind::Right => right_join(left, right, key),
        JoinKind::Outer => outer_join(left, right, key),
        JoinKind::Cartesian => cartesian_join(left, right, key),
    }
}

/// Left records whose join value names a non-empty right record.
pub fn inner_join(left: &Table, right: &Table, key: &str) -> Table {
    if key.is_empty() {
        return Table::new();
    }
    left.iter()
        .filter_map(|(left_key, record)| {
            let target = resolve(right, record.get(key)?)?;
            (!target.is_empty()).then(|| (left_key.clone(), embed(record, key, target)))
        })
        .collect()
}

/// Every left record; unresolved join values are left unchanged.
pub fn left_join(left: &Table, right: &Table, key: &str) -> Table {
    if key.is_empty() {
        return Table::new();
    }
    left.iter()
        .map(|(left_key, record)| {
            let joined = match record.get(key).and_then(|v| resolve(right, v)) {
                Some(target) => embed(record, key, target),
                None => flatten(record),
            };
            (left_key.clone(), joined)
        })
        .collect()
}

/// [`inner_join`] plus one synthetic row per right record no left record references.
pub fn right_join(left: &Table, right: &Table, key: &str) -> Table {
    let mut out = inner_join(left, right, key);
    if !key.is_empty() {
        complete_right_only(&mut out, left, right, key);
    }
    out
}

/// [`left_join`] plus one synthetic row per right record no left record references.
pub fn outer_join(left: &Table, right: &Table, key: &str) -> Table {
    let mut out = left_join(left, right, key);
    if !key.is_empty() {
        complete_right_only(&mut out, left, right, key);
    }
    out
}

/// Every left record paired with every right record under `key`, keyed
/// `"<left key>_<right key>"`, followed by the right-only completion pass.
pub fn cartesian_join(left: &Table, right: &Table, key: &str) -> Table {
    if key.is_empty() {
        return Table::new();
    }
    let mut out = Table::new();
    for (left_key, left_record) in left {
        for (right_key, right_record) in right {
            let pair_key = PrimaryKey::Single(Scalar::Text(format!("{left_key}_{right_key}")));
            out.insert(pair_key, embed(left_record, key, right_record));
        }
    }
    // Same completion as right_join: extra rows keyed by the bare right key.
    complete_right_only(&mut out, left, right, key);
    out
}

/// [`inner_join`] on [`shared_attribute`]; empty when the tables share no attribute.
pub fn natural_join(left: &Table, right: &Table) -> Table {
    match shared_attribute(left, right) {
        Some(key) => inner_join(left, right, &key),
        None => Table::new(),
    }
}

/// First attribute, in name order, carried by both the first left record and the
/// first right record.
pub fn shared_attribute(left: &Table, right: &Table) -> Option<String> {
    let left_record = left.values().next()?;
    let right_record = right.values().next()?;
    left_record
        .keys()
        .find(|name| right_record.contains_key(*name))
        .cloned()
}

fn resolve<'r>(right: &'r Table, value: &Value) -> Option<&'r Record> {
    PrimaryKey::from_value(value).and_then(|key| right.get(&key))
}

fn embed(record: &Record, key: &str, target: &Record) -> Record {
    let mut joined = record.clone();
    joined.insert(key.to_string(), Value::Object(target.clone()));
    flatten(&joined)
}

/// Adds a row for every right key no left record references, shaped like the
/// first left record with every other attribute blanked.
fn complete_right_only(out: &mut Table, left: &Table, right: &Table, key: &str) {
    let referenced: AHashSet<PrimaryKey> = left
        .values()
        .filter_map(|record| record.get(key).and_then(PrimaryKey::from_value))
        .collect();
    let template = left.values().next();
    for (right_key, right_record) in right {
        if referenced.contains(right_key) {
            continue;
        }
        let mut synthetic = Record::new();
        if let Some(template) = template {
            for name in template.keys().filter(|name| name.as_str() != key) {
                synthetic.insert(name.clone(), Value::String(String::new()));
            }
        }
        synthetic.insert(key.to_string(), Value::Object(right_record.clone()));
        out.insert(right_key.clone(), flatten(&synthetic));
    }
}

impl TableQuery<'_> {
    pub fn join(&self, kind: JoinKind, left: TableName, right: TableName, key: &str) -> Table {
        let graph = self.graph();
        join(kind, graph.table(left), graph.table(right), key)
    }

    pub fn natural_join(&self, left: TableName, right: TableName) -> Table {
        let graph = self.graph();
        natural_join(graph.table(left), graph.table(right))
    }
}
