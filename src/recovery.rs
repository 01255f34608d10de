//! Line-oriented backup and restore of a whole snapshot.
//!
//! One JSON object per line: `{"table": "order", "key": 10, "record": {...}}`.
//! Restoring does not re-validate references; run
//! [`run_safety_checks`](crate::safety::run_safety_checks) on the result when the
//! dump comes from an untrusted source.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{HypergraphError, Result},
    graph::{Hypergraph, Record},
    key::PrimaryKey,
    registry::TableName,
};

#[derive(Serialize)]
struct DumpLineRef<'a> {
    table: TableName,
    key: &'a PrimaryKey,
    record: &'a Record,
}

#[derive(Deserialize)]
struct DumpLine {
    table: TableName,
    key: PrimaryKey,
    record: Record,
}

pub fn dump_hypergraph_to_path<P: AsRef<Path>>(graph: &Hypergraph, path: P) -> Result<usize> {
    let file =
        File::create(path.as_ref()).map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
    dump_hypergraph_to_writer(graph, BufWriter::new(file))
}

/// Writes every record, table by table in declaration order. Returns the line count.
pub fn dump_hypergraph_to_writer<W: Write>(graph: &Hypergraph, mut writer: W) -> Result<usize> {
    let mut lines = 0;
    for (table, rows) in graph.tables() {
        for (key, record) in rows {
            serde_json::to_writer(&mut writer, &DumpLineRef { table, key, record })
                .map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
            writer
                .write_all(b"\n")
                .map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
            lines += 1;
        }
    }
    writer
        .flush()
        .map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
    tracing::debug!(lines, "snapshot dumped");
    Ok(lines)
}

pub fn load_hypergraph_from_path<P: AsRef<Path>>(path: P) -> Result<Hypergraph> {
    let file =
        File::open(path.as_ref()).map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
    load_hypergraph_from_reader(BufReader::new(file))
}

/// Rebuilds a snapshot from dump lines. Blank lines are skipped; a later line for
/// the same table and key replaces an earlier one.
pub fn load_hypergraph_from_reader<R: BufRead>(reader: R) -> Result<Hypergraph> {
    let mut graph = Hypergraph::new();
    for (number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HypergraphError::invalid_input(e.to_string()))?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: DumpLine = serde_json::from_str(&line).map_err(|e| {
            HypergraphError::invalid_input(format!("dump line {}: {e}", number + 1))
        })?;
        graph.table_mut(entry.table).insert(entry.key, entry.record);
    }
    tracing::debug!(records = graph.record_count(), "snapshot restored");
    Ok(graph)
}
