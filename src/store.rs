//! Durable backing for whole-snapshot load and commit.
//!
//! Each declared table lives in one named slot of the `hypergraph_tables` SQLite
//! table, serialized as a JSON list of `{ "key", "record" }` entries. There is no
//! partial access: every read loads the full snapshot and every write rewrites
//! every slot. The store assumes a single writer; concurrent commits are
//! last-writer-wins.

use std::{collections::BTreeMap, path::Path};

use rusqlite::{Connection, OpenFlags, params};
use serde::{Deserialize, Serialize};

use crate::{
    config::StoreConfig,
    errors::{HypergraphError, Result},
    graph::{Hypergraph, Record, Table},
    key::PrimaryKey,
    registry::TableName,
    schema::ensure_schema,
};

#[derive(Serialize)]
struct SlotEntryRef<'a> {
    key: &'a PrimaryKey,
    record: &'a Record,
}

#[derive(Deserialize)]
struct SlotEntry {
    key: PrimaryKey,
    record: Record,
}

/// Handle on the backing file. The connection is released when the handle is
/// dropped or explicitly [`closed`](HypergraphStore::close).
pub struct HypergraphStore {
    conn: Connection,
}

impl HypergraphStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, &StoreConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(path: P, cfg: &StoreConfig) -> Result<Self> {
        let mut flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        if cfg.create_if_missing {
            flags |= OpenFlags::SQLITE_OPEN_CREATE;
        }
        let conn = Connection::open_with_flags(path.as_ref(), flags).map_err(|e| {
            HypergraphError::connection(format!("{}: {e}", path.as_ref().display()))
        })?;
        for (key, value) in &cfg.pragma_settings {
            match conn.execute(&format!("PRAGMA {key} = {value}"), []) {
                Ok(_) | Err(rusqlite::Error::ExecuteReturnedResults) => {}
                Err(e) => {
                    return Err(HypergraphError::connection(format!(
                        "PRAGMA {key} = {value}: {e}"
                    )));
                }
            }
        }
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| HypergraphError::connection(e.to_string()))?;
        ensure_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Wipes every slot and recreates one empty slot per declared table.
    pub fn initialize(&self) -> Result<()> {
        self.in_transaction(|conn| {
            conn.execute("DELETE FROM hypergraph_tables", [])
                .map_err(|e| HypergraphError::query(e.to_string()))?;
            for name in TableName::ALL {
                write_slot(conn, name, &Table::new())?;
            }
            Ok(())
        })?;
        tracing::info!(tables = TableName::ALL.len(), "initialized hypergraph store");
        Ok(())
    }

    pub fn load(&self) -> Result<Hypergraph> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT name, data FROM hypergraph_tables")
            .map_err(|e| HypergraphError::query(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
            .map_err(|e| HypergraphError::query(e.to_string()))?;
        let mut slots = BTreeMap::new();
        for row in rows {
            let (name, data) = row.map_err(|e| HypergraphError::query(e.to_string()))?;
            slots.insert(name, data);
        }

        let mut graph = Hypergraph::new();
        for name in TableName::ALL {
            let Some(data) = slots.get(name.as_str()) else {
                tracing::warn!(table = %name, "slot missing from store");
                return Err(HypergraphError::schema(format!(
                    "table {name} missing from store; initialize it first"
                )));
            };
            graph.set_table(name, decode_table(name, data)?);
        }
        tracing::debug!(records = graph.record_count(), "loaded hypergraph snapshot");
        Ok(graph)
    }

    /// Overwrites every declared slot with the contents of `graph` in one transaction.
    pub fn commit(&self, graph: &Hypergraph) -> Result<()> {
        self.in_transaction(|conn| {
            for (name, table) in graph.tables() {
                write_slot(conn, name, table)?;
            }
            Ok(())
        })?;
        tracing::debug!(records = graph.record_count(), "committed hypergraph snapshot");
        Ok(())
    }

    /// Runs a read-only operation against a freshly loaded snapshot. Never commits.
    pub fn view<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Hypergraph) -> Result<T>,
    {
        let graph = self.load()?;
        op(&graph)
    }

    /// Loads, runs `op` and commits the mutated snapshot only if `op` succeeded.
    pub fn transact<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Hypergraph) -> Result<T>,
    {
        let mut graph = self.load()?;
        let value = op(&mut graph)?;
        self.commit(&graph)?;
        Ok(value)
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| HypergraphError::connection(e.to_string()))
    }

    fn in_transaction<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&Connection) -> Result<()>,
    {
        self.conn
            .execute("BEGIN IMMEDIATE", [])
            .map_err(|e| HypergraphError::query(e.to_string()))?;
        match op(&self.conn) {
            Ok(()) => {
                self.conn
                    .execute("COMMIT", [])
                    .map_err(|e| HypergraphError::query(e.to_string()))?;
                Ok(())
            }
            Err(err) => {
                let _ = self.conn.execute("ROLLBACK", []);
                Err(err)
            }
        }
    }
}

fn write_slot(conn: &Connection, name: TableName, table: &Table) -> Result<()> {
    let data = encode_table(table)?;
    conn.prepare_cached("INSERT OR REPLACE INTO hypergraph_tables(name, data) VALUES(?1, ?2)")
        .and_then(|mut stmt| stmt.execute(params![name.as_str(), data]))
        .map_err(|e| HypergraphError::query(e.to_string()))?;
    Ok(())
}

fn encode_table(table: &Table) -> Result<String> {
    let entries: Vec<SlotEntryRef<'_>> = table
        .iter()
        .map(|(key, record)| SlotEntryRef { key, record })
        .collect();
    serde_json::to_string(&entries).map_err(|e| HypergraphError::invalid_input(e.to_string()))
}

fn decode_table(name: TableName, data: &str) -> Result<Table> {
    let entries: Vec<SlotEntry> = serde_json::from_str(data)
        .map_err(|e| HypergraphError::invalid_input(format!("slot {name}: {e}")))?;
    Ok(entries
        .into_iter()
        .map(|entry| (entry.key, entry.record))
        .collect())
}
