use rusqlite::Connection;

use crate::errors::HypergraphError;

/// Creates the slot table: one row per declared table holding its serialized snapshot.
pub fn ensure_schema(conn: &Connection) -> Result<(), HypergraphError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS hypergraph_tables (
            name TEXT PRIMARY KEY NOT NULL,
            data TEXT NOT NULL
        );
        "#,
    )
    .map_err(|e| HypergraphError::schema(e.to_string()))?;
    Ok(())
}
