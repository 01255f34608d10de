//! Insert, update and cascading delete on a loaded snapshot.
//!
//! Writes either apply completely or leave the snapshot untouched: references are
//! validated and cascades are planned before anything is modified.

use ahash::AHashSet;

use crate::{
    errors::{HypergraphError, Result},
    graph::{Hypergraph, Record},
    key::PrimaryKey,
    predicate::string_form,
    registry::TableName,
};

/// The foreign-key graph is acyclic, so no cascade can be deeper than the table count.
pub const MAX_CASCADE_DEPTH: usize = TableName::ALL.len();

/// Rows scheduled for removal, dependents before the rows they reference.
pub type DeletePlan = Vec<(TableName, PrimaryKey)>;

impl Hypergraph {
    /// Stores `record` under `key`, replacing any previous row there, once every
    /// foreign key it declares resolves to an existing row.
    pub fn insert(&mut self, table: TableName, key: PrimaryKey, record: Record) -> Result<()> {
        if let Err(err) = self.check_references(table, &record) {
            tracing::warn!(%table, %key, error = %err, "insert rejected");
            return Err(err);
        }
        tracing::debug!(%table, %key, "insert");
        self.table_mut(table).insert(key, record);
        Ok(())
    }

    /// Verifies each foreign-key attribute of `record` names a row of the referenced table.
    pub fn check_references(&self, table: TableName, record: &Record) -> Result<()> {
        for &target in table.foreign_key_targets() {
            let attribute = target.foreign_key_attribute()?;
            let value = record.get(attribute);
            let resolved = value
                .and_then(PrimaryKey::from_value)
                .is_some_and(|key| self.contains(target, &key));
            if !resolved {
                return Err(HypergraphError::referential_integrity(
                    table.as_str(),
                    attribute,
                    value.map_or_else(|| "<missing>".to_string(), string_form),
                    target.as_str(),
                ));
            }
        }
        Ok(())
    }

    /// Applies `changes` to the row at `key` and re-inserts it under its recomputed
    /// key. When the key changed, the old row is removed with a full cascading
    /// delete, taking every row that referenced the old key with it. Returns the
    /// key the row now lives under.
    pub fn update(
        &mut self,
        table: TableName,
        key: &PrimaryKey,
        changes: Record,
    ) -> Result<PrimaryKey> {
        let mut record = self.get(table, key)?.clone();
        for (name, value) in changes {
            record.insert(name, value);
        }
        let new_key = table.primary_key_of(&record)?;
        let cascade = if new_key != *key {
            self.plan_delete(table, key)?
        } else {
            DeletePlan::new()
        };
        self.insert(table, new_key.clone(), record)?;
        if !cascade.is_empty() {
            let removed = self.apply_deletes(&cascade);
            tracing::debug!(%table, from = %key, to = %new_key, removed, "primary key moved");
        }
        Ok(new_key)
    }

    /// Removes the row at `key` and, transitively, every row in any table that
    /// references it. Returns the number of rows removed.
    pub fn delete(&mut self, table: TableName, key: &PrimaryKey) -> Result<usize> {
        let plan = self.plan_delete(table, key)?;
        let removed = self.apply_deletes(&plan);
        tracing::debug!(%table, %key, removed, "cascading delete");
        Ok(removed)
    }

    /// Every row a delete of `key` would remove, without removing anything.
    pub fn plan_delete(&self, table: TableName, key: &PrimaryKey) -> Result<DeletePlan> {
        if !self.contains(table, key) {
            return Err(HypergraphError::not_found(format!("{table} {key}")));
        }
        let mut plan = DeletePlan::new();
        let mut seen = AHashSet::new();
        self.collect_cascade(table, key, 0, &mut seen, &mut plan)?;
        Ok(plan)
    }

    fn collect_cascade(
        &self,
        table: TableName,
        key: &PrimaryKey,
        depth: usize,
        seen: &mut AHashSet<(TableName, PrimaryKey)>,
        plan: &mut DeletePlan,
    ) -> Result<()> {
        if depth > MAX_CASCADE_DEPTH {
            return Err(HypergraphError::CascadeDepth(MAX_CASCADE_DEPTH));
        }
        if !seen.insert((table, key.clone())) {
            return Ok(());
        }
        let referencing = table.referencing_tables();
        if !referencing.is_empty() {
            let attribute = table.foreign_key_attribute()?;
            for dependent_table in referencing {
                let dependents: Vec<PrimaryKey> = self
                    .table(dependent_table)
                    .iter()
                    .filter(|(_, record)| record.get(attribute).is_some_and(|v| key.matches(v)))
                    .map(|(dependent_key, _)| dependent_key.clone())
                    .collect();
                for dependent_key in dependents {
                    self.collect_cascade(dependent_table, &dependent_key, depth + 1, seen, plan)?;
                }
            }
        }
        plan.push((table, key.clone()));
        Ok(())
    }

    fn apply_deletes(&mut self, plan: &[(TableName, PrimaryKey)]) -> usize {
        plan.iter()
            .filter(|(table, key)| self.table_mut(*table).remove(key).is_some())
            .count()
    }
}
