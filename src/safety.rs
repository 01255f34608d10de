use std::{fmt, result};

use serde::Serialize;

use crate::{
    errors::{HypergraphError, Result},
    graph::{Hypergraph, Record},
    key::PrimaryKey,
    registry::TableName,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SafetyReport {
    pub total_records: usize,
    /// Foreign-key values that do not name a row of the referenced table.
    pub dangling_references: usize,
    /// Rows stored under a key other than the one their own attributes produce.
    pub mismatched_keys: usize,
}

impl SafetyReport {
    pub fn merge(&mut self, other: &SafetyReport) {
        self.total_records = self.total_records.max(other.total_records);
        self.dangling_references += other.dangling_references;
        self.mismatched_keys += other.mismatched_keys;
    }

    pub fn has_issues(&self) -> bool {
        self.dangling_references > 0 || self.mismatched_keys > 0
    }
}

#[derive(Debug)]
pub struct SafetyError {
    pub report: SafetyReport,
    pub source: Option<HypergraphError>,
}

impl fmt::Display for SafetyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "safety violations detected: {} dangling references, {} mismatched keys",
            self.report.dangling_references, self.report.mismatched_keys
        )
    }
}

impl std::error::Error for SafetyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err as &dyn std::error::Error)
    }
}

pub fn validate_referential_integrity(graph: &Hypergraph) -> Result<SafetyReport> {
    let mut report = base_report(graph);
    for table in TableName::ALL {
        for record in graph.table(table).values() {
            report.dangling_references += count_dangling(graph, table, record)?;
        }
    }
    Ok(report)
}

pub fn validate_primary_keys(graph: &Hypergraph) -> Result<SafetyReport> {
    let mut report = base_report(graph);
    for table in TableName::ALL {
        report.mismatched_keys += graph
            .table(table)
            .iter()
            .filter(|(key, record)| {
                table
                    .primary_key_of(record)
                    .map_or(true, |actual| actual != **key)
            })
            .count();
    }
    Ok(report)
}

pub fn run_safety_checks(graph: &Hypergraph) -> Result<SafetyReport> {
    let mut report = SafetyReport::default();
    report.merge(&validate_referential_integrity(graph)?);
    report.merge(&validate_primary_keys(graph)?);
    if report.has_issues() {
        tracing::warn!(
            dangling = report.dangling_references,
            mismatched = report.mismatched_keys,
            "integrity audit found issues"
        );
    }
    Ok(report)
}

pub fn run_strict_safety_checks(graph: &Hypergraph) -> result::Result<(), SafetyError> {
    let report = run_safety_checks(graph).map_err(|err| SafetyError {
        report: SafetyReport::default(),
        source: Some(err),
    })?;
    if report.has_issues() {
        Err(SafetyError {
            report,
            source: None,
        })
    } else {
        Ok(())
    }
}

fn base_report(graph: &Hypergraph) -> SafetyReport {
    SafetyReport {
        total_records: graph.record_count(),
        ..SafetyReport::default()
    }
}

fn count_dangling(graph: &Hypergraph, table: TableName, record: &Record) -> Result<usize> {
    let mut dangling = 0;
    for &target in table.foreign_key_targets() {
        let attribute = target.foreign_key_attribute()?;
        let resolved = record
            .get(attribute)
            .and_then(PrimaryKey::from_value)
            .is_some_and(|key| graph.contains(target, &key));
        if !resolved {
            dangling += 1;
        }
    }
    Ok(dangling)
}
