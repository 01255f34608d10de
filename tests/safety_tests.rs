mod common;

use common::{rec, shop};
use hypergraphdb::{
    TableName,
    safety::{
        run_safety_checks, run_strict_safety_checks, validate_primary_keys,
        validate_referential_integrity,
    },
};
use serde_json::json;

#[test]
fn report_for_clean_snapshot_has_no_issues() {
    let graph = shop();
    let report = run_safety_checks(&graph).unwrap();
    assert_eq!(report.total_records, graph.record_count());
    assert_eq!(report.dangling_references, 0);
    assert_eq!(report.mismatched_keys, 0);
    assert!(run_strict_safety_checks(&graph).is_ok());
}

#[test]
fn dangling_references_detected() {
    let mut graph = shop();
    // Bypasses insert validation.
    graph.table_mut(TableName::CartItem).insert(
        (8, 9).into(),
        rec(json!({"userid": 8, "productid": 9, "quantity": 1})),
    );
    let report = validate_referential_integrity(&graph).unwrap();
    assert_eq!(report.dangling_references, 2);
}

#[test]
fn removing_a_parent_directly_leaves_dangling_children() {
    let mut graph = shop();
    graph.table_mut(TableName::Order).remove(&10.into());
    let report = validate_referential_integrity(&graph).unwrap();
    // two order_content rows and one payment point at order 10
    assert_eq!(report.dangling_references, 3);
}

#[test]
fn mismatched_keys_detected() {
    let mut graph = shop();
    let moved = graph.table_mut(TableName::Supplier).remove(&2.into()).unwrap();
    graph.table_mut(TableName::Supplier).insert(5.into(), moved);
    let report = validate_primary_keys(&graph).unwrap();
    assert_eq!(report.mismatched_keys, 1);
}

#[test]
fn strict_checks_return_report_with_error() {
    let mut graph = shop();
    graph.table_mut(TableName::Customer).remove(&2.into());
    let err = run_strict_safety_checks(&graph).unwrap_err();
    assert!(err.source.is_none());
    // order 11 and cart (2, 3) referenced customer 2
    assert_eq!(err.report.dangling_references, 2);
    assert!(err.to_string().contains("2 dangling references"));
}
