mod common;

use common::shop;
use hypergraphdb::{Hypergraph, Predicate, TableName, inner_join, project, rename, select};
use serde_json::Value;

fn order_cost(graph: &Hypergraph, orderid: i64) -> i64 {
    let quantities = select(
        graph.table(TableName::OrderContent),
        &Predicate::eq("orderid", orderid),
    );
    let prices = graph.table(TableName::Product);
    let joined = inner_join(&quantities, prices, "productid");
    let priced = rename(&joined, "productid.price", "price");
    project("price,quantity", &priced)
        .values()
        .map(|row| {
            let price = row.get("price").and_then(Value::as_i64).unwrap_or(0);
            let quantity = row.get("quantity").and_then(Value::as_i64).unwrap_or(0);
            price * quantity
        })
        .sum()
}

#[test]
fn order_cost_sums_price_times_quantity() {
    let graph = shop();
    // order 10: 3 pencils at 2 and 1 pad at 5
    assert_eq!(order_cost(&graph, 10), 11);
    // order 11: 2 lamps at 30
    assert_eq!(order_cost(&graph, 11), 60);
}

#[test]
fn order_cost_matches_recorded_payments() {
    let graph = shop();
    for (key, payment) in graph.table(TableName::Payment) {
        let orderid = key.as_int().unwrap();
        assert_eq!(Some(order_cost(&graph, orderid)), payment["amount"].as_i64());
    }
}

#[test]
fn cost_of_unknown_order_is_zero() {
    assert_eq!(order_cost(&shop(), 404), 0);
}

#[test]
fn pipeline_stages_stay_independent() {
    let graph = shop();
    let joined = inner_join(
        graph.table(TableName::OrderContent),
        graph.table(TableName::Product),
        "productid",
    );
    let priced = rename(&joined, "productid.price", "price");
    assert!(joined.values().all(|row| row.contains_key("productid.price")));
    assert!(priced.values().all(|row| !row.contains_key("productid.price")));
}
