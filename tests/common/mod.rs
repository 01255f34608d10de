#![allow(dead_code)]

use hypergraphdb::{Address, Hypergraph, HypergraphStore, Record, TableName, record};
use serde_json::{Value, json};
use tempfile::TempDir;

pub fn rec(value: Value) -> Record {
    record(value).unwrap()
}

/// Two customers, two suppliers, three products, a cart, two orders with
/// contents and payments. Built through `insert`, so every reference resolves.
pub fn shop() -> Hypergraph {
    let mut graph = Hypergraph::new();
    let home = Address::new("1 Sesame St", "New York", "NY", "10023", "USA").to_value();
    for (id, name) in [(1, "grover"), (2, "elmo")] {
        graph
            .insert(
                TableName::Customer,
                id.into(),
                rec(json!({"userid": id, "username": name, "shipping_address": home.clone()})),
            )
            .unwrap();
    }
    for (id, name, rating) in [
        (1, "acme", 1581.2415788785497),
        (2, "globex", 233.64136902544146),
    ] {
        graph
            .insert(
                TableName::Supplier,
                id.into(),
                rec(json!({"supplierid": id, "supplier_name": name, "rating": rating})),
            )
            .unwrap();
    }
    for (id, name, price, stock, supplier) in [
        (1, "pencil", 2, 10, 1),
        (2, "pad", 5, 0, 1),
        (3, "lamp", 30, 3, 2),
    ] {
        graph
            .insert(
                TableName::Product,
                id.into(),
                rec(json!({
                    "productid": id,
                    "product_name": name,
                    "price": price,
                    "stock": stock,
                    "supplierid": supplier
                })),
            )
            .unwrap();
    }
    for (user, product, quantity) in [(1, 1, 2), (2, 3, 1)] {
        graph
            .insert(
                TableName::CartItem,
                (user, product).into(),
                rec(json!({"userid": user, "productid": product, "quantity": quantity})),
            )
            .unwrap();
    }
    for (order, user) in [(10, 1), (11, 2)] {
        graph
            .insert(
                TableName::Order,
                order.into(),
                rec(json!({"orderid": order, "userid": user, "order_status": "placed"})),
            )
            .unwrap();
    }
    for (order, product, quantity) in [(10, 1, 3), (10, 2, 1), (11, 3, 2)] {
        graph
            .insert(
                TableName::OrderContent,
                (order, product).into(),
                rec(json!({"orderid": order, "productid": product, "quantity": quantity})),
            )
            .unwrap();
    }
    for (order, amount) in [(10, 11), (11, 60)] {
        graph
            .insert(
                TableName::Payment,
                order.into(),
                rec(json!({"orderid": order, "amount": amount})),
            )
            .unwrap();
    }
    graph
}

pub struct StoreContext {
    pub dir: TempDir,
    pub store: HypergraphStore,
}

impl StoreContext {
    pub fn path(&self) -> std::path::PathBuf {
        self.dir.path().join("shop.db")
    }
}

/// An initialized on-disk store holding [`shop`].
pub fn shop_store() -> StoreContext {
    let dir = tempfile::tempdir().unwrap();
    let store = HypergraphStore::open(dir.path().join("shop.db")).unwrap();
    store.initialize().unwrap();
    store.commit(&shop()).unwrap();
    StoreContext { dir, store }
}
