//! Static schema: the closed set of tables, the shape of each primary key and
//! the foreign-key edges between tables.
//!
//! A foreign-key attribute always carries the same name as the primary-key
//! attribute of the table it references, so only single-key tables can be
//! referenced.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    errors::{HypergraphError, Result},
    graph::Record,
    key::{PrimaryKey, Scalar},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Customer,
    CartItem,
    Supplier,
    Product,
    Order,
    OrderContent,
    Payment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyShape {
    Single(&'static str),
    Composite(&'static str, &'static str),
}

impl TableName {
    pub const ALL: [TableName; 7] = [
        TableName::Customer,
        TableName::CartItem,
        TableName::Supplier,
        TableName::Product,
        TableName::Order,
        TableName::OrderContent,
        TableName::Payment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Customer => "customer",
            TableName::CartItem => "cart_item",
            TableName::Supplier => "supplier",
            TableName::Product => "product",
            TableName::Order => "order",
            TableName::OrderContent => "order_content",
            TableName::Payment => "payment",
        }
    }

    pub fn key_shape(self) -> KeyShape {
        match self {
            TableName::Customer => KeyShape::Single("userid"),
            TableName::CartItem => KeyShape::Composite("userid", "productid"),
            TableName::Supplier => KeyShape::Single("supplierid"),
            TableName::Product => KeyShape::Single("productid"),
            TableName::Order => KeyShape::Single("orderid"),
            TableName::OrderContent => KeyShape::Composite("orderid", "productid"),
            TableName::Payment => KeyShape::Single("orderid"),
        }
    }

    /// Tables this table holds foreign keys toward.
    pub fn foreign_key_targets(self) -> &'static [TableName] {
        match self {
            TableName::CartItem => &[TableName::Customer, TableName::Product],
            TableName::Product => &[TableName::Supplier],
            TableName::Order => &[TableName::Customer],
            TableName::OrderContent => &[TableName::Order, TableName::Product],
            TableName::Payment => &[TableName::Order],
            TableName::Customer | TableName::Supplier => &[],
        }
    }

    /// Tables that declare a foreign key toward this table.
    pub fn referencing_tables(self) -> Vec<TableName> {
        TableName::ALL
            .into_iter()
            .filter(|t| t.foreign_key_targets().contains(&self))
            .collect()
    }

    /// Name of the attribute other tables use to reference this table.
    pub fn foreign_key_attribute(self) -> Result<&'static str> {
        match self.key_shape() {
            KeyShape::Single(name) => Ok(name),
            KeyShape::Composite(..) => Err(HypergraphError::schema(format!(
                "{self} has a composite key and cannot be referenced"
            ))),
        }
    }

    pub fn primary_key_of(self, record: &Record) -> Result<PrimaryKey> {
        match self.key_shape() {
            KeyShape::Single(a) => Ok(PrimaryKey::Single(key_scalar(self, record, a)?)),
            KeyShape::Composite(a, b) => Ok(PrimaryKey::Composite(
                key_scalar(self, record, a)?,
                key_scalar(self, record, b)?,
            )),
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableName {
    type Err = HypergraphError;

    fn from_str(s: &str) -> Result<Self> {
        TableName::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| HypergraphError::invalid_input(format!("unknown table {s}")))
    }
}

/// Extracts the primary key of `record` according to the declared shape of `table`.
pub fn primary_key_of(table: TableName, record: &Record) -> Result<PrimaryKey> {
    table.primary_key_of(record)
}

pub fn foreign_key_targets(table: TableName) -> &'static [TableName] {
    table.foreign_key_targets()
}

fn key_scalar(table: TableName, record: &Record, attribute: &str) -> Result<Scalar> {
    let value = record
        .get(attribute)
        .ok_or_else(|| HypergraphError::attribute_missing(format!("{table}.{attribute}")))?;
    Scalar::from_value(value).ok_or_else(|| {
        HypergraphError::invalid_input(format!(
            "{table}.{attribute} must be an integer or string key, got {value}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn primary_keys_follow_declared_shape() {
        let customer = record(json!({"userid": 4, "username": "elmo"}));
        assert_eq!(
            primary_key_of(TableName::Customer, &customer).unwrap(),
            PrimaryKey::from(4)
        );
        let item = record(json!({"userid": 4, "productid": 9, "quantity": 1}));
        assert_eq!(
            primary_key_of(TableName::CartItem, &item).unwrap(),
            PrimaryKey::from((4, 9))
        );
    }

    #[test]
    fn missing_key_attribute_is_reported() {
        let err = primary_key_of(TableName::Product, &record(json!({"price": 2}))).unwrap_err();
        assert!(matches!(err, HypergraphError::AttributeMissing(_)));
    }

    #[test]
    fn foreign_key_edges_are_declared_both_ways() {
        assert!(foreign_key_targets(TableName::Customer).is_empty());
        assert_eq!(
            foreign_key_targets(TableName::OrderContent),
            &[TableName::Order, TableName::Product]
        );
        assert_eq!(
            TableName::Product.referencing_tables(),
            vec![TableName::CartItem, TableName::OrderContent]
        );
        assert_eq!(
            TableName::Order.referencing_tables(),
            vec![TableName::OrderContent, TableName::Payment]
        );
    }

    #[test]
    fn referenced_tables_have_single_keys() {
        for table in TableName::ALL {
            for target in table.foreign_key_targets() {
                assert!(target.foreign_key_attribute().is_ok());
            }
        }
        assert!(TableName::CartItem.foreign_key_attribute().is_err());
    }

    #[test]
    fn table_names_parse() {
        assert_eq!("order_content".parse::<TableName>().unwrap(), TableName::OrderContent);
        assert!("orders".parse::<TableName>().is_err());
    }
}
