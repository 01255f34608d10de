//! Address values embedded in customer, supplier and product records.
//!
//! Flattening keeps any nested value carrying a `street` attribute intact, so an
//! address always travels as one nested value.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{HypergraphError, Result};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(alias = "zip")]
    pub zipcode: String,
    pub country: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zipcode: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zipcode: zipcode.into(),
            country: country.into(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(
            [
                ("street", &self.street),
                ("city", &self.city),
                ("state", &self.state),
                ("zipcode", &self.zipcode),
                ("country", &self.country),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
            .collect(),
        )
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        serde_json::from_value(value.clone())
            .map_err(|e| HypergraphError::invalid_input(format!("address: {e}")))
    }
}

/// True for nested values shaped like an address.
pub fn is_address(value: &serde_json::Map<String, Value>) -> bool {
    value.contains_key("street")
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}, {} {} {}",
            self.street, self.city, self.state, self.zipcode, self.country
        )
    }
}

/// Parses `"<n> <name> <suffix> <city>, <state> <zipcode> <country>"`: the street is
/// the first three words, the city whatever precedes the comma.
impl FromStr for Address {
    type Err = HypergraphError;

    fn from_str(s: &str) -> Result<Self> {
        let malformed = || HypergraphError::invalid_input(format!("malformed address: {s}"));
        let (before, after) = s.split_once(", ").ok_or_else(malformed)?;
        let words: Vec<&str> = before.splitn(4, ' ').collect();
        if words.len() < 4 {
            return Err(malformed());
        }
        let mut tail = after.splitn(3, ' ');
        let state = tail.next().ok_or_else(malformed)?;
        let zipcode = tail.next().ok_or_else(malformed)?;
        let country = tail.next().ok_or_else(malformed)?;
        Ok(Address::new(
            words[..3].join(" "),
            words[3],
            state,
            zipcode,
            country,
        ))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn display_and_parse_agree() {
        let address = Address::new("123 Sesame St", "New York", "NY", "00001", "United States");
        let text = address.to_string();
        assert_eq!(text, "123 Sesame St New York, NY 00001 United States");
        assert_eq!(text.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn legacy_zip_attribute_is_accepted() {
        let value = json!({
            "street": "1 Main Rd",
            "city": "Springfield",
            "state": "IL",
            "zip": "62701",
            "country": "USA"
        });
        let address = Address::from_value(&value).unwrap();
        assert_eq!(address.zipcode, "62701");
        assert!(address.to_value().get("zipcode").is_some());
    }

    #[test]
    fn short_addresses_are_rejected() {
        assert!("Main St, NY".parse::<Address>().is_err());
        assert!("1 Main St Town".parse::<Address>().is_err());
    }
}
