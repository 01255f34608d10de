//! Primary keys: a single scalar or an ordered pair of scalars.
//!
//! Keys serialize untagged, so a single integer key is stored as a JSON number,
//! a text key as a JSON string and a composite key as a two element array.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    /// Reads a key scalar out of an attribute value. Only integers and strings qualify.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Scalar::Int),
            Value::String(s) => Some(Scalar::Text(s.clone())),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Scalar::Int(n) => Value::from(*n),
            Scalar::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Text(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Int(i64::from(value))
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryKey {
    Single(Scalar),
    Composite(Scalar, Scalar),
}

impl PrimaryKey {
    /// Interprets an attribute value as a key: a scalar, or a two element array of scalars.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Some(scalar) = Scalar::from_value(value) {
            return Some(PrimaryKey::Single(scalar));
        }
        match value {
            Value::Array(items) if items.len() == 2 => Some(PrimaryKey::Composite(
                Scalar::from_value(&items[0])?,
                Scalar::from_value(&items[1])?,
            )),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            PrimaryKey::Single(s) => s.to_value(),
            PrimaryKey::Composite(a, b) => Value::Array(vec![a.to_value(), b.to_value()]),
        }
    }

    /// True when `value` names this key.
    pub fn matches(&self, value: &Value) -> bool {
        PrimaryKey::from_value(value).is_some_and(|other| &other == self)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PrimaryKey::Single(s) => s.as_int(),
            PrimaryKey::Composite(..) => None,
        }
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryKey::Single(s) => write!(f, "{s}"),
            PrimaryKey::Composite(a, b) => write!(f, "({a}, {b})"),
        }
    }
}

macro_rules! single_key_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for PrimaryKey {
                fn from(value: $ty) -> Self {
                    PrimaryKey::Single(Scalar::from(value))
                }
            }
        )*
    };
}

single_key_from!(i64, i32, &str, String);

impl From<Scalar> for PrimaryKey {
    fn from(value: Scalar) -> Self {
        PrimaryKey::Single(value)
    }
}

impl<A: Into<Scalar>, B: Into<Scalar>> From<(A, B)> for PrimaryKey {
    fn from((a, b): (A, B)) -> Self {
        PrimaryKey::Composite(a.into(), b.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keys_read_from_attribute_values() {
        assert_eq!(PrimaryKey::from_value(&json!(7)), Some(PrimaryKey::from(7)));
        assert_eq!(
            PrimaryKey::from_value(&json!("a")),
            Some(PrimaryKey::from("a"))
        );
        assert_eq!(
            PrimaryKey::from_value(&json!([1, 2])),
            Some(PrimaryKey::from((1, 2)))
        );
        assert_eq!(PrimaryKey::from_value(&json!(1.5)), None);
        assert_eq!(PrimaryKey::from_value(&json!([1, 2, 3])), None);
    }

    #[test]
    fn composite_keys_serialize_as_pairs() {
        let key = PrimaryKey::from((3, 9));
        let text = serde_json::to_string(&key).unwrap();
        assert_eq!(text, "[3,9]");
        let back: PrimaryKey = serde_json::from_str(&text).unwrap();
        assert_eq!(back, key);
        assert_eq!(key.to_string(), "(3, 9)");
    }
}
