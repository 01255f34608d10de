//! Typed selection predicates.
//!
//! The textual form `"<attribute><op><value>"` is still accepted through
//! [`Predicate::parse`]: the operator is the first of `=`, `<`, `>`, `$` found in
//! the string (checked in that order) and the string is split on its first
//! occurrence. Building a [`Predicate`] directly avoids that ambiguity when an
//! attribute name itself contains an operator character.

use std::{fmt, str::FromStr};

use serde_json::Value;

use crate::{
    errors::{HypergraphError, Result},
    graph::Record,
};

const OPERATORS: [char; 4] = ['=', '<', '>', '$'];

#[derive(Clone, Debug, PartialEq)]
pub enum Comparator {
    /// String forms are equal.
    Eq(String),
    /// Numeric attribute below the operand.
    Lt(i64),
    /// Numeric attribute above the operand.
    Gt(i64),
    /// String form is one of the listed values.
    In(Vec<String>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Always,
    Compare {
        attribute: String,
        comparator: Comparator,
    },
}

impl Predicate {
    pub fn eq(attribute: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::compare(attribute, Comparator::Eq(value.to_string()))
    }

    pub fn lt(attribute: impl Into<String>, value: i64) -> Self {
        Self::compare(attribute, Comparator::Lt(value))
    }

    pub fn gt(attribute: impl Into<String>, value: i64) -> Self {
        Self::compare(attribute, Comparator::Gt(value))
    }

    pub fn one_of<I, V>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: fmt::Display,
    {
        Self::compare(
            attribute,
            Comparator::In(values.into_iter().map(|v| v.to_string()).collect()),
        )
    }

    fn compare(attribute: impl Into<String>, comparator: Comparator) -> Self {
        Predicate::Compare {
            attribute: attribute.into(),
            comparator,
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Predicate::Always);
        }
        let op = OPERATORS
            .into_iter()
            .find(|op| input.contains(*op))
            .ok_or_else(|| HypergraphError::invalid_input(format!("no operator in {input:?}")))?;
        let (attribute, operand) = input
            .split_once(op)
            .ok_or_else(|| HypergraphError::invalid_input(format!("no operator in {input:?}")))?;
        let attribute = attribute.trim();
        let operand = operand.trim();
        if attribute.is_empty() {
            return Err(HypergraphError::invalid_input(format!(
                "missing attribute in {input:?}"
            )));
        }
        let comparator = match op {
            '=' => Comparator::Eq(operand.to_string()),
            '<' => Comparator::Lt(parse_integer(operand)?),
            '>' => Comparator::Gt(parse_integer(operand)?),
            _ => Comparator::In(parse_list(operand)),
        };
        Ok(Self::compare(attribute, comparator))
    }

    /// A record lacking the attribute never matches.
    pub fn matches(&self, record: &Record) -> bool {
        let (attribute, comparator) = match self {
            Predicate::Always => return true,
            Predicate::Compare {
                attribute,
                comparator,
            } => (attribute, comparator),
        };
        let Some(field) = record.get(attribute) else {
            return false;
        };
        match comparator {
            Comparator::Eq(expected) => string_form(field) == *expected,
            Comparator::Lt(bound) => compare_numeric(field, *bound).is_some_and(|o| o.is_lt()),
            Comparator::Gt(bound) => compare_numeric(field, *bound).is_some_and(|o| o.is_gt()),
            Comparator::In(values) => {
                let form = string_form(field);
                values.iter().any(|v| *v == form)
            }
        }
    }
}

impl FromStr for Predicate {
    type Err = HypergraphError;

    fn from_str(s: &str) -> Result<Self> {
        Predicate::parse(s)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => Ok(()),
            Predicate::Compare {
                attribute,
                comparator,
            } => match comparator {
                Comparator::Eq(v) => write!(f, "{attribute}={v}"),
                Comparator::Lt(v) => write!(f, "{attribute}<{v}"),
                Comparator::Gt(v) => write!(f, "{attribute}>{v}"),
                Comparator::In(values) => write!(f, "{attribute}$[{}]", values.join(", ")),
            },
        }
    }
}

/// The text a value is compared by: strings bare, everything else as JSON.
pub fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare_numeric(field: &Value, bound: i64) -> Option<std::cmp::Ordering> {
    let Value::Number(n) = field else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i.cmp(&bound));
    }
    n.as_f64()?.partial_cmp(&(bound as f64))
}

fn parse_integer(operand: &str) -> Result<i64> {
    operand
        .parse::<i64>()
        .map_err(|_| HypergraphError::invalid_input(format!("expected an integer, got {operand:?}")))
}

fn parse_list(operand: &str) -> Vec<String> {
    operand
        .replace(['[', ']'], "")
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graph::record;

    #[test]
    fn operators_are_detected_in_order() {
        assert_eq!(Predicate::parse("a=b<c").unwrap(), Predicate::eq("a", "b<c"));
        assert_eq!(Predicate::parse("stock > 0").unwrap(), Predicate::gt("stock", 0));
        assert_eq!(Predicate::parse("a<5").unwrap(), Predicate::lt("a", 5));
        assert_eq!(
            Predicate::parse("id$[1, 2,3]").unwrap(),
            Predicate::one_of("id", [1, 2, 3])
        );
        assert_eq!(Predicate::parse("").unwrap(), Predicate::Always);
    }

    #[test]
    fn malformed_predicates_are_rejected() {
        assert!(Predicate::parse("stock>many").is_err());
        assert!(Predicate::parse("=5").is_err());
        assert!(Predicate::parse("nothing here").is_err());
    }

    #[test]
    fn quoted_list_items_are_unwrapped() {
        let p = Predicate::parse("name$['elmo', \"bert\"]").unwrap();
        let elmo = record(json!({"name": "elmo"})).unwrap();
        let ernie = record(json!({"name": "ernie"})).unwrap();
        assert!(p.matches(&elmo));
        assert!(!p.matches(&ernie));
    }

    #[test]
    fn numeric_comparisons_accept_floats() {
        let cheap = record(json!({"price": 2.5})).unwrap();
        assert!(Predicate::lt("price", 3).matches(&cheap));
        assert!(!Predicate::gt("price", 3).matches(&cheap));
        let text = record(json!({"price": "2"})).unwrap();
        assert!(!Predicate::lt("price", 3).matches(&text));
    }

    #[test]
    fn display_round_trips_through_parse() {
        for text in ["userid=3", "stock>0", "orderid$[1, 2]"] {
            let p = Predicate::parse(text).unwrap();
            assert_eq!(Predicate::parse(&p.to_string()).unwrap(), p);
        }
    }
}
