//! Conversion between the JSON encoding of a rule and the [`Rule`] tree.
//!
//! An operation is encoded as a single-key object, `{"<tag>": [operands]}`.
//! A lone operand may be written without the surrounding array, as in
//! `{"var": "a"}`. Objects with zero or several keys are literal data, JSON
//! arrays become [`Rule::Array`] and scalars are literals.

use crate::config::LogicConfig;
use crate::error::{LogicError, Result};
use crate::registry::{registry, Registry};
use crate::rule::Rule;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Parses `value` into a rule, resolving tags against `registry`.
pub fn parse(registry: &Registry, value: &Value, config: &LogicConfig) -> Result<Rule> {
    Parser {
        registry,
        max_depth: config.max_depth,
    }
    .parse(value, 0)
}

struct Parser<'a> {
    registry: &'a Registry,
    max_depth: usize,
}

impl Parser<'_> {
    /// `depth` counts the operations and arrays enclosing `value`.
    fn parse(&self, value: &Value, depth: usize) -> Result<Rule> {
        match value {
            Value::Array(items) => {
                self.enter(depth)?;
                self.parse_all(items, depth + 1).map(Rule::Array)
            }
            Value::Object(map) if map.len() == 1 => {
                self.enter(depth)?;
                let Some((tag, operands)) = map.iter().next() else {
                    return Ok(Rule::Literal(value.clone()));
                };
                let args = match operands {
                    Value::Array(items) => self.parse_all(items, depth + 1)?,
                    other => vec![self.parse(other, depth + 1)?],
                };
                self.registry.build(tag, args)
            }
            other => Ok(Rule::Literal(other.clone())),
        }
    }

    fn parse_all(&self, items: &[Value], depth: usize) -> Result<Vec<Rule>> {
        items.iter().map(|item| self.parse(item, depth)).collect()
    }

    fn enter(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            Err(LogicError::DepthExceeded(self.max_depth))
        } else {
            Ok(())
        }
    }
}

impl Rule {
    /// Writes the rule back to its JSON encoding.
    pub fn to_value(&self) -> Value {
        match self {
            Rule::Literal(value) => value.clone(),
            Rule::Array(items) => Value::Array(items.iter().map(Rule::to_value).collect()),
            Rule::Operation(op) => {
                let operands = match op.args() {
                    [single] => match single.to_value() {
                        // A bare array would read back as several operands.
                        Value::Array(items) => Value::Array(vec![Value::Array(items)]),
                        bare => bare,
                    },
                    args => Value::Array(args.iter().map(Rule::to_value).collect()),
                };
                let mut map = Map::with_capacity(1);
                map.insert(op.tag().to_string(), operands);
                Value::Object(map)
            }
        }
    }
}

impl Serialize for Rule {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Rule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        registry()
            .and_then(|registry| registry.parse(&value))
            .map_err(D::Error::custom)
    }
}
