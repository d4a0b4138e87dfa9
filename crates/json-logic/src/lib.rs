//! JSON Logic rule engine.
//!
//! # Overview
//!
//! Rules are JSON documents of the form `{"<operator>": [operands...]}`.
//! They are parsed once into a [`Rule`] tree and can then be evaluated any
//! number of times against different data.
//!
//! # Example
//!
//! ```
//! use json_logic::Rule;
//! use serde_json::json;
//!
//! let rule = Rule::from_value(&json!({"in": [{"var": "season"}, ["Spring", "Summer"]]})).unwrap();
//!
//! assert_eq!(rule.evaluate(&json!({"season": "Spring"})).unwrap(), json!(true));
//! assert_eq!(rule.evaluate(&json!({"season": "Winter"})).unwrap(), json!(false));
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod operators;
pub mod registry;
pub mod rule;
pub mod util;

pub use config::LogicConfig;
pub use error::{LogicError, Result};
pub use registry::{registry, ApplyFn, Arity, OperatorDefinition, Registry, RegistryBuilder};
pub use rule::{Operation, Rule};

use serde_json::Value;

/// Parses `rule` and evaluates it against `data` in one step.
pub fn apply(rule: &Value, data: &Value) -> Result<Value> {
    Rule::from_value(rule)?.evaluate(data)
}
