//! Operators that read from the input data: `var`, `missing` and
//! `missing_some`.
//!
//! Paths are dot separated (`user.tags.0`). Lookups try the context data
//! first and fall back to the primary data, so inside `map` or `filter`
//! `{"var": ""}` is the current element while `{"var": "limit"}` can still
//! reach the outer document.

use crate::error::{LogicError, Result};
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn path_string(path: &Value) -> Result<String> {
    util::stringify(path).ok_or_else(|| {
        LogicError::evaluation(format!(
            "Cannot use {} as a variable path.",
            util::json_type(path)
        ))
    })
}

fn lookup<'a>(path: &str, data: &'a Value, context: Option<&'a Value>) -> Option<&'a Value> {
    context
        .and_then(|scope| util::resolve_path(scope, path))
        .or_else(|| util::resolve_path(data, path))
}

/// `{"var": [path, default]}`. An empty or absent path returns the whole
/// scope; an unresolved path returns the default, or `null`.
fn var_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let scope = context.unwrap_or(data);
    let Some(path) = args.first() else {
        return Ok(scope.clone());
    };
    let path = path_string(&path.apply(data, context)?)?;
    if path.is_empty() {
        return Ok(scope.clone());
    }
    match lookup(&path, data, context) {
        Some(found) => Ok(found.clone()),
        None => match args.get(1) {
            Some(default) => default.apply(data, context),
            None => Ok(Value::Null),
        },
    }
}

fn missing_keys(keys: &[Value], data: &Value, context: Option<&Value>) -> Result<Vec<Value>> {
    let mut missing = Vec::new();
    for key in keys {
        let path = path_string(key)?;
        if lookup(&path, data, context).map_or(true, Value::is_null) {
            missing.push(key.clone());
        }
    }
    Ok(missing)
}

/// Lists the requested keys that are absent or `null`. A single array
/// operand is treated as the key list.
fn missing_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let mut keys = args
        .iter()
        .map(|arg| arg.apply(data, context))
        .collect::<Result<Vec<_>>>()?;
    if keys.len() == 1 {
        if let Some(Value::Array(inner)) = keys.first() {
            keys = inner.clone();
        }
    }
    missing_keys(&keys, data, context).map(Value::Array)
}

/// `{"missing_some": [min, keys]}`: `[]` when at least `min` keys are
/// present, otherwise the missing ones.
fn missing_some_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let min = args[0].apply(data, context)?;
    let min = util::numberify(&min).ok_or_else(|| {
        LogicError::evaluation(format!(
            "Expected a number of required keys, found {}.",
            util::json_type(&min)
        ))
    })?;
    let keys = match args[1].apply(data, context)? {
        Value::Array(keys) => keys,
        other => {
            return Err(LogicError::evaluation(format!(
                "Expected an array of keys, found {}.",
                util::json_type(&other)
            )))
        }
    };
    let missing = missing_keys(&keys, data, context)?;
    let present = keys.len() - missing.len();
    if present as f64 >= min {
        Ok(Value::Array(Vec::new()))
    } else {
        Ok(Value::Array(missing))
    }
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "var",
            aliases: &[],
            arity: Arity::Range(0, 2),
            apply_fn: var_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "missing",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: missing_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "missing_some",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: missing_some_apply,
        }),
    ]
}
