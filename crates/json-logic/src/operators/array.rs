//! Array operators.
//!
//! `map`, `filter`, `all`, `some` and `none` evaluate their second operand
//! once per element, passing the element as the context data. `reduce`
//! passes `{"current": element, "accumulator": acc}`. A non-array input is
//! treated as empty.

use crate::error::Result;
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util::is_truthy;
use serde_json::{json, Value};
use std::sync::Arc;

fn input_items(rule: &Rule, data: &Value, context: Option<&Value>) -> Result<Vec<Value>> {
    match rule.apply(data, context)? {
        Value::Array(items) => Ok(items),
        _ => Ok(Vec::new()),
    }
}

fn merge_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let mut merged = Vec::new();
    for arg in args {
        match arg.apply(data, context)? {
            Value::Array(items) => merged.extend(items),
            other => merged.push(other),
        }
    }
    Ok(Value::Array(merged))
}

fn map_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let items = input_items(&args[0], data, context)?;
    items
        .iter()
        .map(|item| args[1].apply(data, Some(item)))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn filter_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let mut kept = Vec::new();
    for item in input_items(&args[0], data, context)? {
        if is_truthy(&args[1].apply(data, Some(&item))?) {
            kept.push(item);
        }
    }
    Ok(Value::Array(kept))
}

/// `{"reduce": [input, rule, initial]}`.
fn reduce_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let items = input_items(&args[0], data, context)?;
    let mut accumulator = args[2].apply(data, context)?;
    for current in items {
        let scope = json!({ "current": current, "accumulator": accumulator });
        accumulator = args[1].apply(data, Some(&scope))?;
    }
    Ok(accumulator)
}

/// Counts elements for which the rule is truthy, stopping once `stop_at`
/// matches have been seen.
fn count_truthy(args: &[Rule], data: &Value, items: &[Value], stop_at: usize) -> Result<usize> {
    let mut count = 0;
    for item in items {
        if is_truthy(&args[1].apply(data, Some(item))?) {
            count += 1;
            if count == stop_at {
                break;
            }
        }
    }
    Ok(count)
}

/// An empty array is not "all" of anything.
fn all_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let items = input_items(&args[0], data, context)?;
    if items.is_empty() {
        return Ok(Value::Bool(false));
    }
    for item in &items {
        if !is_truthy(&args[1].apply(data, Some(item))?) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn some_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let items = input_items(&args[0], data, context)?;
    Ok(Value::Bool(count_truthy(args, data, &items, 1)? > 0))
}

fn none_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let items = input_items(&args[0], data, context)?;
    Ok(Value::Bool(count_truthy(args, data, &items, 1)? == 0))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "merge",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: merge_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "map",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: map_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "filter",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: filter_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "reduce",
            aliases: &[],
            arity: Arity::Fixed(3),
            apply_fn: reduce_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "all",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: all_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "some",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: some_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "none",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: none_apply,
        }),
    ]
}
