//! Equality and relational operators.

use crate::error::Result;
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

fn eval_pair(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<(Value, Value)> {
    let left = args[0].apply(data, context)?;
    let right = args[1].apply(data, context)?;
    Ok((left, right))
}

fn eq_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let (left, right) = eval_pair(args, data, context)?;
    Ok(Value::Bool(util::loose_equal(&left, &right)))
}

fn ne_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let (left, right) = eval_pair(args, data, context)?;
    Ok(Value::Bool(!util::loose_equal(&left, &right)))
}

fn strict_eq_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let (left, right) = eval_pair(args, data, context)?;
    Ok(Value::Bool(util::equivalent(&left, &right)))
}

fn strict_ne_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let (left, right) = eval_pair(args, data, context)?;
    Ok(Value::Bool(!util::equivalent(&left, &right)))
}

/// Checks every adjacent pair of operands, so three operands form a
/// "between" test: `{"<": [1, x, 10]}`.
fn chain(
    args: &[Rule],
    data: &Value,
    context: Option<&Value>,
    accept: fn(Ordering) -> bool,
) -> Result<Value> {
    let values = args
        .iter()
        .map(|arg| arg.apply(data, context))
        .collect::<Result<Vec<_>>>()?;
    for pair in values.windows(2) {
        if !util::compare(&pair[0], &pair[1])?.is_some_and(accept) {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

fn lt_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    chain(args, data, context, Ordering::is_lt)
}

fn le_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    chain(args, data, context, Ordering::is_le)
}

fn gt_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    chain(args, data, context, Ordering::is_gt)
}

fn ge_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    chain(args, data, context, Ordering::is_ge)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "==",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: eq_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "!=",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: ne_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "===",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: strict_eq_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "!==",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: strict_ne_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "<",
            aliases: &[],
            arity: Arity::Range(2, 3),
            apply_fn: lt_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "<=",
            aliases: &[],
            arity: Arity::Range(2, 3),
            apply_fn: le_apply,
        }),
        Arc::new(OperatorDefinition {
            name: ">",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: gt_apply,
        }),
        Arc::new(OperatorDefinition {
            name: ">=",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: ge_apply,
        }),
    ]
}
