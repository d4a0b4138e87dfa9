//! Arithmetic operators. Operands are converted with
//! [`numberify`](crate::util::numberify); results prefer integer form.

use crate::error::{LogicError, Result};
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn numbers(args: &[Rule], data: &Value, context: Option<&Value>, verb: &str) -> Result<Vec<f64>> {
    args.iter()
        .map(|arg| {
            let value = arg.apply(data, context)?;
            util::numberify(&value).ok_or_else(|| {
                LogicError::evaluation(format!(
                    "Cannot {} {} values.",
                    verb,
                    util::json_type(&value)
                ))
            })
        })
        .collect()
}

fn add_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let sum = numbers(args, data, context, "add")?.into_iter().sum();
    Ok(util::number_value(sum))
}

/// One operand negates, two subtract.
fn subtract_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let result = match numbers(args, data, context, "subtract")?.as_slice() {
        [] => 0.0,
        [a] => -a,
        [a, b, ..] => a - b,
    };
    Ok(util::number_value(result))
}

fn multiply_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let product = numbers(args, data, context, "multiply")?.into_iter().product();
    Ok(util::number_value(product))
}

fn divisor(value: f64) -> Result<f64> {
    if value == 0.0 {
        Err(LogicError::evaluation("Cannot divide by zero."))
    } else {
        Ok(value)
    }
}

fn divide_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let values = numbers(args, data, context, "divide")?;
    Ok(util::number_value(values[0] / divisor(values[1])?))
}

fn modulo_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let values = numbers(args, data, context, "take the remainder of")?;
    Ok(util::number_value(values[0] % divisor(values[1])?))
}

fn min_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let values = numbers(args, data, context, "find the minimum of")?;
    Ok(values
        .into_iter()
        .reduce(f64::min)
        .map_or(Value::Null, util::number_value))
}

fn max_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let values = numbers(args, data, context, "find the maximum of")?;
    Ok(values
        .into_iter()
        .reduce(f64::max)
        .map_or(Value::Null, util::number_value))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "+",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: add_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "-",
            aliases: &[],
            arity: Arity::Range(1, 2),
            apply_fn: subtract_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "*",
            aliases: &[],
            arity: Arity::AtLeast(1),
            apply_fn: multiply_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "/",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: divide_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "%",
            aliases: &[],
            arity: Arity::Fixed(2),
            apply_fn: modulo_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "min",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: min_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "max",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: max_apply,
        }),
    ]
}
