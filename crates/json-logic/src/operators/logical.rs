//! Branching and boolean operators.

use crate::error::Result;
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util::is_truthy;
use serde_json::Value;
use std::sync::Arc;

/// `[cond1, then1, cond2, then2, ..., else]`. Only the taken branch is
/// evaluated.
fn if_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let mut rest = args;
    loop {
        match rest {
            [] => return Ok(Value::Null),
            [otherwise] => return otherwise.apply(data, context),
            [cond, then, tail @ ..] => {
                if is_truthy(&cond.apply(data, context)?) {
                    return then.apply(data, context);
                }
                rest = tail;
            }
        }
    }
}

fn not_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let value = args[0].apply(data, context)?;
    Ok(Value::Bool(!is_truthy(&value)))
}

fn truthy_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let value = args[0].apply(data, context)?;
    Ok(Value::Bool(is_truthy(&value)))
}

/// Returns the first operand whose truthiness equals `stop_on`, or the last.
fn short_circuit(
    args: &[Rule],
    data: &Value,
    context: Option<&Value>,
    stop_on: bool,
) -> Result<Value> {
    let mut last = Value::Null;
    for arg in args {
        last = arg.apply(data, context)?;
        if is_truthy(&last) == stop_on {
            break;
        }
    }
    Ok(last)
}

fn and_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    short_circuit(args, data, context, false)
}

fn or_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    short_circuit(args, data, context, true)
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "if",
            aliases: &["?:"],
            arity: Arity::Any,
            apply_fn: if_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "!",
            aliases: &[],
            arity: Arity::Fixed(1),
            apply_fn: not_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "!!",
            aliases: &[],
            arity: Arity::Fixed(1),
            apply_fn: truthy_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "and",
            aliases: &[],
            arity: Arity::AtLeast(1),
            apply_fn: and_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "or",
            aliases: &[],
            arity: Arity::AtLeast(1),
            apply_fn: or_apply,
        }),
    ]
}
