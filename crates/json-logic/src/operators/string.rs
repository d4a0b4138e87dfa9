//! String operators.

use crate::error::{LogicError, Result};
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util;
use serde_json::Value;
use std::sync::Arc;

fn string_of(value: &Value) -> Result<String> {
    util::stringify(value).ok_or_else(|| {
        LogicError::evaluation(format!("Cannot use {} as a string.", util::json_type(value)))
    })
}

fn cat_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let mut out = String::new();
    for arg in args {
        out.push_str(&string_of(&arg.apply(data, context)?)?);
    }
    Ok(Value::String(out))
}

fn integer_of(value: &Value) -> Result<i64> {
    util::numberify(value).map(|n| n.trunc() as i64).ok_or_else(|| {
        LogicError::evaluation(format!(
            "Cannot use {} as a string position.",
            util::json_type(value)
        ))
    })
}

/// `{"substr": [source, start, length]}`, counted in characters. A negative
/// start counts from the end; a negative length stops that many characters
/// before the end.
fn substr_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let source = string_of(&args[0].apply(data, context)?)?;
    let chars: Vec<char> = source.chars().collect();
    let len = chars.len() as i64;

    let start = integer_of(&args[1].apply(data, context)?)?;
    let start = if start < 0 { len.saturating_add(start).max(0) } else { start.min(len) };

    let end = match args.get(2) {
        None => len,
        Some(length) => {
            let length = integer_of(&length.apply(data, context)?)?;
            if length < 0 {
                len.saturating_add(length).max(start)
            } else {
                start.saturating_add(length).min(len)
            }
        }
    };

    Ok(Value::String(chars[start as usize..end as usize].iter().collect()))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![
        Arc::new(OperatorDefinition {
            name: "cat",
            aliases: &[],
            arity: Arity::Any,
            apply_fn: cat_apply,
        }),
        Arc::new(OperatorDefinition {
            name: "substr",
            aliases: &[],
            arity: Arity::Range(2, 3),
            apply_fn: substr_apply,
        }),
    ]
}
