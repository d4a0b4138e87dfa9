//! The `in` operator: substring search or array membership.

use crate::error::{LogicError, Result};
use crate::registry::{Arity, OperatorDefinition};
use crate::rule::Rule;
use crate::util;
use serde_json::Value;
use std::sync::Arc;

/// `{"in": [test, value]}`.
///
/// When `value` is a string, `test` is stringified and searched for as a
/// substring; an empty needle is never found. When `value` is an array, the
/// result is whether any element is equivalent to `test`. Any other `value`
/// yields `false`.
fn in_apply(args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
    let test = args[0].apply(data, context)?;
    let source = args[1].apply(data, context)?;
    let found = match &source {
        Value::String(haystack) => {
            let needle = util::stringify(&test).ok_or_else(|| {
                LogicError::evaluation(format!(
                    "Cannot check string for {}.",
                    util::json_type(&test)
                ))
            })?;
            !needle.is_empty() && haystack.contains(needle.as_str())
        }
        Value::Array(items) => items.iter().any(|item| util::equivalent(item, &test)),
        _ => false,
    };
    Ok(Value::Bool(found))
}

pub fn operators() -> Vec<Arc<OperatorDefinition>> {
    vec![Arc::new(OperatorDefinition {
        name: "in",
        aliases: &[],
        arity: Arity::Fixed(2),
        apply_fn: in_apply,
    })]
}
