//! The rule tree and its evaluation entry point.

use crate::error::{LogicError, Result};
use crate::registry::{registry, OperatorDefinition};
use serde_json::Value;
use std::str::FromStr;
use std::sync::Arc;

/// A node of a JSON Logic expression tree.
///
/// A rule owns its operands and is never mutated after construction, so the
/// same tree can be evaluated any number of times, from any thread, against
/// different data.
#[derive(Debug, Clone)]
pub enum Rule {
    /// A constant JSON value.
    ///
    /// A single-key object is encoded as an operation, so a literal holding
    /// one is written as `{"<key>": ...}` and reads back as an operation on
    /// `<key>` (usually [`LogicError::UnknownOperator`]). Use objects with
    /// zero or several keys, or fetch the object from data with `var`.
    Literal(Value),
    /// An array whose elements are themselves rules.
    Array(Vec<Rule>),
    /// An operator applied to operand rules.
    Operation(Operation),
}

/// An operator definition together with its operands.
#[derive(Debug, Clone)]
pub struct Operation {
    tag: &'static str,
    definition: Arc<OperatorDefinition>,
    args: Vec<Rule>,
}

impl Operation {
    /// Pairs a definition with operands, checking the operand count.
    pub fn new(definition: Arc<OperatorDefinition>, args: Vec<Rule>) -> Result<Self> {
        let tag = definition.name;
        Operation::tagged(tag, definition, args)
    }

    /// Like [`Operation::new`], recording `tag` (the name or one of the
    /// aliases) as the tag the operation is written under.
    pub fn tagged(
        tag: &'static str,
        definition: Arc<OperatorDefinition>,
        args: Vec<Rule>,
    ) -> Result<Self> {
        definition.arity.check(tag, args.len())?;
        Ok(Operation {
            tag,
            definition,
            args,
        })
    }

    /// The tag the operation was built with.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The canonical operator name, even when built through an alias.
    pub fn name(&self) -> &'static str {
        self.definition.name
    }

    pub fn args(&self) -> &[Rule] {
        &self.args
    }

    pub fn definition(&self) -> &Arc<OperatorDefinition> {
        &self.definition
    }
}

impl Rule {
    /// A constant rule. See [`Rule::Literal`] for the single-key object caveat.
    pub fn literal(value: impl Into<Value>) -> Self {
        Rule::Literal(value.into())
    }

    /// Builds an operation from the process-wide registry.
    pub fn operation(tag: &str, args: Vec<Rule>) -> Result<Self> {
        registry()?.build(tag, args)
    }

    /// Parses a JSON encoded rule using the process-wide registry.
    pub fn from_value(value: &Value) -> Result<Self> {
        registry()?.parse(value)
    }

    /// The operator tag, or `None` for literals and arrays.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Rule::Operation(op) => Some(op.tag()),
            _ => None,
        }
    }

    /// Evaluates the rule.
    ///
    /// `context` is secondary data scoped by the array operators (the current
    /// element inside `map`, `filter` and friends). Most operators simply
    /// hand it on to their operands.
    pub fn apply(&self, data: &Value, context: Option<&Value>) -> Result<Value> {
        match self {
            Rule::Literal(value) => Ok(value.clone()),
            Rule::Array(items) => items
                .iter()
                .map(|item| item.apply(data, context))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            Rule::Operation(op) => (op.definition.apply_fn)(&op.args, data, context),
        }
    }

    /// Evaluates the rule without context data.
    pub fn evaluate(&self, data: &Value) -> Result<Value> {
        self.apply(data, None)
    }
}

impl From<Value> for Rule {
    fn from(value: Value) -> Self {
        Rule::Literal(value)
    }
}

impl FromStr for Rule {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self> {
        registry()?.parse_str(s)
    }
}
