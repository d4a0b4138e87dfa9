//! Operator definitions and the registry that maps tags to them.

use crate::codec;
use crate::config::LogicConfig;
use crate::error::{LogicError, Result};
use crate::operators;
use crate::rule::{Operation, Rule};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Number of operands an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Any number of operands, including none.
    Any,
    /// Exactly `n` operands.
    Fixed(usize),
    /// At least `n` operands.
    AtLeast(usize),
    /// Between `min` and `max` operands, inclusive.
    Range(usize, usize),
}

impl Arity {
    /// Fails with [`LogicError::MalformedRule`] when `count` operands do not fit.
    pub fn check(&self, operator: &str, count: usize) -> Result<()> {
        let ok = match *self {
            Arity::Any => true,
            Arity::Fixed(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Range(min, max) => (min..=max).contains(&count),
        };
        if ok {
            Ok(())
        } else {
            Err(LogicError::malformed(operator, self.describe()))
        }
    }

    fn describe(&self) -> String {
        fn operands(n: usize) -> &'static str {
            if n == 1 {
                "operand"
            } else {
                "operands"
            }
        }
        match *self {
            Arity::Any => "any number of operands".to_string(),
            Arity::Fixed(n) => format!("exactly {} {}", n, operands(n)),
            Arity::AtLeast(n) => format!("at least {} {}", n, operands(n)),
            Arity::Range(min, max) => format!("between {} and {} operands", min, max),
        }
    }
}

/// Evaluates an operation given its operand rules, the primary data and the
/// optional context data.
pub type ApplyFn = fn(&[Rule], &Value, Option<&Value>) -> Result<Value>;

/// A single operator: its tag, alternative tags, arity and evaluation logic.
pub struct OperatorDefinition {
    pub(crate) name: &'static str,
    pub(crate) aliases: &'static [&'static str],
    pub(crate) arity: Arity,
    pub(crate) apply_fn: ApplyFn,
}

impl fmt::Debug for OperatorDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

impl OperatorDefinition {
    pub const fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        arity: Arity,
        apply_fn: ApplyFn,
    ) -> Self {
        OperatorDefinition {
            name,
            aliases,
            arity,
            apply_fn,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Evaluates the operator on `args`, checking the operand count first.
    pub fn apply(&self, args: &[Rule], data: &Value, context: Option<&Value>) -> Result<Value> {
        self.arity.check(self.name, args.len())?;
        (self.apply_fn)(args, data, context)
    }

    fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Immutable map of operator tag (name or alias) to definition.
///
/// Built once through [`RegistryBuilder`] and never mutated afterwards, so a
/// registry can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct Registry {
    operators: HashMap<&'static str, Arc<OperatorDefinition>>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// The registry of all built-in operators.
    ///
    /// Fails with [`LogicError::DuplicateOperator`] if two built-ins claim
    /// the same tag.
    pub fn standard() -> Result<Self> {
        let mut builder = RegistryBuilder::new();
        for op in operators::all_operators() {
            builder.insert(op)?;
        }
        Ok(builder.build())
    }

    pub fn get(&self, tag: &str) -> Option<&Arc<OperatorDefinition>> {
        self.operators.get(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.operators.contains_key(tag)
    }

    /// All registered tags, sorted.
    pub fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<_> = self.operators.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// Builds an operation rule for `tag`, validating the operand count.
    ///
    /// The operation remembers `tag` itself, so a rule read through an alias
    /// is written back under that alias.
    pub fn build(&self, tag: &str, args: Vec<Rule>) -> Result<Rule> {
        let (tag, definition) = self
            .operators
            .get_key_value(tag)
            .ok_or_else(|| LogicError::UnknownOperator(tag.to_string()))?;
        Operation::tagged(*tag, Arc::clone(definition), args).map(Rule::Operation)
    }

    /// Parses a JSON encoded rule with the default [`LogicConfig`].
    pub fn parse(&self, value: &Value) -> Result<Rule> {
        self.parse_with(value, &LogicConfig::default())
    }

    pub fn parse_with(&self, value: &Value, config: &LogicConfig) -> Result<Rule> {
        codec::parse(self, value, config)
    }

    /// Parses a rule from JSON text.
    pub fn parse_str(&self, text: &str) -> Result<Rule> {
        let value: Value = serde_json::from_str(text)?;
        self.parse(&value)
    }
}

/// Collects operator definitions and rejects duplicate tags.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    operators: HashMap<&'static str, Arc<OperatorDefinition>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder::default()
    }

    /// A builder pre-populated with the built-in operators.
    pub fn with_defaults() -> Result<Self> {
        Ok(RegistryBuilder {
            operators: Registry::standard()?.operators,
        })
    }

    /// Adds an operator under its name and aliases.
    ///
    /// Nothing is added if any of its tags is already taken.
    pub fn register(&mut self, definition: OperatorDefinition) -> Result<&mut Self> {
        self.insert(Arc::new(definition))?;
        Ok(self)
    }

    fn insert(&mut self, definition: Arc<OperatorDefinition>) -> Result<()> {
        if let Some(taken) = definition.tags().find(|tag| self.operators.contains_key(tag)) {
            warn!(tag = taken, "rejected duplicate operator registration");
            return Err(LogicError::DuplicateOperator(taken.to_string()));
        }
        for tag in definition.tags() {
            self.operators.insert(tag, Arc::clone(&definition));
        }
        Ok(())
    }

    pub fn build(self) -> Registry {
        debug!(operators = self.operators.len(), "built operator registry");
        Registry {
            operators: self.operators,
        }
    }
}

/// The process-wide registry of built-in operators.
///
/// Built on first use and read-only from then on. A duplicate built-in tag
/// is reported on every call.
pub fn registry() -> Result<&'static Registry> {
    static REGISTRY: OnceLock<std::result::Result<Registry, String>> = OnceLock::new();
    REGISTRY
        .get_or_init(|| {
            Registry::standard().map_err(|e| match e {
                LogicError::DuplicateOperator(tag) => tag,
                other => other.to_string(),
            })
        })
        .as_ref()
        .map_err(|tag| LogicError::DuplicateOperator(tag.clone()))
}
