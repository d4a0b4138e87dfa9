//! Built-in operators, grouped by concern.
//!
//! Every module exposes `operators()`, returning its definitions; the
//! registry is assembled from [`all_operators`].

pub mod arithmetic;
pub mod array;
pub mod comparison;
pub mod container;
pub mod data;
pub mod logical;
pub mod string;

use crate::registry::OperatorDefinition;
use std::sync::Arc;

/// All built-in operators.
pub fn all_operators() -> Vec<Arc<OperatorDefinition>> {
    let mut ops = Vec::new();
    ops.extend(data::operators());
    ops.extend(logical::operators());
    ops.extend(comparison::operators());
    ops.extend(arithmetic::operators());
    ops.extend(container::operators());
    ops.extend(array::operators());
    ops.extend(string::operators());
    ops
}
