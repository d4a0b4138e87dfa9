use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogicError {
    /// The JSON encoding of a rule has the wrong shape or operand count.
    #[error("\"{operator}\" operator expects {expected}.")]
    MalformedRule { operator: String, expected: String },

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Operands evaluated to types the operator cannot work with.
    #[error("{0}")]
    Evaluation(String),

    #[error("Operator \"{0}\" is already registered.")]
    DuplicateOperator(String),

    #[error("Rule nesting exceeds the limit of {0}.")]
    DepthExceeded(usize),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LogicError {
    pub(crate) fn malformed(operator: &str, expected: impl Into<String>) -> Self {
        LogicError::MalformedRule {
            operator: operator.to_string(),
            expected: expected.into(),
        }
    }

    pub(crate) fn evaluation(message: impl Into<String>) -> Self {
        LogicError::Evaluation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LogicError>;
