use thiserror::Error;

/// Contract violations reported by tree construction, lookup and editing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("invalid argument: {0}")]
    Argument(String),
    #[error("missing required argument `{0}`")]
    ArgumentNull(&'static str),
    #[error("`{0}` is out of range")]
    OutOfRange(&'static str),
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

impl SyntaxError {
    pub(crate) fn argument(message: impl Into<String>) -> Self {
        Self::Argument(message.into())
    }

    pub(crate) fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation(message.into())
    }
}

pub type Result<T, E = SyntaxError> = std::result::Result<T, E>;
