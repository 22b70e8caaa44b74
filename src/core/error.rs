use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("Invalid JSON path '{0}': {1}")]
    InvalidPath(String, String),

    #[error("Illegal argument shape for {operation}: expected {expected}, got {actual}")]
    IllegalArgumentShape {
        operation: String,
        expected: String,
        actual: String,
    },

    #[error("Template '{template}' references argument {{{index}}} but only {available} argument(s) are declared")]
    TemplateArityMismatch {
        template: String,
        index: usize,
        available: usize,
    },

    #[error("Incomplete projection: {0}")]
    IncompleteProjection(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Syntax error: {0}")]
    SyntaxError(String),
}

impl ExprError {
    pub(crate) fn shape(
        operation: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::IllegalArgumentShape {
            operation: operation.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExprError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message_names_expected_shape() {
        let err = ExprError::shape("JSON_OBJECT", "an even number of key/value arguments", "3");
        assert_eq!(
            err.to_string(),
            "Illegal argument shape for JSON_OBJECT: expected an even number of key/value arguments, got 3"
        );
    }

    #[test]
    fn test_arity_mismatch_message() {
        let err = ExprError::TemplateArityMismatch {
            template: "F({0}, {2})".into(),
            index: 2,
            available: 2,
        };
        assert!(err.to_string().contains("{2}"));
    }
}
