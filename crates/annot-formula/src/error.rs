//! Error types for formula parsing.

use thiserror::Error;

/// Why a formula string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIssue {
    #[error("empty formula")]
    Empty,
    #[error("unknown element symbol '{0}'")]
    UnknownElement(String),
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("element count must be positive")]
    ZeroCount,
    #[error("element count is too large")]
    CountOverflow,
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("unbalanced bracket")]
    UnbalancedBracket,
    #[error("malformed charge '{0}'")]
    MalformedCharge(String),
}

/// Errors returned by [`crate::harmonize`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// The input is not a formula the harmonizer understands.
    #[error("cannot parse '{input}' as formula: {reason} (at position {position})")]
    Unparseable {
        input: String,
        position: usize,
        reason: ParseIssue,
    },
}

impl FormulaError {
    pub(crate) fn unparseable(input: &str, position: usize, reason: ParseIssue) -> Self {
        Self::Unparseable {
            input: input.to_string(),
            position,
            reason,
        }
    }

    /// Shift the reported position by `offset` chars.
    pub(crate) fn offset_by(self, offset: usize) -> Self {
        match self {
            Self::Unparseable {
                input,
                position,
                reason,
            } => Self::Unparseable {
                input,
                position: position + offset,
                reason,
            },
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        match self {
            Self::Unparseable { input, .. } => input,
        }
    }

    /// The parse failure behind this error.
    pub fn reason(&self) -> &ParseIssue {
        match self {
            Self::Unparseable { reason, .. } => reason,
        }
    }
}

/// Result type for formula operations.
pub type Result<T> = std::result::Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FormulaError::unparseable("Xx2", 0, ParseIssue::UnknownElement("X".into()));
        assert_eq!(
            err.to_string(),
            "cannot parse 'Xx2' as formula: unknown element symbol 'X' (at position 0)"
        );
        assert_eq!(err.input(), "Xx2");
    }
}
