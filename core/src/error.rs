//! Error types for command matching and flag parsing.
//!
//! A [`MatchError`] is only ever produced by a node that *claimed* the
//! argument position it was asked about: "this token is not mine" is
//! reported as `Ok(false)` from [`Node::try_match`](crate::Node::try_match),
//! never as an error.

use thiserror::Error;

/// Reasons a claimed command stopped before running its action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// A group matched its own name but none of its children matched.
    #[error("cannot match any sub command of '{group}'")]
    NoSubcommandMatched { group: String },

    /// The token after a flagged command was `help`.
    ///
    /// This is a stop signal rather than a failure.
    #[error("help requested for '{command}'")]
    HelpRequested { command: String },

    /// A flagged command with required flags was invoked without any tokens.
    #[error("no flag set for '{command}'")]
    NoFlagSet { command: String },

    /// Parsing finished but some required flags are still empty.
    #[error("required flags not set for '{command}': {}", missing.join(", "))]
    RequiredFlagMissing {
        command: String,
        missing: Vec<String>,
    },
}

impl MatchError {
    /// Returns `true` for the help sentinel.
    pub fn is_help(&self) -> bool {
        matches!(self, MatchError::HelpRequested { .. })
    }

    /// Returns `true` when a required-flag check rejected the invocation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MatchError::NoFlagSet { .. } | MatchError::RequiredFlagMissing { .. }
        )
    }
}

/// Errors from the `-key value` flag-set parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagParseError {
    /// The flag name is not declared in the table.
    #[error("flag provided but not defined: -{0}")]
    UnknownFlag(String),

    /// The flag was the last token and has no value.
    #[error("flag needs an argument: -{0}")]
    MissingValue(String),

    /// The token looks like a flag but cannot be one (`---x`, `-=x`).
    #[error("bad flag syntax: {0}")]
    BadSyntax(String),
}

/// Convenience alias for matching results.
pub type Result<T> = std::result::Result<T, MatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_is_not_validation() {
        let err = MatchError::HelpRequested {
            command: "describe".to_string(),
        };
        assert!(err.is_help());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_required_flag_missing_lists_names() {
        let err = MatchError::RequiredFlagMissing {
            command: "create".to_string(),
            missing: vec!["name".to_string(), "factory_id".to_string()],
        };
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "required flags not set for 'create': name, factory_id"
        );
    }
}
