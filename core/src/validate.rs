//! Command forest validation.
//!
//! Construction never fails; these checks catch declaration mistakes such as
//! duplicate sibling names, flags that could never be parsed, or shadowing
//! the reserved `add_flags` command.
//!
//! # Examples
//!
//! ```
//! use cmdtree_core::*;
//!
//! let forest = vec![CommandNode::group(
//!     "flip",
//!     "manage your flip service",
//!     vec![CommandNode::leaf("list", "", || {})],
//! )];
//! assert!(validate_tree(&forest).is_empty());
//!
//! // Invalid: two siblings with the same name
//! let forest = vec![
//!     CommandNode::leaf("list", "", || {}),
//!     CommandNode::leaf("list", "", || {}),
//! ];
//! assert_eq!(validate_tree(&forest), vec![ValidationError::DuplicateCommand("list".into())]);
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::dispatch::ADD_FLAGS_COMMAND;
use crate::flags::FlagSpec;
use crate::node::{CommandNode, Node};

/// Declaration problems found in a command forest.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A node name is empty or whitespace-only.
    #[error("command name cannot be empty (under '{0}')")]
    EmptyCommandName(String),
    /// Two siblings share a name; only the first could ever match.
    #[error("duplicate command in scope: {0}")]
    DuplicateCommand(String),
    /// A top-level command uses the reserved `add_flags` name.
    #[error("'{0}' is reserved and cannot be declared as a command")]
    ReservedCommandName(String),
    /// A group has no children and can only ever fail.
    #[error("group has no sub commands: {0}")]
    EmptyGroup(String),
    /// A flag name is empty.
    #[error("empty flag name in command: {0}")]
    EmptyFlagName(String),
    /// A flag name starts with a dash and could never be parsed.
    #[error("invalid flag name '{flag}' in command: {command}")]
    InvalidFlagName { command: String, flag: String },
    /// Two flags of one command share a name.
    #[error("duplicate flag '{flag}' in command: {command}")]
    DuplicateFlag { command: String, flag: String },
}

/// Validates a top-level command forest.
///
/// Stops at the first problem found in a scope, reporting paths as
/// space-separated command names (e.g. `flip videos list`).
pub fn validate_tree(commands: &[CommandNode]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if commands.iter().any(|c| c.name() == ADD_FLAGS_COMMAND) {
        errors.push(ValidationError::ReservedCommandName(
            ADD_FLAGS_COMMAND.to_string(),
        ));
        return errors;
    }

    let mut path = Vec::new();
    errors.extend(validate_siblings(commands, &mut path));
    errors
}

fn validate_siblings(commands: &[CommandNode], path: &mut Vec<String>) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for command in commands {
        let name = command.name();
        if name.trim().is_empty() {
            errors.push(ValidationError::EmptyCommandName(path.join(" ")));
            return errors;
        }

        path.push(name.to_string());
        let full_path = path.join(" ");

        if !seen.insert(name) {
            errors.push(ValidationError::DuplicateCommand(full_path));
            return errors;
        }

        match command {
            CommandNode::Leaf(_) => {}
            CommandNode::Group(group) => {
                if group.children().is_empty() {
                    errors.push(ValidationError::EmptyGroup(full_path));
                    return errors;
                }
                errors.extend(validate_siblings(group.children(), path));
            }
            CommandNode::Flagged(flagged) => {
                errors.extend(validate_flags(&full_path, flagged.flags()));
            }
        }

        path.pop();
        if !errors.is_empty() {
            return errors;
        }
    }

    errors
}

fn validate_flags(command: &str, flags: &[FlagSpec]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for flag in flags {
        if flag.name.is_empty() {
            errors.push(ValidationError::EmptyFlagName(command.to_string()));
            return errors;
        }
        if flag.name.starts_with('-') || flag.name.contains('=') {
            errors.push(ValidationError::InvalidFlagName {
                command: command.to_string(),
                flag: flag.name.clone(),
            });
            return errors;
        }
        if !seen.insert(flag.name.as_str()) {
            errors.push(ValidationError::DuplicateFlag {
                command: command.to_string(),
                flag: flag.name.clone(),
            });
            return errors;
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{FlaggedCommand, LeafCommand};

    fn flagged(name: &str, flags: Vec<FlagSpec>) -> CommandNode {
        FlaggedCommand::new(name, "", flags, |_| {}).into()
    }

    #[test]
    fn test_validate_rejects_reserved_name() {
        let forest = vec![LeafCommand::new(ADD_FLAGS_COMMAND, "").into()];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::ReservedCommandName("add_flags".to_string())]
        );
    }

    #[test]
    fn test_validate_reports_nested_duplicate_path() {
        let forest = vec![CommandNode::group(
            "flip",
            "",
            vec![CommandNode::group(
                "videos",
                "",
                vec![
                    LeafCommand::new("list", "").into(),
                    flagged("list", vec![]),
                ],
            )],
        )];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::DuplicateCommand("flip videos list".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_empty_group() {
        let forest = vec![CommandNode::group("tts", "", vec![])];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::EmptyGroup("tts".to_string())]
        );
    }

    #[test]
    fn test_validate_rejects_dashed_flag() {
        let forest = vec![flagged("create", vec![FlagSpec::optional("-name")])];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::InvalidFlagName {
                command: "create".to_string(),
                flag: "-name".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_rejects_duplicate_flag() {
        let forest = vec![flagged(
            "create",
            vec![FlagSpec::optional("name"), FlagSpec::required("name")],
        )];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::DuplicateFlag {
                command: "create".to_string(),
                flag: "name".to_string(),
            }]
        );
    }

    #[test]
    fn test_positional_upgrade_is_not_a_duplicate() {
        let forest = vec![CommandNode::from(
            FlaggedCommand::new("describe", "", [FlagSpec::optional("id")], |_| {})
                .with_positional("id"),
        )];
        assert!(validate_tree(&forest).is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let forest = vec![CommandNode::group(
            "flip",
            "",
            vec![LeafCommand::new(" ", "").into()],
        )];
        assert_eq!(
            validate_tree(&forest),
            vec![ValidationError::EmptyCommandName("flip".to_string())]
        );
    }
}
