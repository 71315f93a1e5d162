//! Command tree nodes and the recursive matcher.
//!
//! A forest of [`CommandNode`]s is built once at start-up. Matching walks the
//! argument vector depth-first: each node looks at `argv[depth]`, and groups
//! hand `depth + 1` to their children in declaration order.

use std::fmt;

use tracing::debug;

use crate::error::{MatchError, Result};
use crate::flags::{FlagSpec, FlagTable};
use crate::present::{FlagListing, Presenter};

/// Token that turns a flagged command into a flag listing.
pub const HELP_TOKEN: &str = "help";

/// Action bound to a [`LeafCommand`].
pub type Action = Box<dyn Fn()>;

/// Action bound to a [`FlaggedCommand`]; receives the resolved table.
pub type FlaggedAction = Box<dyn Fn(FlagTable)>;

/// Capability shared by every node variant.
pub trait Node {
    /// Name matched against one argument position. Unique among siblings.
    fn name(&self) -> &str;

    /// Human-readable description, used only for listings.
    fn description(&self) -> &str;

    /// Tries to resolve `argv` starting at `argv[depth]`.
    ///
    /// `Ok(false)` means the position does not belong to this node and the
    /// caller should try the next sibling. `Ok(true)` means the node matched
    /// and its action ran. `Err` means the node matched its name but stopped
    /// before running an action; listings have already gone to `presenter`.
    fn try_match(&self, argv: &[String], depth: usize, presenter: &mut dyn Presenter)
    -> Result<bool>;
}

fn is_named(argv: &[String], depth: usize, name: &str) -> bool {
    argv.get(depth).is_some_and(|token| token == name)
}

/// Command that runs a zero-argument action.
pub struct LeafCommand {
    name: String,
    description: String,
    action: Option<Action>,
}

impl LeafCommand {
    /// Creates a leaf without an action; matching it is a no-op.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            action: None,
        }
    }

    pub fn with_action(mut self, action: impl Fn() + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }
}

impl Node for LeafCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn try_match(&self, argv: &[String], depth: usize, _: &mut dyn Presenter) -> Result<bool> {
        if !is_named(argv, depth, &self.name) {
            return Ok(false);
        }

        debug!(command = %self.name, depth, "Matched command");
        if let Some(action) = &self.action {
            action();
        }
        Ok(true)
    }
}

/// Command that only dispatches to its children.
pub struct GroupCommand {
    name: String,
    description: String,
    children: Vec<CommandNode>,
}

impl GroupCommand {
    pub fn new(name: &str, description: &str, children: Vec<CommandNode>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            children,
        }
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }
}

impl Node for GroupCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn try_match(
        &self,
        argv: &[String],
        depth: usize,
        presenter: &mut dyn Presenter,
    ) -> Result<bool> {
        if !is_named(argv, depth, &self.name) {
            return Ok(false);
        }

        for child in &self.children {
            match child.try_match(argv, depth + 1, presenter) {
                Ok(false) => continue,
                resolved => return resolved,
            }
        }

        debug!(group = %self.name, depth, "No sub command matched");
        presenter.available_commands(&self.name, &self.children, false);
        Err(MatchError::NoSubcommandMatched {
            group: self.name.clone(),
        })
    }
}

/// Command that parses named string flags before running its action.
///
/// An optional *positional* flag may be given as the bare token right after
/// the command name instead of `-name value`. The positional flag is always
/// required.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use cmdtree_core::{FlagSpec, FlaggedCommand, Node, TerminalPresenter};
///
/// let seen = Rc::new(RefCell::new(String::new()));
/// let sink = Rc::clone(&seen);
/// let describe = FlaggedCommand::new(
///     "describe",
///     "describes a video",
///     [FlagSpec::required("factory_id")],
///     move |flags| *sink.borrow_mut() = format!("{}/{}", flags.value("factory_id"), flags.value("video_id")),
/// )
/// .with_positional("video_id");
///
/// let argv: Vec<String> = ["tcs", "describe", "v1", "-factory_id", "f1"]
///     .iter()
///     .map(|s| s.to_string())
///     .collect();
/// let mut presenter = TerminalPresenter::new(Vec::new(), false);
///
/// assert_eq!(describe.try_match(&argv, 1, &mut presenter), Ok(true));
/// assert_eq!(*seen.borrow(), "f1/v1");
/// ```
pub struct FlaggedCommand {
    name: String,
    description: String,
    positional: Option<String>,
    flags: Vec<FlagSpec>,
    action: FlaggedAction,
}

impl FlaggedCommand {
    pub fn new(
        name: &str,
        description: &str,
        flags: impl IntoIterator<Item = FlagSpec>,
        action: impl Fn(FlagTable) + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            positional: None,
            flags: flags.into_iter().collect(),
            action: Box::new(action),
        }
    }

    /// Declares `name` as the positional flag, adding it as required if it
    /// was not declared yet and upgrading it to required otherwise.
    pub fn with_positional(mut self, name: &str) -> Self {
        match self.flags.iter_mut().find(|spec| spec.name == name) {
            Some(spec) => spec.required = true,
            None => self.flags.push(FlagSpec::required(name)),
        }
        self.positional = Some(name.to_string());
        self
    }

    pub fn positional(&self) -> Option<&str> {
        self.positional.as_deref()
    }

    pub fn flags(&self) -> &[FlagSpec] {
        &self.flags
    }

    /// A fresh, all-empty table for one invocation.
    pub fn declared_table(&self) -> FlagTable {
        FlagTable::from_specs(&self.flags)
    }
}

impl Node for FlaggedCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn try_match(
        &self,
        argv: &[String],
        depth: usize,
        presenter: &mut dyn Presenter,
    ) -> Result<bool> {
        if !is_named(argv, depth, &self.name) {
            return Ok(false);
        }

        let mut table = self.declared_table();

        let Some(next) = argv.get(depth + 1) else {
            if table.any_required() {
                presenter.flags(self, FlagListing::RequiredOnly);
                return Err(MatchError::NoFlagSet {
                    command: self.name.clone(),
                });
            }
            debug!(command = %self.name, depth, "Matched flagged command without flags");
            (self.action)(table);
            return Ok(true);
        };

        if next == HELP_TOKEN {
            presenter.flags(self, FlagListing::All);
            return Err(MatchError::HelpRequested {
                command: self.name.clone(),
            });
        }

        // A bare token after the name is always consumed, bound or not.
        let mut cursor = depth + 1;
        if !next.starts_with('-') {
            if let Some(positional) = &self.positional {
                table.set(positional, next.clone());
            }
            cursor += 1;
        }

        if let Some(rest) = argv.get(cursor..).filter(|rest| !rest.is_empty()) {
            match table.parse(rest) {
                Ok(consumed) if consumed < rest.len() => {
                    debug!(command = %self.name, ignored = ?&rest[consumed..], "Ignoring trailing arguments");
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(command = %self.name, error = %err, "Ignoring flag parse error");
                }
            }
        }

        let missing = table.missing_required();
        if !missing.is_empty() {
            presenter.flags(self, FlagListing::RequiredOnly);
            return Err(MatchError::RequiredFlagMissing {
                command: self.name.clone(),
                missing,
            });
        }

        debug!(command = %self.name, depth, "Matched flagged command");
        (self.action)(table);
        Ok(true)
    }
}

/// One node of the command forest.
pub enum CommandNode {
    Leaf(LeafCommand),
    Group(GroupCommand),
    Flagged(FlaggedCommand),
}

impl CommandNode {
    /// Leaf bound to `action`.
    pub fn leaf(name: &str, description: &str, action: impl Fn() + 'static) -> Self {
        Self::Leaf(LeafCommand::new(name, description).with_action(action))
    }

    /// Group dispatching to `children` in the given order.
    pub fn group(name: &str, description: &str, children: Vec<CommandNode>) -> Self {
        Self::Group(GroupCommand::new(name, description, children))
    }

    fn as_node(&self) -> &dyn Node {
        match self {
            CommandNode::Leaf(leaf) => leaf,
            CommandNode::Group(group) => group,
            CommandNode::Flagged(flagged) => flagged,
        }
    }
}

impl Node for CommandNode {
    fn name(&self) -> &str {
        self.as_node().name()
    }

    fn description(&self) -> &str {
        self.as_node().description()
    }

    fn try_match(
        &self,
        argv: &[String],
        depth: usize,
        presenter: &mut dyn Presenter,
    ) -> Result<bool> {
        self.as_node().try_match(argv, depth, presenter)
    }
}

impl From<LeafCommand> for CommandNode {
    fn from(leaf: LeafCommand) -> Self {
        CommandNode::Leaf(leaf)
    }
}

impl From<GroupCommand> for CommandNode {
    fn from(group: GroupCommand) -> Self {
        CommandNode::Group(group)
    }
}

impl From<FlaggedCommand> for CommandNode {
    fn from(flagged: FlaggedCommand) -> Self {
        CommandNode::Flagged(flagged)
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandNode::Leaf(leaf) => f
                .debug_struct("Leaf")
                .field("name", &leaf.name)
                .field("has_action", &leaf.action.is_some())
                .finish(),
            CommandNode::Group(group) => f
                .debug_struct("Group")
                .field("name", &group.name)
                .field("children", &group.children)
                .finish(),
            CommandNode::Flagged(flagged) => f
                .debug_struct("Flagged")
                .field("name", &flagged.name)
                .field("positional", &flagged.positional)
                .field("flags", &flagged.flags)
                .finish_non_exhaustive(),
        }
    }
}
