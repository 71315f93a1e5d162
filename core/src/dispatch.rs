//! Root-level dispatch over a command forest.

use tracing::debug;

use crate::error::Result;
use crate::extract::SideChannelFlags;
use crate::node::{CommandNode, Node};
use crate::present::Presenter;

/// Reserved top-level command that lists the side-channel flags.
pub const ADD_FLAGS_COMMAND: &str = "add_flags";

/// Index of the first command token; `argv[0]` is the program name.
pub const ROOT_DEPTH: usize = 1;

/// What the dispatcher did with an argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A command matched and its action ran.
    Matched,
    /// `add_flags` was requested; side-channel flags were listed.
    SideChannelListing,
    /// Nothing matched; the full command listing was printed.
    CommandListing,
    /// Nothing matched and the program declares no commands.
    NoCommands,
}

/// Owns the top-level forest and the side-channel declarations.
#[derive(Debug)]
pub struct CommandHandler {
    program_name: String,
    commands: Vec<CommandNode>,
    side_channel: SideChannelFlags,
}

impl CommandHandler {
    pub fn new(program_name: &str, commands: Vec<CommandNode>, side_channel: SideChannelFlags) -> Self {
        Self {
            program_name: program_name.to_string(),
            commands,
            side_channel,
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn commands(&self) -> &[CommandNode] {
        &self.commands
    }

    pub fn side_channel(&self) -> &SideChannelFlags {
        &self.side_channel
    }

    /// Matches an (already side-channel-stripped) argument vector.
    ///
    /// Top-level commands are tried in declaration order and the first one
    /// that claims `argv[1]` decides the outcome. When nothing claims it, the
    /// command listing is printed and `Ok` is returned.
    ///
    /// # Errors
    ///
    /// Propagates the [`MatchError`](crate::MatchError) of the command that
    /// claimed the position, including the help sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use cmdtree_core::{CommandHandler, CommandNode, Dispatch, SideChannelFlags, TerminalPresenter};
    ///
    /// let handler = CommandHandler::new(
    ///     "tcs",
    ///     vec![CommandNode::leaf("version", "prints the version", || {})],
    ///     SideChannelFlags::new(),
    /// );
    /// let mut presenter = TerminalPresenter::new(Vec::new(), false);
    ///
    /// let argv = vec!["tcs".to_string(), "version".to_string()];
    /// assert_eq!(handler.parse_args(&argv, &mut presenter), Ok(Dispatch::Matched));
    ///
    /// let argv = vec!["tcs".to_string(), "bogus".to_string()];
    /// assert_eq!(handler.parse_args(&argv, &mut presenter), Ok(Dispatch::CommandListing));
    /// ```
    pub fn parse_args(&self, argv: &[String], presenter: &mut dyn Presenter) -> Result<Dispatch> {
        if argv.get(ROOT_DEPTH).is_some_and(|token| token == ADD_FLAGS_COMMAND) {
            presenter.side_channel_flags(&self.side_channel);
            return Ok(Dispatch::SideChannelListing);
        }

        for command in &self.commands {
            if command.try_match(argv, ROOT_DEPTH, presenter)? {
                return Ok(Dispatch::Matched);
            }
        }

        debug!(program = %self.program_name, argv = ?argv, "No command matched");
        if self.commands.is_empty() {
            presenter.no_commands(&self.program_name);
            return Ok(Dispatch::NoCommands);
        }

        presenter.available_commands(&self.program_name, &self.commands, true);
        Ok(Dispatch::CommandListing)
    }
}
