//! Listings printed while matching.
//!
//! Matching never writes to the terminal directly. Every listing goes through
//! a [`Presenter`] passed into dispatch, so embedding programs and tests pick
//! the sink and the color mode.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;
use tracing::debug;

use crate::dispatch::ADD_FLAGS_COMMAND;
use crate::extract::SideChannelFlags;
use crate::flags::FlagEntry;
use crate::node::{CommandNode, FlaggedCommand, HELP_TOKEN, Node};

const INDENT: &str = "   ";

/// Which flags a flag listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagListing {
    /// Every declared flag (the `help` path).
    All,
    /// Only required flags (validation failures).
    RequiredOnly,
}

/// Output capability used by the matcher and the dispatcher.
pub trait Presenter {
    /// Lists `commands` available under `owner` (a group or the program).
    /// The root listing also advertises the reserved `add_flags` command.
    fn available_commands(&mut self, owner: &str, commands: &[CommandNode], with_add_flags: bool);

    /// Lists the flags of a flagged command.
    fn flags(&mut self, command: &FlaggedCommand, listing: FlagListing);

    /// Lists side-channel flag declarations.
    fn side_channel_flags(&mut self, flags: &SideChannelFlags);

    /// Reports a program that declared no commands at all.
    fn no_commands(&mut self, program: &str);
}

#[derive(Debug, Clone, Copy)]
enum Style {
    CommandName,
    SubCommands,
    RequiredFlag,
    OptionalFlag,
    PositionalValue,
    Description,
}

/// Writes listings as colored text to any [`Write`] sink.
///
/// # Examples
///
/// ```
/// use cmdtree_core::{CommandNode, Presenter, TerminalPresenter};
///
/// let commands = vec![CommandNode::leaf("list", "List all factories", || {})];
/// let mut presenter = TerminalPresenter::new(Vec::new(), false);
/// presenter.available_commands("tcs", &commands, true);
///
/// let out = String::from_utf8(presenter.into_inner()).unwrap();
/// assert!(out.contains("   list - List all factories"));
/// assert!(out.contains("   add_flags - prints additional flags for all commands"));
/// ```
#[derive(Debug)]
pub struct TerminalPresenter<W: Write> {
    out: W,
    color: bool,
}

impl TerminalPresenter<io::Stdout> {
    /// Presenter on stdout, colored when stdout is a terminal.
    pub fn stdout() -> Self {
        let out = io::stdout();
        let color = out.is_terminal();
        Self { out, color }
    }
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if !self.color {
            return text.to_string();
        }
        let painted = match style {
            Style::CommandName => text.bright_white().bold(),
            Style::SubCommands => text.red().bold(),
            Style::RequiredFlag => text.bright_blue().bold(),
            Style::OptionalFlag => text.magenta().bold(),
            Style::PositionalValue => text.bright_green().bold(),
            Style::Description => text.white().italic(),
        };
        painted.to_string()
    }

    fn line(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{text}") {
            debug!(error = %err, "Failed to write listing");
        }
    }

    fn heading(&mut self, title: &str) {
        let title = self.paint(title, Style::CommandName);
        self.line("");
        self.line(&title);
        self.line("");
    }

    fn describe(&self, node: &CommandNode) -> String {
        let mut out = self.paint(&format!("{} ", node.name()), Style::CommandName);

        match node {
            CommandNode::Leaf(_) => {}
            CommandNode::Group(group) => {
                let names: Vec<&str> = group.children().iter().map(|c| c.name()).collect();
                out.push_str(&self.paint(&format!("({}) ", names.join("|")), Style::SubCommands));
            }
            CommandNode::Flagged(flagged) => {
                out.push_str(&self.paint(&format!("({HELP_TOKEN}|) "), Style::SubCommands));
                if let Some(positional) = flagged.positional() {
                    let placeholder = placeholder(positional);
                    out.push_str(&self.paint(&format!("{placeholder}/"), Style::PositionalValue));
                    out.push_str(&self.paint(
                        &format!("-{positional} {placeholder} "),
                        Style::RequiredFlag,
                    ));
                }
                let required: String = flagged
                    .declared_table()
                    .iter()
                    .filter(|(name, entry)| entry.required && Some(*name) != flagged.positional())
                    .map(|(name, _)| format!("-{name} {} ", placeholder(name)))
                    .collect();
                out.push_str(&self.paint(&required, Style::RequiredFlag));
            }
        }

        out.push_str(&self.paint(&format!("- {}", node.description()), Style::Description));
        out
    }

    fn flag_line(&self, name: &str, entry: &FlagEntry) -> String {
        if entry.required {
            self.paint(
                &format!("-{name} {} (required)", placeholder(name)),
                Style::RequiredFlag,
            )
        } else {
            self.paint(&format!("-{name} {}", placeholder(name)), Style::OptionalFlag)
        }
    }
}

fn placeholder(name: &str) -> String {
    format!("<{}>", name.to_uppercase())
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn available_commands(&mut self, owner: &str, commands: &[CommandNode], with_add_flags: bool) {
        self.heading(&format!("Available commands for {owner}:"));

        for command in commands {
            let line = self.describe(command);
            self.line(&format!("{INDENT}{line}"));
        }

        if with_add_flags {
            let name = self.paint(ADD_FLAGS_COMMAND, Style::CommandName);
            let description = self.paint(
                " - prints additional flags for all commands",
                Style::Description,
            );
            self.line(&format!("{INDENT}{name}{description}"));
        }

        self.line("");
    }

    fn flags(&mut self, command: &FlaggedCommand, listing: FlagListing) {
        let title = match listing {
            FlagListing::All => format!("Flags for {}:", command.name()),
            FlagListing::RequiredOnly => format!("Required flags for {}:", command.name()),
        };
        self.heading(&title);

        let table = command.declared_table();
        for (name, entry) in table.iter() {
            if entry.required || listing == FlagListing::All {
                let line = self.flag_line(name, entry);
                self.line(&format!("{INDENT}{line}"));
            }
        }

        self.line("");
    }

    fn side_channel_flags(&mut self, flags: &SideChannelFlags) {
        self.heading("Additional flags all commands:");

        for (name, description) in flags.iter() {
            let flag = self.paint(&format!("-{name} {} ", placeholder(name)), Style::RequiredFlag);
            let description = self.paint(&format!("- {description}"), Style::Description);
            self.line(&format!("{INDENT}{flag}{description}"));
        }

        self.line("");
    }

    fn no_commands(&mut self, _program: &str) {
        self.line("Error - program has no commands");
    }
}
