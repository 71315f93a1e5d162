//! Command forest matching and flag parsing for small command-line tools.
//!
//! This crate turns a program's argument vector into exactly one action call:
//!
//! - [`SideChannelFlags`]: global flags declared outside the tree, stripped
//!   from the argument vector before matching.
//! - [`CommandNode`]: a node of the command forest: a [`LeafCommand`] runs a
//!   zero-argument action, a [`GroupCommand`] dispatches to children, and a
//!   [`FlaggedCommand`] parses `-name value` flags into a [`FlagTable`].
//! - [`CommandHandler`]: root-level dispatch, including the reserved
//!   `add_flags` listing.
//! - [`Presenter`]: the injected output capability that receives listings
//!   (available commands, flags, side-channel flags).
//!
//! Validation ([`validate_tree`]) catches declaration mistakes such as
//! duplicate siblings and unparseable flag names.
//!
//! # Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use cmdtree_core::*;
//!
//! let requested = Rc::new(RefCell::new(None));
//! let sink = Rc::clone(&requested);
//!
//! let describe = FlaggedCommand::new("describe", "describes factory by factory_id", Vec::<FlagSpec>::new(), move |flags| {
//!     *sink.borrow_mut() = Some(flags.value("factory_id").to_string());
//! })
//! .with_positional("factory_id");
//!
//! let handler = CommandHandler::new(
//!     "tcs",
//!     vec![CommandNode::group(
//!         "flip",
//!         "manage your flip service",
//!         vec![CommandNode::group("factories", "manage factories", vec![describe.into()])],
//!     )],
//!     SideChannelFlags::new().declare("header_key", "additive http header key"),
//! );
//!
//! let raw: Vec<String> = ["tcs", "--header_key", "X-Trace", "flip", "factories", "describe", "f1"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let extracted = handler.side_channel().extract(&raw);
//! assert_eq!(extracted.value("header_key"), "X-Trace");
//!
//! let mut presenter = TerminalPresenter::new(Vec::new(), false);
//! assert_eq!(handler.parse_args(&extracted.argv, &mut presenter), Ok(Dispatch::Matched));
//! assert_eq!(requested.borrow().as_deref(), Some("f1"));
//! ```

mod dispatch;
mod error;
mod extract;
mod flags;
mod node;
mod present;
mod validate;

pub use dispatch::{ADD_FLAGS_COMMAND, CommandHandler, Dispatch, ROOT_DEPTH};
pub use error::{FlagParseError, MatchError, Result};
pub use extract::{Extracted, SideChannelFlags};
pub use flags::{FlagEntry, FlagSpec, FlagTable};
pub use node::{
    Action, CommandNode, FlaggedAction, FlaggedCommand, GroupCommand, HELP_TOKEN, LeafCommand,
    Node,
};
pub use present::{FlagListing, Presenter, TerminalPresenter};
pub use validate::{ValidationError, validate_tree};
