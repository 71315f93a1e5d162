//! Cloud service command-line tool built on [`cmdtree_core`].
//!
//! - [`commands`]: the `tcs` command forest generated from [`catalog`].
//! - [`request`]: flag tables to service requests, including paging.
//! - [`service`]: the [`CloudService`](service::CloudService) boundary and
//!   its dry-run implementation.
//! - [`render`]: table and JSON result renderers.
//! - [`config`]: persisted credentials and presentation settings.

pub mod app;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;
pub mod request;
pub mod service;

pub use error::{CliError, Result};
