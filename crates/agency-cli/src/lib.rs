//! Agency CLI
//!
//! Library half of the `agency` binary: argument parsing, configuration,
//! logging setup and the subcommands themselves. Commands write to any
//! [`std::io::Write`] so they can be exercised without a terminal.

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
mod render;

pub use cli::{Cli, Invocation, ListArgs};
pub use commands::{run, Status};
pub use config::{AgencyConfig, ConfigError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
