//! Command-line interface for stepfs.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, DemoArgs, ExecArgs, RunArgs, WriteArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
