//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands that run
//! steps share their rendering through [`display`].

pub mod completions;
pub mod demo;
pub mod dispatcher;
pub mod display;
pub mod exec;
pub mod run;
pub mod write;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
