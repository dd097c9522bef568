//! stepfs - Run filesystem steps in strict order and report every outcome.
//!
//! Steps are registered on a [`runner::StepRunner`] and executed one at a
//! time. Each step's side effect finishes before the next begins, a failure
//! skips the step right after it unless that step is independent, and every
//! outcome lands in a [`steps::RunReport`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Plan loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`fs`] - Filesystem driver and built-in actions
//! - [`runner`] - Sequenced step execution
//! - [`steps`] - Step, result, and report types
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use stepfs::fs::{ActionContext, FsAction};
//! use stepfs::runner::StepRunner;
//! use stepfs::steps::{StepOutput, StepStatus};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let ctx = ActionContext::local(temp.path());
//!
//! let mut runner = StepRunner::new();
//! runner
//!     .register(FsAction::Write { path: "a.txt".into(), content: "Hi".into() }.into_step("write", &ctx))
//!     .unwrap();
//! runner
//!     .register(FsAction::Read { path: "a.txt".into(), encoding: None, raw: false }.into_step("read", &ctx))
//!     .unwrap();
//!
//! let report = runner.run().unwrap();
//! assert_eq!(report.statuses(), vec![StepStatus::Completed, StepStatus::Completed]);
//! assert_eq!(report.get("read").unwrap().output, Some(StepOutput::Text("Hi".into())));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod runner;
pub mod steps;
pub mod ui;

pub use error::{Result, StepfsError};
