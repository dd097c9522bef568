//! Filesystem actions and the collaborators they are built on.
//!
//! - [`FileSystem`] / [`LocalFileSystem`] - the storage driver
//! - [`Encoding`] - text decoding
//! - [`LineSource`] - restartable line splitting
//! - [`FileWatcher`] / [`WatchRegistry`] - polling change notification
//! - [`FsAction`] - the built-in one-side-effect actions
//!
//! # Example
//!
//! ```
//! use stepfs::fs::{ActionContext, FsAction};
//! use stepfs::steps::StepOutput;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let ctx = ActionContext::local(temp.path());
//!
//! FsAction::Write { path: "hello.txt".into(), content: "Hello".into() }
//!     .perform(&ctx)
//!     .unwrap();
//! let out = FsAction::Read { path: "hello.txt".into(), encoding: None, raw: false }
//!     .perform(&ctx)
//!     .unwrap();
//! assert_eq!(out, StepOutput::Text("Hello".into()));
//! ```

pub mod action;
pub mod driver;
pub mod encoding;
pub mod lines;
pub mod watch;

pub use action::{ActionContext, FsAction};
pub use driver::{FileSystem, LocalFileSystem};
pub use encoding::Encoding;
pub use lines::{LineSource, Lines};
pub use watch::{
    FileStamp, FileWatcher, WatchEvent, WatchHandle, WatchRegistry, DEFAULT_WATCH_INTERVAL,
};
