//! Built-in filesystem actions.
//!
//! Each [`FsAction`] performs exactly one filesystem side effect and resolves
//! it before returning, so it can be wrapped in a [`Step`] and sequenced by
//! the runner.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::steps::{ActionErrorKind, ActionResult, Step, StepActionError, StepOutput};

use super::driver::{FileSystem, LocalFileSystem};
use super::encoding::Encoding;
use super::lines::LineSource;
use super::watch::{FileWatcher, WatchEvent, WatchRegistry};

/// A single filesystem operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FsAction {
    /// Create or truncate a file.
    Write { path: PathBuf, content: String },
    /// Append text to a file.
    Append { path: PathBuf, content: String },
    /// Read a file, decoded as text unless `raw` is set.
    Read {
        path: PathBuf,
        #[serde(default)]
        encoding: Option<Encoding>,
        #[serde(default)]
        raw: bool,
    },
    /// Check whether a path exists.
    Exists { path: PathBuf },
    /// Rename or move a file.
    #[serde(alias = "move")]
    Rename { from: PathBuf, to: PathBuf },
    /// Delete a file.
    Delete { path: PathBuf },
    /// Create a directory and its parents.
    Mkdir { path: PathBuf },
    /// List a directory.
    List { path: PathBuf },
    /// Copy a file.
    Copy { from: PathBuf, to: PathBuf },
    /// Read and parse a JSON file.
    ReadJson { path: PathBuf },
    /// Serialize a value to a JSON file.
    WriteJson {
        path: PathBuf,
        value: serde_json::Value,
    },
    /// Read a file line by line.
    ReadLines { path: PathBuf },
    /// Register a change watch on a file.
    Watch { path: PathBuf },
    /// Delete a directory recursively.
    Rmdir { path: PathBuf },
}

/// Shared collaborators for built-in actions.
#[derive(Clone)]
pub struct ActionContext {
    fs: Arc<dyn FileSystem>,
    encoding: Encoding,
    watcher: FileWatcher,
    watches: WatchRegistry,
}

impl ActionContext {
    /// Create a context over the given driver.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            encoding: Encoding::default(),
            watcher: FileWatcher::default(),
            watches: WatchRegistry::new(),
        }
    }

    /// Create a context over the local disk rooted at `root`.
    pub fn local(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(LocalFileSystem::new(root)))
    }

    /// Set the default text encoding for reads.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Set the polling interval for watches.
    pub fn with_watch_interval(mut self, interval: Duration) -> Self {
        self.watcher = FileWatcher::new(interval);
        self
    }

    /// Use a caller-owned registry for watch handles.
    pub fn with_watches(mut self, watches: WatchRegistry) -> Self {
        self.watches = watches;
        self
    }

    /// Filesystem driver.
    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// Registry holding watches started by this context.
    pub fn watches(&self) -> &WatchRegistry {
        &self.watches
    }
}

impl FsAction {
    /// Compact notation for this action, e.g. `write:hello.txt=Hello`.
    pub fn notation(&self) -> String {
        match self {
            FsAction::Write { path, content } => format!("write:{}={}", path.display(), content),
            FsAction::Append { path, content } => {
                format!("append:{}={}", path.display(), content)
            }
            FsAction::Read { path, encoding, raw } => match (raw, encoding) {
                (true, _) => format!("read-raw:{}", path.display()),
                (false, Some(enc)) => format!("read:{}@{}", path.display(), enc),
                (false, None) => format!("read:{}", path.display()),
            },
            FsAction::Exists { path } => format!("exists:{}", path.display()),
            FsAction::Rename { from, to } => {
                format!("rename:{}->{}", from.display(), to.display())
            }
            FsAction::Delete { path } => format!("delete:{}", path.display()),
            FsAction::Mkdir { path } => format!("mkdir:{}", path.display()),
            FsAction::List { path } => format!("list:{}", path.display()),
            FsAction::Copy { from, to } => format!("copy:{}->{}", from.display(), to.display()),
            FsAction::ReadJson { path } => format!("read-json:{}", path.display()),
            FsAction::WriteJson { path, value } => {
                format!("write-json:{}={}", path.display(), value)
            }
            FsAction::ReadLines { path } => format!("lines:{}", path.display()),
            FsAction::Watch { path } => format!("watch:{}", path.display()),
            FsAction::Rmdir { path } => format!("rmdir:{}", path.display()),
        }
    }

    /// Paths this action touches.
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            FsAction::Rename { from, to } | FsAction::Copy { from, to } => {
                vec![from.as_path(), to.as_path()]
            }
            FsAction::Write { path, .. }
            | FsAction::Append { path, .. }
            | FsAction::Read { path, .. }
            | FsAction::Exists { path }
            | FsAction::Delete { path }
            | FsAction::Mkdir { path }
            | FsAction::List { path }
            | FsAction::ReadJson { path }
            | FsAction::WriteJson { path, .. }
            | FsAction::ReadLines { path }
            | FsAction::Watch { path }
            | FsAction::Rmdir { path } => vec![path.as_path()],
        }
    }

    /// Perform the action, blocking until its side effect has resolved.
    pub fn perform(&self, ctx: &ActionContext) -> ActionResult {
        let fs = ctx.fs.as_ref();
        match self {
            FsAction::Write { path, content } => {
                fs.write(path, content.as_bytes())?;
                Ok(StepOutput::Nothing)
            }
            FsAction::Append { path, content } => {
                fs.append(path, content.as_bytes())?;
                Ok(StepOutput::Nothing)
            }
            FsAction::Read { path, encoding, raw } => {
                let bytes = fs.read(path)?;
                if *raw {
                    return Ok(StepOutput::Bytes(bytes));
                }
                let text = encoding.unwrap_or(ctx.encoding).decode(&bytes)?;
                Ok(StepOutput::Text(text))
            }
            FsAction::Exists { path } => Ok(StepOutput::Exists(fs.exists(path))),
            FsAction::Rename { from, to } => {
                fs.rename(from, to)?;
                Ok(StepOutput::Nothing)
            }
            FsAction::Delete { path } => {
                fs.remove_file(path)?;
                Ok(StepOutput::Nothing)
            }
            FsAction::Mkdir { path } => {
                fs.create_dir(path)?;
                Ok(StepOutput::Nothing)
            }
            FsAction::List { path } => Ok(StepOutput::Listing(fs.list_dir(path)?)),
            FsAction::Copy { from, to } => {
                fs.copy(from, to)?;
                Ok(StepOutput::Nothing)
            }
            FsAction::ReadJson { path } => {
                let bytes = fs.read(path)?;
                Ok(StepOutput::Json(serde_json::from_slice(&bytes)?))
            }
            FsAction::WriteJson { path, value } => {
                fs.write(path, &serde_json::to_vec(value)?)?;
                Ok(StepOutput::Nothing)
            }
            FsAction::ReadLines { path } => {
                let source = LineSource::new(Arc::clone(&ctx.fs), path);
                Ok(StepOutput::Lines(source.collect()?))
            }
            FsAction::Watch { path } => {
                let handle = ctx
                    .watcher
                    .watch(Arc::clone(&ctx.fs), path, log_change)
                    .map_err(|e| {
                        StepActionError::new(
                            ActionErrorKind::Watch,
                            format!("cannot watch {}: {}", fs.resolve(path).display(), e),
                        )
                    })?;
                ctx.watches.add(handle);
                Ok(StepOutput::Watching(path.clone()))
            }
            FsAction::Rmdir { path } => {
                fs.remove_dir(path)?;
                Ok(StepOutput::Nothing)
            }
        }
    }

    /// Wrap this action in a step named `name`.
    pub fn into_step(self, name: impl Into<String>, ctx: &ActionContext) -> Step {
        let ctx = ctx.clone();
        let description = self.notation();
        Step::new(name, move || self.perform(&ctx)).with_description(description)
    }
}

fn log_change(event: WatchEvent) {
    info!("{} changed ({} bytes)", event.path.display(), event.current.len);
}
