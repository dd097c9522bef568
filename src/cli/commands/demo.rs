//! Demo command implementation.
//!
//! `stepfs demo` walks through every built-in action in one strictly ordered
//! run inside a scratch directory.

use std::path::{Path, PathBuf};

use serde_json::json;

use crate::cli::args::DemoArgs;
use crate::config::{build_runner_from_steps, StepConfig};
use crate::error::Result;
use crate::fs::{ActionContext, Encoding, FsAction};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display::{release_watches, run_with_display};

/// Directory the demo runs in when `--dir` is not given.
pub const DEMO_DIR: &str = "stepfs-demo";

/// The demo command implementation.
pub struct DemoCommand {
    project_root: PathBuf,
    args: DemoArgs,
}

impl DemoCommand {
    /// Create a new demo command.
    pub fn new(project_root: &Path, args: DemoArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    fn demo_dir(&self) -> PathBuf {
        match &self.args.dir {
            Some(dir) => self.project_root.join(dir),
            None => self.project_root.join(DEMO_DIR),
        }
    }
}

impl Command for DemoCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let dir = self.demo_dir();
        std::fs::create_dir_all(&dir)?;

        let ctx = ActionContext::local(&dir);
        let runner = build_runner_from_steps(&demo_steps(), &ctx)?;

        if !self.args.json {
            ui.show_header(&format!("stepfs demo · {}", dir.display()));
        }
        run_with_display(&runner, ui, self.args.json)?;
        release_watches(&ctx, ui, self.args.json);

        // The demo deliberately reads a missing file, so a failed step is
        // part of a normal run.
        Ok(CommandResult::success())
    }
}

fn step(name: &str, action: FsAction) -> StepConfig {
    StepConfig {
        name: name.to_string(),
        description: None,
        depends_on_previous: true,
        action,
    }
}

fn independent(name: &str, action: FsAction) -> StepConfig {
    StepConfig {
        depends_on_previous: false,
        ..step(name, action)
    }
}

fn read(path: &str, encoding: Option<Encoding>) -> FsAction {
    FsAction::Read {
        path: path.into(),
        encoding,
        raw: false,
    }
}

/// The demonstration sequence.
///
/// Directory removal runs last so every read of `myFolder/notes.txt` sees
/// the file.
pub fn demo_steps() -> Vec<StepConfig> {
    let notes = "myFolder/notes.txt";
    vec![
        step(
            "write-file",
            FsAction::Write {
                path: "hello.txt".into(),
                content: "Hello, stepfs!".into(),
            },
        ),
        step("read-file", read("hello.txt", None)),
        step(
            "append-file",
            FsAction::Append {
                path: "hello.txt".into(),
                content: " Every step runs in order.".into(),
            },
        ),
        step(
            "check-exists",
            FsAction::Exists {
                path: "hello.txt".into(),
            },
        ),
        step(
            "rename-file",
            FsAction::Rename {
                from: "hello.txt".into(),
                to: "greeting.txt".into(),
            },
        ),
        step(
            "delete-file",
            FsAction::Delete {
                path: "greeting.txt".into(),
            },
        ),
        independent(
            "create-directory",
            FsAction::Mkdir {
                path: "myFolder".into(),
            },
        ),
        step(
            "write-in-directory",
            FsAction::Write {
                path: notes.into(),
                content: "This is a note.\nIt has two lines.".into(),
            },
        ),
        step(
            "list-directory",
            FsAction::List {
                path: "myFolder".into(),
            },
        ),
        step(
            "copy-file",
            FsAction::Copy {
                from: notes.into(),
                to: "backup.txt".into(),
            },
        ),
        independent(
            "seed-json",
            FsAction::WriteJson {
                path: "data.json".into(),
                value: json!({ "greeting": "hello", "items": [1, 2, 3] }),
            },
        ),
        step(
            "read-json",
            FsAction::ReadJson {
                path: "data.json".into(),
            },
        ),
        independent(
            "move-file",
            FsAction::Rename {
                from: "backup.txt".into(),
                to: "myFolder/backup.txt".into(),
            },
        ),
        independent(
            "write-json",
            FsAction::WriteJson {
                path: "user.json".into(),
                value: json!({ "name": "John", "age": 30 }),
            },
        ),
        independent("read-lines", FsAction::ReadLines { path: notes.into() }),
        step("watch-file", FsAction::Watch { path: notes.into() }),
        independent("read-missing", read("nonexistent.txt", None)),
        independent("read-with-encoding", read(notes, Some(Encoding::Utf8))),
        step("read-again", read(notes, None)),
        step(
            "delete-directory",
            FsAction::Rmdir {
                path: "myFolder".into(),
            },
        ),
    ]
}
