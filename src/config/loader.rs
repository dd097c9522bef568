//! Plan file discovery and loading.

use crate::config::schema::PlanConfig;
use crate::error::{Result, StepfsError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default plan file name at the project root.
pub const PLAN_FILE: &str = "stepfs.yml";

/// Plan locations for a project, in lookup order.
///
/// 1. `stepfs.yml`
/// 2. `.stepfs/plan.yml`
#[derive(Debug, Clone)]
pub struct PlanPaths {
    /// Plan file at the project root.
    pub root_file: Option<PathBuf>,

    /// Plan file in the `.stepfs` directory.
    pub dot_dir: Option<PathBuf>,
}

impl PlanPaths {
    /// Discover plan files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            root_file: existing(project_root.join(PLAN_FILE)),
            dot_dir: existing(project_root.join(".stepfs").join("plan.yml")),
        }
    }

    /// The plan that will be used, if any.
    pub fn first(&self) -> Option<&PathBuf> {
        self.root_file.as_ref().or(self.dot_dir.as_ref())
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single plan file.
///
/// # Errors
///
/// Returns `PlanNotFound` if the file doesn't exist.
/// Returns `PlanParseError` if the YAML is invalid.
pub fn load_plan_file(path: &Path) -> Result<PlanConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StepfsError::PlanNotFound {
                path: path.to_path_buf(),
            }
        } else {
            StepfsError::Io(e)
        }
    })?;

    parse_plan(&content, path)
}

/// Parse YAML content into a plan.
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_plan(content: &str, source_path: &Path) -> Result<PlanConfig> {
    serde_yaml::from_str(content).map_err(|e| StepfsError::PlanParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a plan with optional path override.
///
/// If `plan_override` is given, that file is loaded. Otherwise the first
/// discovered plan is used.
pub fn load_plan(project_root: &Path, plan_override: Option<&Path>) -> Result<PlanConfig> {
    if let Some(path) = plan_override {
        return load_plan_file(path);
    }

    let paths = PlanPaths::discover(project_root);
    match paths.first() {
        Some(path) => load_plan_file(path),
        None => Err(StepfsError::PlanNotFound {
            path: project_root.join(PLAN_FILE),
        }),
    }
}
