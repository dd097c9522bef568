//! Plan validation.

use std::collections::HashSet;

use crate::config::schema::PlanConfig;
use crate::error::{Result, StepfsError};

/// Check a plan for problems the schema cannot express.
///
/// All problems are reported together.
pub fn validate(plan: &PlanConfig) -> Result<()> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, step) in plan.steps.iter().enumerate() {
        if step.name.trim().is_empty() {
            errors.push(format!("step #{} has an empty name", index + 1));
        } else if !seen.insert(step.name.as_str()) {
            errors.push(format!("step '{}' is defined more than once", step.name));
        }

        if step
            .action
            .paths()
            .iter()
            .any(|p| p.as_os_str().is_empty())
        {
            errors.push(format!("step '{}' has an empty path", step.name));
        }
    }

    if plan.settings.watch_interval_ms == 0 {
        errors.push("settings.watch_interval_ms must be greater than zero".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StepfsError::PlanValidationError {
            message: errors.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_plan;
    use std::path::Path;

    fn plan(yaml: &str) -> PlanConfig {
        parse_plan(yaml, Path::new("test.yml")).unwrap()
    }

    #[test]
    fn valid_plan_passes() {
        let p = plan(
            r#"
steps:
  - { name: a, action: mkdir, path: dir }
  - { name: b, action: list, path: dir }
"#,
        );
        assert!(validate(&p).is_ok());
    }

    #[test]
    fn empty_plan_passes() {
        assert!(validate(&PlanConfig::default()).is_ok());
    }

    #[test]
    fn duplicate_names_fail() {
        let p = plan(
            r#"
steps:
  - { name: a, action: mkdir, path: dir }
  - { name: a, action: list, path: dir }
"#,
        );
        let err = validate(&p).unwrap_err();
        assert!(err.to_string().contains("'a' is defined more than once"));
    }

    #[test]
    fn empty_name_and_path_fail_together() {
        let p = plan(
            r#"
steps:
  - { name: "", action: delete, path: x }
  - { name: b, action: delete, path: "" }
"#,
        );
        let msg = validate(&p).unwrap_err().to_string();
        assert!(msg.contains("empty name"));
        assert!(msg.contains("'b' has an empty path"));
    }

    #[test]
    fn zero_watch_interval_fails() {
        let p = plan("settings: { watch_interval_ms: 0 }");
        assert!(validate(&p).is_err());
    }
}
