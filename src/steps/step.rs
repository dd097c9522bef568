//! Step definitions.

use std::fmt;

use super::result::{StepActionError, StepOutput};

/// Outcome of invoking a step's action.
pub type ActionResult = std::result::Result<StepOutput, StepActionError>;

/// A step's action: performs one filesystem side effect and resolves it.
///
/// However the action works internally (blocking call, background thread,
/// polling), it must return only once that side effect has fully resolved.
pub type StepAction = dyn Fn() -> ActionResult + Send + Sync;

/// A named unit of work, immutable once built.
pub struct Step {
    name: String,
    description: Option<String>,
    depends_on_previous: bool,
    action: Box<StepAction>,
}

impl Step {
    /// Create a step that is skipped when the previous step failed.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn() -> ActionResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            depends_on_previous: true,
            action: Box::new(action),
        }
    }

    /// Set whether a failed previous step skips this one.
    pub fn depends_on_previous(mut self, depends: bool) -> Self {
        self.depends_on_previous = depends;
        self
    }

    /// Run this step even when the previous step failed.
    pub fn independent(self) -> Self {
        self.depends_on_previous(false)
    }

    /// Attach a description for display.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Step name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether a failed previous step skips this one.
    pub fn is_dependent(&self) -> bool {
        self.depends_on_previous
    }

    pub(crate) fn invoke(&self) -> ActionResult {
        (self.action)()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("depends_on_previous", &self.depends_on_previous)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_step_depends_on_previous_by_default() {
        let step = Step::new("noop", || Ok(StepOutput::Nothing));
        assert_eq!(step.name(), "noop");
        assert!(step.is_dependent());
        assert!(step.description().is_none());
    }

    #[test]
    fn independent_clears_dependency() {
        let step = Step::new("noop", || Ok(StepOutput::Nothing)).independent();
        assert!(!step.is_dependent());
    }

    #[test]
    fn invoke_calls_action() {
        let step = Step::new("text", || Ok(StepOutput::Text("hi".into())));
        assert_eq!(step.invoke().unwrap(), StepOutput::Text("hi".into()));
    }

    #[test]
    fn debug_omits_action() {
        let step = Step::new("noop", || Ok(StepOutput::Nothing)).with_description("does nothing");
        let debug = format!("{:?}", step);
        assert!(debug.contains("noop"));
        assert!(debug.contains("does nothing"));
    }
}
