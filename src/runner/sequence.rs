//! Sequenced step execution.

use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{Result, StepfsError};
use crate::steps::{
    ActionErrorKind, ActionResult, RunReport, Step, StepActionError, StepResult, StepStatus,
};

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to start.
    StepStarting {
        name: &'a str,
        description: Option<&'a str>,
        index: usize,
        total: usize,
    },
    /// A step's action resolved.
    StepFinished {
        name: &'a str,
        result: &'a StepResult,
    },
    /// A step was skipped because the previous step failed.
    StepSkipped { name: &'a str },
}

/// Runs registered steps strictly one after another.
///
/// Step `i + 1` never starts before step `i` has resolved. A failure only
/// affects the step right after it, and only if that step depends on its
/// predecessor.
#[derive(Debug, Default)]
pub struct StepRunner {
    steps: Vec<Step>,
    names: HashSet<String>,
    running: AtomicBool,
    last_report: Mutex<Option<RunReport>>,
}

impl StepRunner {
    /// Create an empty runner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step to the run list.
    ///
    /// Fails with [`StepfsError::DuplicateName`] if the name is taken; the
    /// existing registration is left as it was.
    pub fn register(&mut self, step: Step) -> Result<()> {
        if self.names.contains(step.name()) {
            return Err(StepfsError::DuplicateName {
                name: step.name().to_string(),
            });
        }
        self.names.insert(step.name().to_string());
        self.steps.push(step);
        Ok(())
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether no step is registered.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Registered step names in run order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    /// Registered steps in run order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Execute every registered step in order.
    ///
    /// Step failures are recorded in the returned report. The only error is
    /// [`StepfsError::RunInProgress`], when another run on this runner has
    /// not returned yet.
    pub fn run(&self) -> Result<RunReport> {
        self.run_with_progress(|_| {})
    }

    /// Execute every registered step in order with a progress callback.
    pub fn run_with_progress(
        &self,
        mut on_progress: impl FnMut(RunProgress<'_>),
    ) -> Result<RunReport> {
        let _guard = RunGuard::acquire(&self.running)?;

        let start = Instant::now();
        let total = self.steps.len();
        let mut report = RunReport::begin();

        for (index, step) in self.steps.iter().enumerate() {
            let previous_failed = report
                .last()
                .is_some_and(|r| r.status == StepStatus::Failed);

            if previous_failed && step.is_dependent() {
                debug!("Skipping '{}': previous step failed", step.name());
                on_progress(RunProgress::StepSkipped { name: step.name() });
                report.push(StepResult::skipped(step.name()));
                continue;
            }

            on_progress(RunProgress::StepStarting {
                name: step.name(),
                description: step.description(),
                index,
                total,
            });
            debug!("Running step {}/{}: {}", index + 1, total, step.name());

            let step_start = Instant::now();
            let result = match invoke(step) {
                Ok(output) => StepResult::success(step.name(), step_start.elapsed(), output),
                Err(e) => {
                    warn!("Step '{}' failed: {}", step.name(), e);
                    StepResult::failure(step.name(), step_start.elapsed(), e)
                }
            };

            on_progress(RunProgress::StepFinished {
                name: step.name(),
                result: &result,
            });
            report.push(result);
        }

        report.finish(start.elapsed());
        *self.lock_report() = Some(report.clone());

        Ok(report)
    }

    /// The most recent completed run's report.
    pub fn report(&self) -> Result<RunReport> {
        self.lock_report().clone().ok_or(StepfsError::NoRunYet)
    }

    fn lock_report(&self) -> MutexGuard<'_, Option<RunReport>> {
        self.last_report
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Invoke an action, turning a panic into a failed result.
fn invoke(step: &Step) -> ActionResult {
    panic::catch_unwind(AssertUnwindSafe(|| step.invoke())).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(StepActionError::new(ActionErrorKind::Panic, message))
    })
}

/// Marks a runner busy for the lifetime of one run.
struct RunGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> RunGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StepfsError::RunInProgress)?;
        Ok(Self { flag })
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
