//! Output verbosity.

use crate::steps::StepStatus;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show step outputs as well as statuses.
    Verbose,
    /// Show progress and status only.
    #[default]
    Normal,
    /// Show failed steps and the final summary only.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows step outputs.
    pub fn shows_step_output(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows progress spinners.
    pub fn shows_spinners(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Check if this mode prints the line for a step that resolved with `status`.
    pub fn shows_result(&self, status: StepStatus) -> bool {
        match self {
            Self::Verbose | Self::Normal => true,
            Self::Quiet => status == StepStatus::Failed,
        }
    }
}
