//! Visual theme and styling.

use console::Style;

use crate::steps::{format_duration, StepResult, StepStatus};

/// Terminal styles for run output.
#[derive(Debug, Clone)]
pub struct StepfsTheme {
    /// Style for completed steps (green).
    pub success: Style,
    /// Style for failed steps (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
}

impl Default for StepfsTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StepfsTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            header: Style::new(),
        }
    }

    /// Format a success message.
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format an error message.
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a skipped message.
    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("⊘ {}", msg)))
    }

    /// Format a header.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Format one step outcome.
    pub fn format_result(&self, result: &StepResult) -> String {
        match result.status {
            StepStatus::Completed => format!(
                "{} {}",
                self.format_success(&result.name),
                self.dim
                    .apply_to(format!("({})", format_duration(result.duration)))
            ),
            StepStatus::Failed => {
                let cause = result
                    .error
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                format!(
                    "{} {}",
                    self.format_error(&result.name),
                    self.dim.apply_to(cause)
                )
            }
            StepStatus::Skipped => {
                self.format_skipped(&format!("{} (previous step failed)", result.name))
            }
        }
    }
}

/// Check if colors should be used.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
