//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::steps::{format_duration, RunReport, StepResult, StepStatus};

use super::{
    should_use_colors, OutputMode, ProgressSpinner, SpinnerHandle, StepfsTheme, UserInterface,
};

/// UI writing to stdout.
pub struct TerminalUI {
    term: Term,
    theme: StepfsTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            StepfsTheme::new()
        } else {
            StepfsTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && self.term.is_term() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
    }

    fn show_result(&mut self, result: &StepResult) {
        if !self.mode.shows_result(result.status) {
            return;
        }
        writeln!(self.term, "  {}", self.theme.format_result(result)).ok();
        if self.mode.shows_step_output() {
            if let Some(preview) = result.output.as_ref().and_then(|o| o.preview()) {
                writeln!(self.term, "    {}", self.theme.dim.apply_to(preview)).ok();
            }
        }
    }

    fn show_summary(&mut self, report: &RunReport) {
        let line = format!(
            "{} completed, {} failed, {} skipped in {}",
            report.count(StepStatus::Completed),
            report.count(StepStatus::Failed),
            report.count(StepStatus::Skipped),
            format_duration(report.duration),
        );
        if report.success() {
            writeln!(self.term, "\n{}", self.theme.format_success(&line)).ok();
        } else {
            writeln!(self.term, "\n{}", self.theme.format_error(&line)).ok();
        }
    }
}
