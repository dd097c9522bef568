//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use stepfs::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Starting run");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Starting run".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use crate::steps::{RunReport, StepResult, StepStatus};

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    results: Vec<(String, StepStatus)>,
    summaries: Vec<RunReport>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Messages shown.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Success messages shown.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Errors shown.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Headers shown.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Spinner messages started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Step results shown, as (name, status).
    pub fn results(&self) -> &[(String, StepStatus)] {
        &self.results
    }

    /// Reports summarized.
    pub fn summaries(&self) -> &[RunReport] {
        &self.summaries
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_result(&mut self, result: &StepResult) {
        self.results.push((result.name.clone(), result.status));
    }

    fn show_summary(&mut self, report: &RunReport) {
        self.summaries.push(report.clone());
    }
}

/// Spinner that does nothing.
#[derive(Debug, Default)]
pub struct MockSpinner;

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn clear(&mut self) {}
}
