//! Run reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use super::result::{serialize_millis, StepResult, StepStatus};

/// Ordered record of every step outcome for one run.
///
/// Built append-only by the runner while a run executes; read-only once the
/// run returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Total run duration.
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,

    /// One result per registered step, in registration order.
    results: Vec<StepResult>,
}

impl RunReport {
    pub(crate) fn begin() -> Self {
        Self {
            started_at: Utc::now(),
            duration: Duration::ZERO,
            results: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, result: StepResult) {
        self.results.push(result);
    }

    pub(crate) fn finish(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Results in registration order.
    pub fn results(&self) -> &[StepResult] {
        &self.results
    }

    /// Result of the most recently resolved step.
    pub fn last(&self) -> Option<&StepResult> {
        self.results.last()
    }

    /// Look up a result by step name.
    pub fn get(&self, name: &str) -> Option<&StepResult> {
        self.results.iter().find(|r| r.name == name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Statuses in registration order.
    pub fn statuses(&self) -> Vec<StepStatus> {
        self.results.iter().map(|r| r.status).collect()
    }

    /// Number of entries with the given status.
    pub fn count(&self, status: StepStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// True when no step failed.
    pub fn success(&self) -> bool {
        self.count(StepStatus::Failed) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::{StepActionError, StepOutput};

    fn sample() -> RunReport {
        let mut report = RunReport::begin();
        report.push(StepResult::success("a", Duration::ZERO, StepOutput::Nothing));
        report.push(StepResult::failure(
            "b",
            Duration::ZERO,
            StepActionError::not_found("b.txt"),
        ));
        report.push(StepResult::skipped("c"));
        report
    }

    #[test]
    fn new_report_is_empty() {
        let report = RunReport::begin();
        assert!(report.is_empty());
        assert!(report.success());
    }

    #[test]
    fn counts_by_status() {
        let report = sample();
        assert_eq!(report.len(), 3);
        assert_eq!(report.count(StepStatus::Completed), 1);
        assert_eq!(report.count(StepStatus::Failed), 1);
        assert_eq!(report.count(StepStatus::Skipped), 1);
        assert!(!report.success());
    }

    #[test]
    fn get_finds_by_name() {
        let report = sample();
        assert_eq!(report.get("c").unwrap().status, StepStatus::Skipped);
        assert!(report.get("z").is_none());
        assert_eq!(report.last().unwrap().name, "c");
    }

    #[test]
    fn serializes_results_in_order() {
        let json = serde_json::to_value(sample()).unwrap();
        let names: Vec<_> = json["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
