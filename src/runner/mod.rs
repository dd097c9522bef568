//! Step execution orchestration.

pub mod sequence;

pub use sequence::{RunProgress, StepRunner};
