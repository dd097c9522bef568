//! Error types for stepfs operations.
//!
//! This module defines [`StepfsError`], the error type returned by the
//! runner's own operations and by plan loading, and a [`Result`] alias.
//!
//! # Error Handling Strategy
//!
//! - `StepfsError` covers runner misuse and plan problems only
//! - Failures inside a step's action are never `StepfsError`s; they are
//!   recorded as a [`StepActionError`](crate::steps::StepActionError) on the
//!   step's result
//! - Use `anyhow::Error` (via `StepfsError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stepfs operations.
#[derive(Debug, Error)]
pub enum StepfsError {
    /// Two steps were registered with the same name.
    #[error("Duplicate step name: {name}")]
    DuplicateName { name: String },

    /// `run()` was called while another run is executing on the same runner.
    #[error("A run is already in progress on this runner")]
    RunInProgress,

    /// `report()` was called before any run completed.
    #[error("No run has completed yet")]
    NoRunYet,

    /// Plan file not found at expected location.
    #[error("Plan not found: {path}")]
    PlanNotFound { path: PathBuf },

    /// Failed to parse plan file.
    #[error("Failed to parse plan at {path}: {message}")]
    PlanParseError { path: PathBuf, message: String },

    /// Invalid plan structure or values.
    #[error("Invalid plan: {message}")]
    PlanValidationError { message: String },

    /// A compact step notation could not be parsed.
    #[error("Invalid step '{spec}': {message}")]
    InvalidStepSpec { spec: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for stepfs operations.
pub type Result<T> = std::result::Result<T, StepfsError>;
