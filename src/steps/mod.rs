//! Step model.
//!
//! - [`Step`] - A named unit of work with a skip policy
//! - [`StepResult`] - The recorded outcome of one step
//! - [`StepStatus`] - Completed, failed or skipped
//! - [`StepOutput`] - Opaque payload of a completed step
//! - [`StepActionError`] - Why a step's action failed
//! - [`RunReport`] - Ordered outcomes of one run
//!
//! # Example
//!
//! ```
//! use stepfs::steps::{Step, StepOutput};
//!
//! let step = Step::new("hello", || Ok(StepOutput::Text("hi".into()))).independent();
//! assert_eq!(step.name(), "hello");
//! assert!(!step.is_dependent());
//! ```

pub mod report;
pub mod result;
pub mod step;

pub use report::RunReport;
pub use result::{
    format_duration, ActionErrorKind, StepActionError, StepOutput, StepResult, StepStatus,
};
pub use step::{ActionResult, Step, StepAction};
