//! Submission module.
//!
//! Contains the submission state machine and the confirmation recap.

mod flow;
mod review;

pub use flow::{SubmissionFlow, SubmissionState};
pub use review::ReviewSummary;
