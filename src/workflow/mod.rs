pub mod submission;
pub mod submission_ctx;

pub use submission::{SubmissionController, SubmissionOutcome, SubmissionState};
pub use submission_ctx::SubmissionCtx;
