//! Per-submission result state.
//!
//! - [`outcome::ProviderOutcome`]: Pending / Success / Failure for one provider
//! - [`submission::SubmissionId`]: identity used to discard stale results

pub mod outcome;
pub mod submission;
