//! Outcome notification port
//!
//! Defines how per-provider transitions are reported while a submission is
//! in flight.

use fanout_domain::{ProviderDescriptor, ProviderId, ProviderOutcome, SubmissionId};
use std::sync::Arc;

/// Callback for outcome transitions during a submission
///
/// Implementations live in the presentation layer. Callbacks arrive from
/// concurrently running provider tasks, in settlement order, and only for
/// transitions that were actually applied; results of a superseded
/// submission are never reported.
pub trait OutcomeObserver: Send + Sync {
    /// Called once after every eligible provider was reset to Pending.
    fn on_submission_start(
        &self,
        submission: SubmissionId,
        providers: &[Arc<dyn ProviderDescriptor>],
    );

    /// Called when one provider settles to Success or Failure.
    fn on_outcome(&self, submission: SubmissionId, provider: &ProviderId, outcome: &ProviderOutcome);

    /// Called when the last provider of a submission has settled.
    fn on_all_settled(&self, _submission: SubmissionId) {}
}

/// No-op observer for when progress reporting is not needed
pub struct NoProgress;

impl OutcomeObserver for NoProgress {
    fn on_submission_start(
        &self,
        _submission: SubmissionId,
        _providers: &[Arc<dyn ProviderDescriptor>],
    ) {
    }

    fn on_outcome(
        &self,
        _submission: SubmissionId,
        _provider: &ProviderId,
        _outcome: &ProviderOutcome,
    ) {
    }
}
