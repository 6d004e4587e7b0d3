//! Current outcome map with stale-result protection.
//!
//! The board holds exactly one slot per provider of the current
//! submission. [`OutcomeBoard::reset`] replaces all slots at once;
//! [`OutcomeBoard::apply`] only accepts a result tagged with the current
//! submission id for a slot that is still Pending.

use fanout_domain::{ProviderId, ProviderOutcome, SubmissionId};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// What happened to an outcome handed to [`OutcomeBoard::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// The slot moved from Pending to the given outcome.
    Applied,
    /// The outcome belongs to a superseded submission and was dropped.
    Stale,
    /// The slot had already settled; the outcome was dropped.
    AlreadySettled,
    /// No slot exists for this provider in the current submission.
    UnknownProvider,
    /// Only settled outcomes can be applied.
    NotSettled,
}

/// Point-in-time copy of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub submission: Option<SubmissionId>,
    pub outcomes: Vec<(ProviderId, ProviderOutcome)>,
}

impl BoardSnapshot {
    pub fn get(&self, provider: &ProviderId) -> Option<&ProviderOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| id == provider)
            .map(|(_, outcome)| outcome)
    }

    pub fn pending_count(&self) -> usize {
        self.outcomes.iter().filter(|(_, o)| o.is_pending()).count()
    }

    /// `true` once every slot has settled (vacuously true when empty).
    pub fn is_settled(&self) -> bool {
        self.pending_count() == 0
    }
}

#[derive(Debug, Default)]
struct BoardState {
    last_issued: Option<SubmissionId>,
    current: Option<SubmissionId>,
    slots: Vec<(ProviderId, ProviderOutcome)>,
}

/// Outcome map shared between the submitter and its provider tasks.
#[derive(Debug, Default)]
pub struct OutcomeBoard {
    state: Mutex<BoardState>,
}

impl OutcomeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        // State is consistent after every critical section; poisoning is harmless.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a new submission: issue a fresh id, set every given provider to
    /// Pending and drop all other slots.
    pub fn reset(&self, providers: &[ProviderId]) -> SubmissionId {
        let mut state = self.lock();
        let submission = state
            .last_issued
            .map_or(SubmissionId::new(1), |last| last.next());
        state.last_issued = Some(submission);
        state.current = Some(submission);
        state.slots = providers
            .iter()
            .map(|id| (id.clone(), ProviderOutcome::Pending))
            .collect();
        submission
    }

    /// Settle one provider's slot if `submission` is still current.
    pub fn apply(
        &self,
        submission: SubmissionId,
        provider: &ProviderId,
        outcome: ProviderOutcome,
    ) -> ApplyResult {
        if outcome.is_pending() {
            return ApplyResult::NotSettled;
        }

        let mut state = self.lock();
        if state.current != Some(submission) {
            return ApplyResult::Stale;
        }
        match state.slots.iter_mut().find(|(id, _)| id == provider) {
            None => ApplyResult::UnknownProvider,
            Some((_, slot)) if slot.is_settled() => ApplyResult::AlreadySettled,
            Some((_, slot)) => {
                *slot = outcome;
                ApplyResult::Applied
            }
        }
    }

    pub fn current_submission(&self) -> Option<SubmissionId> {
        self.lock().current
    }

    pub fn is_current(&self, submission: SubmissionId) -> bool {
        self.current_submission() == Some(submission)
    }

    pub fn outcome(&self, provider: &ProviderId) -> Option<ProviderOutcome> {
        self.lock()
            .slots
            .iter()
            .find(|(id, _)| id == provider)
            .map(|(_, outcome)| outcome.clone())
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let state = self.lock();
        BoardSnapshot {
            submission: state.current,
            outcomes: state.slots.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<ProviderId> {
        names.iter().map(|n| ProviderId::from(*n)).collect()
    }

    fn success(text: &str) -> ProviderOutcome {
        ProviderOutcome::Success(text.to_string())
    }

    #[test]
    fn test_reset_sets_all_pending() {
        let board = OutcomeBoard::new();
        let submission = board.reset(&ids(&["openai", "cohere"]));

        let snapshot = board.snapshot();
        assert_eq!(snapshot.submission, Some(submission));
        assert_eq!(snapshot.outcomes.len(), 2);
        assert_eq!(snapshot.pending_count(), 2);
        assert!(!snapshot.is_settled());
    }

    #[test]
    fn test_reset_replaces_previous_slots() {
        let board = OutcomeBoard::new();
        let first = board.reset(&ids(&["openai", "cohere"]));
        board.apply(first, &ProviderId::from("openai"), success("old"));

        let second = board.reset(&ids(&["openai", "google"]));
        assert!(second > first);
        assert_eq!(second, first.next());

        let snapshot = board.snapshot();
        assert_eq!(snapshot.get(&ProviderId::from("openai")), Some(&ProviderOutcome::Pending));
        assert_eq!(snapshot.get(&ProviderId::from("google")), Some(&ProviderOutcome::Pending));
        assert_eq!(snapshot.get(&ProviderId::from("cohere")), None);
    }

    #[test]
    fn test_apply_transitions_once() {
        let board = OutcomeBoard::new();
        let submission = board.reset(&ids(&["openai"]));
        let openai = ProviderId::from("openai");

        assert_eq!(board.apply(submission, &openai, success("hi")), ApplyResult::Applied);
        assert_eq!(
            board.apply(submission, &openai, ProviderOutcome::Failure("late".into())),
            ApplyResult::AlreadySettled
        );
        assert_eq!(board.outcome(&openai), Some(success("hi")));
        assert!(board.snapshot().is_settled());
    }

    #[test]
    fn test_stale_submission_is_discarded() {
        let board = OutcomeBoard::new();
        let openai = ProviderId::from("openai");
        let first = board.reset(&ids(&["openai"]));
        let second = board.reset(&ids(&["openai"]));

        assert_eq!(board.apply(first, &openai, success("stale")), ApplyResult::Stale);
        assert_eq!(board.outcome(&openai), Some(ProviderOutcome::Pending));
        assert!(board.is_current(second));
        assert!(!board.is_current(first));
    }

    #[test]
    fn test_unknown_provider_and_pending_rejected() {
        let board = OutcomeBoard::new();
        let submission = board.reset(&ids(&["openai"]));

        assert_eq!(
            board.apply(submission, &ProviderId::from("cohere"), success("x")),
            ApplyResult::UnknownProvider
        );
        assert_eq!(
            board.apply(submission, &ProviderId::from("openai"), ProviderOutcome::Pending),
            ApplyResult::NotSettled
        );
    }

    #[test]
    fn test_empty_board() {
        let board = OutcomeBoard::new();
        assert_eq!(board.current_submission(), None);
        assert_eq!(board.snapshot(), BoardSnapshot::default());
    }
}
