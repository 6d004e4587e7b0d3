//! Handle to an in-flight submission.

use super::result::{FanOutResult, ProviderAnswer};
use crate::state::OutcomeBoard;
use chrono::{DateTime, Utc};
use fanout_domain::{ProviderId, ProviderOutcome, SubmissionId};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receives each provider's answer as soon as it settles.
///
/// Dropping the handle does not cancel anything: provider tasks keep running
/// and keep updating the board. Waiting on the handle is optional.
pub struct SubmissionHandle {
    id: SubmissionId,
    question: String,
    started_at: DateTime<Utc>,
    providers: Vec<ProviderId>,
    receiver: mpsc::UnboundedReceiver<ProviderAnswer>,
    received: Vec<ProviderAnswer>,
    board: Arc<OutcomeBoard>,
}

impl SubmissionHandle {
    pub(super) fn new(
        id: SubmissionId,
        question: String,
        providers: Vec<ProviderId>,
        receiver: mpsc::UnboundedReceiver<ProviderAnswer>,
        board: Arc<OutcomeBoard>,
    ) -> Self {
        Self {
            id,
            question,
            started_at: Utc::now(),
            providers,
            receiver,
            received: Vec::new(),
            board,
        }
    }

    pub fn id(&self) -> SubmissionId {
        self.id
    }

    /// Eligible providers of this submission, in registry order.
    pub fn providers(&self) -> &[ProviderId] {
        &self.providers
    }

    /// Wait for the next provider to settle, in settlement order.
    ///
    /// Returns `None` once every provider has been reported.
    pub async fn next_settled(&mut self) -> Option<ProviderAnswer> {
        let answer = self.receiver.recv().await?;
        self.received.push(answer.clone());
        Some(answer)
    }

    /// Wait until every provider has settled and collect the answers in
    /// registry order.
    pub async fn wait_all(mut self) -> FanOutResult {
        while self.next_settled().await.is_some() {}

        let mut answers = std::mem::take(&mut self.received);
        for provider in &self.providers {
            if !answers.iter().any(|a| &a.provider == provider) {
                // The task was dropped with the runtime before reporting.
                answers.push(ProviderAnswer {
                    provider: provider.clone(),
                    display_name: provider.to_string(),
                    model: String::new(),
                    outcome: ProviderOutcome::Failure("Request was aborted".to_string()),
                    duration_ms: 0,
                });
            }
        }
        answers.sort_by_key(|a| {
            self.providers
                .iter()
                .position(|p| p == &a.provider)
                .unwrap_or(usize::MAX)
        });

        FanOutResult {
            submission: self.id,
            question: self.question,
            started_at: self.started_at,
            answers,
            superseded: !self.board.is_current(self.id),
        }
    }
}
