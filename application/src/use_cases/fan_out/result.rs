//! Result types collected once a submission has settled.

use chrono::{DateTime, Utc};
use fanout_domain::{ProviderId, ProviderOutcome, SubmissionId};
use serde::Serialize;

/// Final outcome of one provider within a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderAnswer {
    /// Provider that produced this outcome
    pub provider: ProviderId,
    /// Human readable provider label
    pub display_name: String,
    /// Model the provider was asked to use
    pub model: String,
    /// Success text or failure message
    pub outcome: ProviderOutcome,
    /// Wall-clock time from dispatch to settlement
    pub duration_ms: u64,
}

impl ProviderAnswer {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}

/// Every provider answer of one submission, in registry order
#[derive(Debug, Clone, Serialize)]
pub struct FanOutResult {
    pub submission: SubmissionId,
    pub question: String,
    pub started_at: DateTime<Utc>,
    pub answers: Vec<ProviderAnswer>,
    /// A newer submission replaced this one before it settled
    pub superseded: bool,
}

impl FanOutResult {
    /// Returns an iterator over only the successful answers.
    pub fn successful(&self) -> impl Iterator<Item = &ProviderAnswer> {
        self.answers.iter().filter(|a| a.is_success())
    }

    /// Returns an iterator over only the failed answers.
    pub fn failed(&self) -> impl Iterator<Item = &ProviderAnswer> {
        self.answers.iter().filter(|a| !a.is_success())
    }

    pub fn answer(&self, provider: &ProviderId) -> Option<&ProviderAnswer> {
        self.answers.iter().find(|a| &a.provider == provider)
    }
}
