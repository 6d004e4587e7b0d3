//! Fan-out use case
//!
//! Sends one question to every eligible provider at once and settles each
//! provider's outcome independently as its call completes.

mod handle;
mod result;

pub use handle::SubmissionHandle;
pub use result::{FanOutResult, ProviderAnswer};

use crate::ports::http_transport::HttpTransport;
use crate::ports::progress::{NoProgress, OutcomeObserver};
use crate::state::{ApplyResult, OutcomeBoard};
use fanout_domain::{
    CredentialSet, ProviderDescriptor, ProviderError, ProviderId, ProviderOutcome,
    ProviderRegistry, Question, SubmissionId,
};
use futures::FutureExt;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Reasons a submission is rejected before any call is made
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("No provider has a credential configured")]
    NoEligibleProviders,
}

/// Input for the FanOut use case
#[derive(Debug, Clone)]
pub struct SubmitInput {
    /// The question as typed by the user
    pub question: String,
    /// Credentials snapshot taken at submission time
    pub credentials: CredentialSet,
}

impl SubmitInput {
    pub fn new(question: impl Into<String>, credentials: CredentialSet) -> Self {
        Self {
            question: question.into(),
            credentials,
        }
    }
}

/// Use case for dispatching a question to all eligible providers
pub struct FanOutUseCase<T: HttpTransport + 'static> {
    registry: Arc<ProviderRegistry>,
    transport: Arc<T>,
    board: Arc<OutcomeBoard>,
}

impl<T: HttpTransport + 'static> FanOutUseCase<T> {
    pub fn new(registry: Arc<ProviderRegistry>, transport: Arc<T>) -> Self {
        Self {
            registry,
            transport,
            board: Arc::new(OutcomeBoard::new()),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Outcome state of the most recent submission.
    pub fn board(&self) -> &Arc<OutcomeBoard> {
        &self.board
    }

    /// Submit and wait for every provider to settle, without progress.
    pub async fn execute(&self, input: SubmitInput) -> Result<FanOutResult, SubmitError> {
        self.execute_with_progress(input, Arc::new(NoProgress)).await
    }

    /// Submit and wait for every provider to settle.
    pub async fn execute_with_progress(
        &self,
        input: SubmitInput,
        observer: Arc<dyn OutcomeObserver>,
    ) -> Result<FanOutResult, SubmitError> {
        let handle = self.submit(input, observer)?;
        Ok(handle.wait_all().await)
    }

    /// Reset the board and dispatch one concurrent call per eligible provider.
    ///
    /// Returns as soon as the calls are spawned; must be called from within a
    /// tokio runtime. Rejected submissions leave the board untouched.
    pub fn submit(
        &self,
        input: SubmitInput,
        observer: Arc<dyn OutcomeObserver>,
    ) -> Result<SubmissionHandle, SubmitError> {
        let question = Question::try_new(input.question).ok_or(SubmitError::EmptyQuestion)?;

        let eligible = self.registry.list_eligible(&input.credentials);
        if eligible.is_empty() {
            return Err(SubmitError::NoEligibleProviders);
        }

        let provider_ids: Vec<ProviderId> = eligible.iter().map(|p| p.id().clone()).collect();
        let submission = self.board.reset(&provider_ids);
        info!(
            "Submission {} dispatched to {} provider(s): {}",
            submission,
            eligible.len(),
            provider_ids
                .iter()
                .map(ProviderId::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        );
        observer.on_submission_start(submission, &eligible);

        let (tx, rx) = mpsc::unbounded_channel();
        let remaining = Arc::new(AtomicUsize::new(eligible.len()));
        let question = Arc::new(question);

        for descriptor in eligible {
            // Eligibility guarantees a non-empty credential.
            let credential = input
                .credentials
                .get(descriptor.id())
                .unwrap_or_default()
                .to_string();
            let call = ProviderCall {
                submission,
                descriptor,
                credential,
                question: Arc::clone(&question),
            };
            let transport = Arc::clone(&self.transport);
            let board = Arc::clone(&self.board);
            let observer = Arc::clone(&observer);
            let remaining = Arc::clone(&remaining);
            let tx = tx.clone();

            tokio::spawn(async move {
                let answer = call.run(transport.as_ref(), &board, observer.as_ref()).await;
                // The handle may have been dropped; the board is already updated.
                let _ = tx.send(answer);
                if remaining.fetch_sub(1, Ordering::AcqRel) == 1 && board.is_current(submission) {
                    debug!("Submission {} settled", submission);
                    observer.on_all_settled(submission);
                }
            });
        }

        Ok(SubmissionHandle::new(
            submission,
            question.content().to_string(),
            provider_ids,
            rx,
            Arc::clone(&self.board),
        ))
    }
}

/// One provider's share of a submission
struct ProviderCall {
    submission: SubmissionId,
    descriptor: Arc<dyn ProviderDescriptor>,
    credential: String,
    question: Arc<Question>,
}

impl ProviderCall {
    async fn run<T: HttpTransport + ?Sized>(
        self,
        transport: &T,
        board: &OutcomeBoard,
        observer: &dyn OutcomeObserver,
    ) -> ProviderAnswer {
        let started = Instant::now();
        let id = self.descriptor.id().clone();
        let name = self.descriptor.display_name().to_string();

        let result = AssertUnwindSafe(self.query(transport))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::internal(
                    name.clone(),
                    "provider handler panicked",
                ))
            });

        if let Err(e) = &result {
            warn!("Provider {} failed: {}", id, e);
        } else {
            info!("Provider {} responded successfully", id);
        }
        let outcome = ProviderOutcome::from(result);

        match board.apply(self.submission, &id, outcome.clone()) {
            ApplyResult::Applied => observer.on_outcome(self.submission, &id, &outcome),
            ApplyResult::Stale => debug!(
                "Discarding {} outcome of superseded submission {}",
                id, self.submission
            ),
            other => warn!("Outcome for {} not applied: {:?}", id, other),
        }

        ProviderAnswer {
            provider: id,
            display_name: name,
            model: self.descriptor.model().to_string(),
            outcome,
            duration_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Build, send and decode a single provider request.
    async fn query<T: HttpTransport + ?Sized>(&self, transport: &T) -> Result<String, ProviderError> {
        let descriptor = self.descriptor.as_ref();
        let request = descriptor.build_request(&self.question, &self.credential);
        debug!(
            "Sending request to {} ({})",
            descriptor.id(),
            descriptor.endpoint()
        );

        let response = transport
            .send(&request)
            .await
            .map_err(|e| ProviderError::transport(descriptor.display_name(), e.to_string()))?;

        if !response.is_success() {
            return Err(descriptor.describe_status(response.status, &response.body));
        }

        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            ProviderError::parse(descriptor.display_name(), format!("invalid JSON body: {}", e))
        })?;
        descriptor.extract_answer(&body)
    }
}
