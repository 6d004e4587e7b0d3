//! Interactive session state
//!
//! [`FanOutSession`] is the single owner of the credentials entered during a
//! session and of the outcome board they feed. The presentation layer only
//! goes through its methods; there is no global state.

use crate::ports::http_transport::HttpTransport;
use crate::ports::progress::OutcomeObserver;
use crate::state::BoardSnapshot;
use crate::use_cases::fan_out::{
    FanOutResult, FanOutUseCase, SubmissionHandle, SubmitError, SubmitInput,
};
use fanout_domain::{CredentialSet, ProviderDescriptor, ProviderId, ProviderRegistry, SubmissionId};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Unknown provider '{0}'")]
    UnknownProvider(ProviderId),
}

/// Credentials plus outcome state for one user session.
pub struct FanOutSession<T: HttpTransport + 'static> {
    use_case: FanOutUseCase<T>,
    credentials: RwLock<CredentialSet>,
}

impl<T: HttpTransport + 'static> FanOutSession<T> {
    pub fn new(use_case: FanOutUseCase<T>, credentials: CredentialSet) -> Self {
        Self {
            use_case,
            credentials: RwLock::new(credentials),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.use_case.registry()
    }

    /// Store a credential for a registered provider.
    ///
    /// The value is kept verbatim. An empty value makes the provider
    /// ineligible, same as clearing it.
    pub fn set_credential(
        &self,
        provider: impl Into<ProviderId>,
        credential: impl Into<String>,
    ) -> Result<(), SessionError> {
        let provider = provider.into();
        if !self.registry().contains(&provider) {
            return Err(SessionError::UnknownProvider(provider));
        }
        debug!("Credential updated for {}", provider);
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .set(provider, credential);
        Ok(())
    }

    /// Remove a credential. Returns whether one was present.
    pub fn clear_credential(&self, provider: &ProviderId) -> bool {
        self.credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(provider)
            .is_some()
    }

    /// Copy of the current credentials.
    pub fn credentials(&self) -> CredentialSet {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn eligible_providers(&self) -> Vec<Arc<dyn ProviderDescriptor>> {
        let credentials = self.credentials();
        self.registry().list_eligible(&credentials)
    }

    /// Dispatch a question with the credentials as they are right now.
    ///
    /// Later credential changes do not affect calls already in flight.
    pub fn submit(
        &self,
        question: impl Into<String>,
        observer: Arc<dyn OutcomeObserver>,
    ) -> Result<SubmissionHandle, SubmitError> {
        let input = SubmitInput::new(question, self.credentials());
        let handle = self.use_case.submit(input, observer)?;
        info!("Session submission {} started", handle.id());
        Ok(handle)
    }

    /// Dispatch a question and wait for every provider to settle.
    pub async fn ask(
        &self,
        question: impl Into<String>,
        observer: Arc<dyn OutcomeObserver>,
    ) -> Result<FanOutResult, SubmitError> {
        let handle = self.submit(question, observer)?;
        Ok(handle.wait_all().await)
    }

    /// Outcomes of the most recent accepted submission.
    pub fn outcomes(&self) -> BoardSnapshot {
        self.use_case.board().snapshot()
    }

    pub fn current_submission(&self) -> Option<SubmissionId> {
        self.use_case.board().current_submission()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::http_transport::{HttpResponse, TransportError};
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use fanout_domain::{ProviderOutcome, ProviderRequest};
    use std::sync::Mutex;
    use std::time::Duration;

    struct EchoTransport {
        delay: Duration,
        seen: Mutex<Vec<(String, Option<String>)>>,
    }

    impl EchoTransport {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl HttpTransport for EchoTransport {
        async fn send(&self, request: &ProviderRequest) -> Result<HttpResponse, TransportError> {
            let auth = request.header("Authorization").map(str::to_string);
            self.seen.lock().unwrap().push((request.url.clone(), auth));
            tokio::time::sleep(self.delay).await;
            let body = serde_json::json!({
                "choices": [{"message": {"content": "echo"}}],
                "generations": [{"text": "echo"}],
            });
            Ok(HttpResponse::new(200, body.to_string()))
        }
    }

    fn session(delay: Duration) -> (FanOutSession<EchoTransport>, Arc<EchoTransport>) {
        let transport = Arc::new(EchoTransport::new(delay));
        let use_case = FanOutUseCase::new(
            Arc::new(ProviderRegistry::builtin()),
            Arc::clone(&transport),
        );
        (FanOutSession::new(use_case, CredentialSet::new()), transport)
    }

    #[test]
    fn test_credentials_drive_eligibility() {
        let (session, _) = session(Duration::ZERO);
        assert!(session.eligible_providers().is_empty());

        session.set_credential("cohere", "c").unwrap();
        session.set_credential("openai", "o").unwrap();
        let ids: Vec<_> = session
            .eligible_providers()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["openai", "cohere"]);

        session.set_credential("openai", "").unwrap();
        assert_eq!(session.eligible_providers().len(), 1);

        assert!(session.clear_credential(&ProviderId::from("cohere")));
        assert!(!session.clear_credential(&ProviderId::from("cohere")));
        assert!(session.eligible_providers().is_empty());
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let (session, _) = session(Duration::ZERO);
        let err = session.set_credential("acme", "k").unwrap_err();
        assert_eq!(err, SessionError::UnknownProvider(ProviderId::from("acme")));
        assert!(session.credentials().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_submission_leaves_no_state() {
        let (session, transport) = session(Duration::ZERO);

        let err = session.ask("Hello", Arc::new(NoProgress)).await.unwrap_err();
        assert_eq!(err, SubmitError::NoEligibleProviders);

        session.set_credential("openai", "o").unwrap();
        let err = session.ask("  ", Arc::new(NoProgress)).await.unwrap_err();
        assert_eq!(err, SubmitError::EmptyQuestion);

        assert_eq!(session.current_submission(), None);
        assert!(session.outcomes().outcomes.is_empty());
        assert!(transport.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submission_uses_credentials_at_submit_time() {
        let (session, transport) = session(Duration::from_millis(30));
        session.set_credential("openai", "before").unwrap();

        let handle = session.submit("Q", Arc::new(NoProgress)).unwrap();
        session.set_credential("openai", "after").unwrap();
        session.set_credential("cohere", "late").unwrap();

        let result = handle.wait_all().await;
        assert_eq!(result.answers.len(), 1);
        assert_eq!(result.answers[0].outcome, ProviderOutcome::Success("echo".into()));

        let seen = transport.seen.lock().unwrap().clone();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1.as_deref(), Some("Bearer before"));
    }

    #[tokio::test]
    async fn test_outcomes_replaced_by_next_submission() {
        let (session, _) = session(Duration::ZERO);
        session.set_credential("openai", "o").unwrap();
        session.set_credential("cohere", "c").unwrap();

        let first = session.ask("Q1", Arc::new(NoProgress)).await.unwrap();
        assert_eq!(session.outcomes().outcomes.len(), 2);
        assert_eq!(session.current_submission(), Some(first.submission));

        session.clear_credential(&ProviderId::from("cohere"));
        let second = session.ask("Q2", Arc::new(NoProgress)).await.unwrap();

        let snapshot = session.outcomes();
        assert_eq!(snapshot.submission, Some(second.submission));
        assert_eq!(snapshot.outcomes.len(), 1);
        assert!(snapshot.get(&ProviderId::from("cohere")).is_none());
        assert!(snapshot.is_settled());
    }
}
