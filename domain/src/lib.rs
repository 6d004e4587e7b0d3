//! Domain layer for fanout
//!
//! This crate contains the provider descriptors, credentials and outcome
//! types. It performs no I/O and has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! - **Provider**: one external text-generation API, described by a
//!   [`ProviderDescriptor`] that knows its request and response shapes.
//! - **Eligible provider**: a provider with a non-empty credential in the
//!   caller's [`CredentialSet`].
//! - **Outcome**: the per-provider, per-submission [`ProviderOutcome`].
//! - **Submission**: one question dispatch cycle, identified by a
//!   [`SubmissionId`] so stale results can be discarded.

pub mod config;
pub mod core;
pub mod credentials;
pub mod orchestration;
pub mod providers;

// Re-export commonly used types
pub use config::OutputFormat;
pub use core::{error::ProviderError, question::Question};
pub use credentials::CredentialSet;
pub use orchestration::{outcome::ProviderOutcome, submission::SubmissionId};
pub use providers::{
    ProviderDescriptor, ProviderId, ProviderRegistry, ProviderRequest, ProviderSettings, builtin,
};
