//! Application layer for fanout
//!
//! This crate contains the fan-out use case, the session and outcome state
//! containers, and the port definitions adapters implement.
//! It depends only on the domain layer.

pub mod ports;
pub mod session;
pub mod state;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    http_transport::{HttpResponse, HttpTransport, TransportError},
    progress::{NoProgress, OutcomeObserver},
};
pub use session::{FanOutSession, SessionError};
pub use state::{ApplyResult, BoardSnapshot, OutcomeBoard};
pub use use_cases::fan_out::{
    FanOutResult, FanOutUseCase, ProviderAnswer, SubmissionHandle, SubmitError, SubmitInput,
};
