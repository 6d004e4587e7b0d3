//! HTTP transport adapter
//!
//! Implements the [`HttpTransport`](fanout_application::HttpTransport) port
//! with a shared `reqwest::Client`.

mod reqwest_transport;

pub use reqwest_transport::{HttpOptions, ReqwestTransport};
