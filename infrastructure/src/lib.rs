//! Infrastructure layer for fanout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod http;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileHttpConfig, FileOutputConfig, FileProviderConfig,
    FileReplConfig, Severity,
};
pub use http::{HttpOptions, ReqwestTransport};
