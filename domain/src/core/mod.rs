//! Core domain concepts shared across all subdomains.
//!
//! - [`question::Question`]: a validated question to fan out to providers
//! - [`error::ProviderError`]: per-provider failure taxonomy
//! - [`string::truncate`]: UTF-8 safe truncation for error bodies

pub mod error;
pub mod question;
pub mod string;
