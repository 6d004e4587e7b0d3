//! Progress indicators for in-flight submissions.

pub mod reporter;
