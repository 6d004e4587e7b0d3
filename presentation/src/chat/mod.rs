//! Interactive chat module
//!
//! Provides a line-editor based interactive interface where keys can be
//! entered and changed between questions.

mod command;
mod repl;

pub use command::{ReplCommand, HISTORY_EXCLUSION_PREFIX};
pub use repl::ChatRepl;
