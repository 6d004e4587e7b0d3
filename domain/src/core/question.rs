//! Question value object

use serde::{Deserialize, Serialize};

/// A question to be sent to every eligible provider (Value Object)
///
/// Guaranteed to contain at least one non-whitespace character. The content
/// is kept verbatim; it is never trimmed before being sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if empty or whitespace-only
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("What is Rust?").unwrap();
        assert_eq!(q.content(), "What is Rust?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\n\t ").is_none());
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let q = Question::try_new("  spaced  ").unwrap();
        assert_eq!(q.into_content(), "  spaced  ");
    }
}
