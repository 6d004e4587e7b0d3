//! Slash commands understood by the REPL

use fanout_domain::ProviderId;

/// Lines starting with this prefix carry a credential and are never written
/// to the history file.
pub const HISTORY_EXCLUSION_PREFIX: &str = "/key";

/// A parsed line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Anything not starting with `/`
    Ask(String),
    Help,
    Quit,
    /// List providers and whether a key is set
    Providers,
    /// Show the outcomes of the last question
    Status,
    /// `/key <provider> <value>`
    SetKey { provider: ProviderId, value: String },
    /// `/unset <provider>`
    Unset(ProviderId),
    /// Malformed or unknown command, with a message for the user
    Invalid(String),
}

impl ReplCommand {
    /// Parse one non-blank input line with trailing whitespace removed.
    ///
    /// Commands must start in the first column. An indented command is
    /// rejected rather than sent to the providers as a question.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim_start();
        if trimmed.starts_with('/') && trimmed.len() != line.len() {
            return Self::Invalid(
                "Commands must start at the beginning of the line".to_string(),
            );
        }
        if !line.starts_with('/') {
            return Self::Ask(trimmed.to_string());
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/help" | "/h" | "/?" => Self::Help,
            "/providers" | "/p" => Self::Providers,
            "/status" | "/s" => Self::Status,
            "/key" => match rest.split_once(char::is_whitespace) {
                Some((provider, value)) => Self::SetKey {
                    provider: ProviderId::from(provider),
                    value: value.trim().to_string(),
                },
                None => Self::Invalid("Usage: /key <provider> <api-key>".to_string()),
            },
            "/unset" if !rest.is_empty() => Self::Unset(ProviderId::from(rest)),
            "/unset" => Self::Invalid("Usage: /unset <provider>".to_string()),
            _ => Self::Invalid(format!(
                "Unknown command: {}\nType /help for available commands",
                name
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            ReplCommand::parse("What is Rust?"),
            ReplCommand::Ask("What is Rust?".to_string())
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help);
        assert_eq!(ReplCommand::parse("/providers"), ReplCommand::Providers);
        assert_eq!(ReplCommand::parse("/status"), ReplCommand::Status);
    }

    #[test]
    fn test_key_command() {
        assert_eq!(
            ReplCommand::parse("/key openai   sk-123"),
            ReplCommand::SetKey {
                provider: ProviderId::from("openai"),
                value: "sk-123".to_string()
            }
        );
        assert!(matches!(ReplCommand::parse("/key openai"), ReplCommand::Invalid(_)));
        assert!(matches!(ReplCommand::parse("/key"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_unset_command() {
        assert_eq!(
            ReplCommand::parse("/unset cohere"),
            ReplCommand::Unset(ProviderId::from("cohere"))
        );
        assert!(matches!(ReplCommand::parse("/unset"), ReplCommand::Invalid(_)));
    }

    #[test]
    fn test_key_lines_match_history_exclusion() {
        for line in ["/key openai sk-123", "/key google AIza-abc", "/key openai"] {
            assert!(line.starts_with(HISTORY_EXCLUSION_PREFIX));
            assert!(matches!(
                ReplCommand::parse(line),
                ReplCommand::SetKey { .. } | ReplCommand::Invalid(_)
            ));
        }
    }

    #[test]
    fn test_indented_command_is_not_a_question() {
        for line in ["  /key google AIza-abc", "\t/status"] {
            assert!(matches!(ReplCommand::parse(line), ReplCommand::Invalid(_)));
        }
        assert_eq!(
            ReplCommand::parse("   What is Rust?"),
            ReplCommand::Ask("What is Rust?".to_string())
        );
    }

    #[test]
    fn test_unknown_command() {
        match ReplCommand::parse("/models") {
            ReplCommand::Invalid(msg) => assert!(msg.contains("/models")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
