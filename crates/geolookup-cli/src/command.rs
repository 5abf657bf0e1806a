//! Line commands for the interactive loop.

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Replace the query text.
    Query(String),
    /// Select a suggestion by zero-based index.
    Pick(usize),
    Clear,
    Focus,
    Dismiss,
    Quit,
    /// Unrecognised `:` command, with a hint for the user.
    Invalid(String),
}

impl Command {
    /// Parses one input line. Lines not starting with `:` are query text.
    pub(crate) fn parse(line: &str) -> Self {
        let Some(rest) = line.trim().strip_prefix(':') else {
            return Command::Query(line.to_owned());
        };

        let mut parts = rest.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("pick" | "p"), Some(n)) => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Pick(n - 1),
                _ => Command::Invalid(format!("expected a suggestion number, got \"{n}\"")),
            },
            (Some("pick" | "p"), None) => Command::Invalid("usage: :pick N".to_owned()),
            (Some("clear" | "c"), _) => Command::Clear,
            (Some("focus" | "f"), _) => Command::Focus,
            (Some("dismiss" | "d"), _) => Command::Dismiss,
            (Some("quit" | "q"), _) => Command::Quit,
            (other, _) => Command::Invalid(format!(
                "unknown command \":{}\" (try :pick N, :clear, :focus, :dismiss, :quit)",
                other.unwrap_or_default()
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_query_verbatim() {
        assert_eq!(
            Command::parse("  main st "),
            Command::Query("  main st ".to_owned())
        );
        assert_eq!(Command::parse(""), Command::Query(String::new()));
    }

    #[test]
    fn pick_is_one_based() {
        assert_eq!(Command::parse(":pick 1"), Command::Pick(0));
        assert_eq!(Command::parse(":p 3"), Command::Pick(2));
    }

    #[test]
    fn pick_rejects_zero_and_garbage() {
        assert!(matches!(Command::parse(":pick 0"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":pick x"), Command::Invalid(_)));
        assert!(matches!(Command::parse(":pick"), Command::Invalid(_)));
    }

    #[test]
    fn control_commands() {
        assert_eq!(Command::parse(":clear"), Command::Clear);
        assert_eq!(Command::parse(" :focus"), Command::Focus);
        assert_eq!(Command::parse(":dismiss"), Command::Dismiss);
        assert_eq!(Command::parse(":q"), Command::Quit);
    }

    #[test]
    fn unknown_command_is_invalid() {
        let Command::Invalid(hint) = Command::parse(":zoom 3") else {
            panic!("expected invalid command");
        };
        assert!(hint.contains(":zoom"));
    }
}
