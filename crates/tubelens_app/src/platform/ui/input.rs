use tubelens_core::Msg;

use super::constants::{CHANNEL_COMMAND, HELP_COMMAND, QUIT_COMMAND, SEARCH_COMMAND};

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Replace the input box contents and press search.
    Search(String),
    /// Equivalent to clicking a rendered channel link.
    OpenChannel(String),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> UserCommand {
    let trimmed = line.trim();
    if trimmed == QUIT_COMMAND {
        return UserCommand::Quit;
    }
    if trimmed == HELP_COMMAND {
        return UserCommand::Help;
    }
    if let Some(rest) = command_argument(trimmed, CHANNEL_COMMAND) {
        return UserCommand::OpenChannel(rest.to_string());
    }
    if let Some(rest) = command_argument(trimmed, SEARCH_COMMAND) {
        return UserCommand::Search(rest.to_string());
    }
    UserCommand::Search(line.to_string())
}

/// Messages the core sees for `command`, as if the user had used the page.
pub fn to_msgs(command: UserCommand) -> Vec<Msg> {
    match command {
        UserCommand::Search(text) => vec![Msg::InputChanged(text), Msg::SearchClicked],
        UserCommand::OpenChannel(channel_id) => vec![Msg::ChannelLinkClicked { channel_id }],
        UserCommand::Help | UserCommand::Quit => Vec::new(),
    }
}

/// Text after `command`, if `line` is that command (with or without argument).
fn command_argument<'a>(line: &'a str, command: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(command)?;
    if rest.is_empty() {
        return Some(rest);
    }
    rest.strip_prefix(char::is_whitespace).map(str::trim)
}

#[cfg(test)]
mod tests {
    use tubelens_core::Msg;

    use super::{parse_line, to_msgs, UserCommand};

    #[test]
    fn bare_text_is_a_search() {
        assert_eq!(
            parse_line("  rust lang "),
            UserCommand::Search("  rust lang ".to_string())
        );
    }

    #[test]
    fn commands_are_recognised() {
        assert_eq!(parse_line("/quit"), UserCommand::Quit);
        assert_eq!(parse_line(" /help "), UserCommand::Help);
        assert_eq!(
            parse_line("/channel UC123"),
            UserCommand::OpenChannel("UC123".to_string())
        );
        assert_eq!(
            parse_line("/search  cats"),
            UserCommand::Search("cats".to_string())
        );
    }

    #[test]
    fn command_prefix_needs_a_separator() {
        assert_eq!(
            parse_line("/searching"),
            UserCommand::Search("/searching".to_string())
        );
        assert_eq!(parse_line("/channel"), UserCommand::OpenChannel(String::new()));
    }

    #[test]
    fn search_types_then_clicks() {
        assert_eq!(
            to_msgs(UserCommand::Search("cats".to_string())),
            vec![Msg::InputChanged("cats".to_string()), Msg::SearchClicked]
        );
        assert_eq!(
            to_msgs(UserCommand::OpenChannel("UC1".to_string())),
            vec![Msg::ChannelLinkClicked {
                channel_id: "UC1".to_string()
            }]
        );
        assert!(to_msgs(UserCommand::Help).is_empty());
    }
}
