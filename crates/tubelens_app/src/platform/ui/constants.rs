pub const PROMPT: &str = "search> ";
pub const SEARCH_COMMAND: &str = "/search";
pub const CHANNEL_COMMAND: &str = "/channel";
pub const QUIT_COMMAND: &str = "/quit";
pub const HELP_COMMAND: &str = "/help";
pub const HELP_TEXT: &str = "\
Type a query and press Enter to search.
  /search <query>   search explicitly
  /channel <id>     open a channel profile (ids are shown next to channel names)
  /help             show this help
  /quit             exit";
