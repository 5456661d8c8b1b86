//! Input line parsing.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

/// Usage text shown by `/help`.
pub const HELP: &str = "\
/connect [url]            connect to the server
/create <name...>         create a room
/join <code> [username]   join a room by code
/leave                    leave the current room
/status                   show connection and room
/help                     show this help
/quit                     exit
<text>                    send a chat message";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    /// `/connect [url]`.
    Connect {
        /// Server URL. `None` means the configured one.
        url: Option<String>,
    },
    /// `/create <name...>`.
    CreateRoom {
        /// Room name; may contain spaces.
        name: String,
    },
    /// `/join <code> [username]`.
    JoinRoom {
        /// Room code.
        code: String,
        /// Display name. `None` means the configured one.
        username: Option<String>,
    },
    /// `/leave`.
    LeaveRoom,
    /// `/status`.
    Status,
    /// `/help`.
    Help,
    /// `/quit`.
    Quit,
    /// Plain chat text.
    Message {
        /// Message text, as typed.
        text: String,
    },
    /// Unrecognized `/command`.
    Unknown {
        /// Command name without the slash.
        command: String,
    },
    /// Known command with bad arguments.
    InvalidArgs {
        /// Command name without the slash.
        command: &'static str,
        /// What was wrong.
        error: &'static str,
    },
}

/// Parse one input line.
pub fn parse(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Empty;
    }

    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Message { text: trimmed.to_string() };
    };

    let (name, args) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    let args = args.trim();
    let mut words = args.split_whitespace();

    match name {
        "connect" => match (words.next(), words.next()) {
            (url, None) => Command::Connect { url: url.map(str::to_string) },
            (_, Some(_)) => {
                Command::InvalidArgs { command: "connect", error: "expected at most one url" }
            },
        },
        "create" => {
            if args.is_empty() {
                Command::InvalidArgs { command: "create", error: "missing room name" }
            } else {
                Command::CreateRoom { name: args.to_string() }
            }
        },
        "join" => match (words.next(), words.next(), words.next()) {
            (Some(code), username, None) => {
                Command::JoinRoom { code: code.to_string(), username: username.map(str::to_string) }
            },
            (None, ..) => Command::InvalidArgs { command: "join", error: "missing room code" },
            (Some(_), _, Some(_)) => {
                Command::InvalidArgs { command: "join", error: "expected <code> [username]" }
            },
        },
        "leave" => Command::LeaveRoom,
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown { command: other.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse("  hello there "), Command::Message { text: "hello there".into() });
    }

    #[test]
    fn blank_lines_are_empty() {
        assert_eq!(parse(""), Command::Empty);
        assert_eq!(parse("   \t"), Command::Empty);
    }

    #[test]
    fn connect_with_and_without_url() {
        assert_eq!(parse("/connect"), Command::Connect { url: None });
        assert_eq!(
            parse("/connect ws://example.com/ws"),
            Command::Connect { url: Some("ws://example.com/ws".into()) }
        );
        assert!(matches!(parse("/connect a b"), Command::InvalidArgs { command: "connect", .. }));
    }

    #[test]
    fn create_keeps_spaces_in_name() {
        assert_eq!(parse("/create  Book   Club "), Command::CreateRoom { name: "Book   Club".into() });
        assert!(matches!(parse("/create"), Command::InvalidArgs { command: "create", .. }));
    }

    #[test]
    fn join_arguments() {
        assert_eq!(parse("/join XYZ"), Command::JoinRoom { code: "XYZ".into(), username: None });
        assert_eq!(
            parse("/join XYZ alice"),
            Command::JoinRoom { code: "XYZ".into(), username: Some("alice".into()) }
        );
        assert!(matches!(parse("/join"), Command::InvalidArgs { command: "join", .. }));
        assert!(matches!(parse("/join a b c"), Command::InvalidArgs { command: "join", .. }));
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("/leave"), Command::LeaveRoom);
        assert_eq!(parse("/status"), Command::Status);
        assert_eq!(parse("/help"), Command::Help);
        assert_eq!(parse("/quit"), Command::Quit);
        assert_eq!(parse("/exit"), Command::Quit);
    }

    #[test]
    fn unknown_command() {
        assert_eq!(parse("/dance now"), Command::Unknown { command: "dance".into() });
        assert_eq!(parse("/"), Command::Unknown { command: String::new() });
    }

    #[test]
    fn help_text() {
        insta::assert_snapshot!(HELP, @r"
        /connect [url]            connect to the server
        /create <name...>         create a room
        /join <code> [username]   join a room by code
        /leave                    leave the current room
        /status                   show connection and room
        /help                     show this help
        /quit                     exit
        <text>                    send a chat message
        ");
    }
}
