/// Commands understood by the interactive prompt.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ClientCommand {
    Help,
    Usage,
    Quit,
    Version,
    Close,
    Pwd,
    Ls,
    Cd,
    Lcd,
    Open,
    User,
}

impl ClientCommand {
    pub fn from_str(cmd: &str) -> Option<ClientCommand> {
        match cmd.to_ascii_lowercase().as_str() {
            "?" | "help" => Some(ClientCommand::Help),
            "usage" => Some(ClientCommand::Usage),
            "quit" | "bye" | "exit" => Some(ClientCommand::Quit),
            "version" => Some(ClientCommand::Version),
            "close" | "disconnect" => Some(ClientCommand::Close),
            "pwd" => Some(ClientCommand::Pwd),
            "ls" | "dir" => Some(ClientCommand::Ls),
            "cd" => Some(ClientCommand::Cd),
            "lcd" => Some(ClientCommand::Lcd),
            "open" => Some(ClientCommand::Open),
            "user" => Some(ClientCommand::User),
            _ => None,
        }
    }
}

/// Splits an input line into a command name and its arguments.
pub fn split_line(line: &str) -> Option<(&str, Vec<&str>)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_case_insensitive() {
        assert_eq!(ClientCommand::from_str("LS"), Some(ClientCommand::Ls));
        assert_eq!(ClientCommand::from_str("Dir"), Some(ClientCommand::Ls));
        assert_eq!(ClientCommand::from_str("BYE"), Some(ClientCommand::Quit));
        assert_eq!(ClientCommand::from_str("?"), Some(ClientCommand::Help));
        assert_eq!(ClientCommand::from_str("get"), None);
    }

    #[test]
    fn test_split_line() {
        assert_eq!(split_line("  ls  /pub\tout.txt "), Some(("ls", vec!["/pub", "out.txt"])));
        assert_eq!(split_line("pwd"), Some(("pwd", vec![])));
        assert_eq!(split_line("   "), None);
    }
}
