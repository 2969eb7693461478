// Help and usage tables for the interactive prompt

pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("?", "print local help information"),
    ("bye", "terminate ftp session and exit"),
    ("cd", "change remote working directory"),
    ("close", "terminate ftp session"),
    ("dir", "list contents of remote path"),
    ("disconnect", "terminate ftp session"),
    ("exit", "terminate ftp session and exit"),
    ("help", "print local help information"),
    ("lcd", "change local working directory"),
    ("ls", "list contents of remote path"),
    ("open", "connect to remote ftp server"),
    ("pwd", "print working directory on remote machine"),
    ("quit", "terminate ftp session and exit"),
    ("usage", "show usage of ftp command"),
    ("user", "send new user information"),
    ("version", "show the client version"),
];

// Optional arguments are shown in `[]`.
pub const COMMAND_USAGE: &[(&str, &str)] = &[
    ("?", "? [cmd1] [cmd2] ..."),
    ("cd", "cd remote_dir"),
    ("dir", "dir [remote_dir|remote_file] [local_output_file]"),
    ("help", "help [cmd1] [cmd2] ..."),
    ("lcd", "lcd [local_directory]"),
    ("ls", "ls [remote_dir|remote_file] [local_output_file]"),
    ("open", "open remote_host [port]"),
    ("usage", "usage [cmd1] [cmd2] ..."),
    ("user", "user username [password] [account]"),
];

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    let name = name.to_ascii_lowercase();
    table
        .iter()
        .find(|(cmd, _)| *cmd == name)
        .map(|(_, text)| *text)
}

pub fn help_line(name: &str) -> String {
    match lookup(COMMAND_HELP, name) {
        Some(text) => format!("{}\t{}", name.to_ascii_lowercase(), text),
        None => format!("?Invalid help command `{}'", name),
    }
}

pub fn usage_line(name: &str) -> String {
    match lookup(COMMAND_USAGE, name) {
        Some(text) => format!("Usage: {}", text),
        None => format!("?Invalid usage command `{}'", name),
    }
}

/// Command names laid out in columns, as printed by a bare `help`.
pub fn command_summary() -> String {
    let mut out = String::from("Commands are:\n\n");
    for row in COMMAND_HELP.chunks(4) {
        let line: Vec<String> = row.iter().map(|(name, _)| format!("{:<16}", name)).collect();
        out.push_str(line.concat().trim_end());
        out.push('\n');
    }
    out
}
