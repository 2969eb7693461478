use crate::constants::REQUEST_SUFFIX;
use std::fmt;

/// Verbs the client ever puts on the control connection.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum FtpVerb {
    USER,
    PASS,
    ACCT,
    QUIT,
    PWD,
    CWD,
    LIST,
    PASV,
}

impl FtpVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            FtpVerb::USER => "USER",
            FtpVerb::PASS => "PASS",
            FtpVerb::ACCT => "ACCT",
            FtpVerb::QUIT => "QUIT",
            FtpVerb::PWD => "PWD",
            FtpVerb::CWD => "CWD",
            FtpVerb::LIST => "LIST",
            FtpVerb::PASV => "PASV",
        }
    }
}

impl fmt::Display for FtpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single request line for the control connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: FtpVerb,
    pub args: Vec<String>,
}

impl Command {
    pub fn new(verb: FtpVerb) -> Self {
        Self {
            verb,
            args: Vec::new(),
        }
    }

    pub fn arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Verb and arguments joined by single spaces, CRLF terminated.
    ///
    /// An empty argument is kept, so `LIST` with an empty path becomes `LIST \r\n`.
    pub fn to_line(&self) -> String {
        let mut line = String::from(self.verb.as_str());
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line.push_str(REQUEST_SUFFIX);
        line
    }

    /// Rendering used in logs; credentials never reach the log output.
    pub fn redacted(&self) -> String {
        match self.verb {
            FtpVerb::PASS | FtpVerb::ACCT => format!("{} ****", self.verb),
            _ => self.to_line().trim_end_matches(REQUEST_SUFFIX).to_string(),
        }
    }
}
