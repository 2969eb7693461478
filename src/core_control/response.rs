use crate::core_error::FtpClientError;
use std::fmt;

/// Raw text of one control channel read.
///
/// The status code is only parsed when a caller asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    text: String,
}

impl Response {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into() }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// First whitespace delimited token, which must be exactly three digits.
    pub fn status_code(&self) -> Result<u16, FtpClientError> {
        let token = self
            .text
            .split_whitespace()
            .next()
            .ok_or_else(|| FtpClientError::MalformedResponse(self.text.clone()))?;
        parse_code(token).ok_or_else(|| FtpClientError::MalformedResponse(self.text.clone()))
    }

    /// True when the last reply line in this read is a 1xx preliminary reply.
    pub fn is_preliminary(&self) -> bool {
        self.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .last()
            .and_then(|line| line.get(0..3))
            .and_then(parse_code)
            .is_some_and(|code| (100..200).contains(&code))
    }
}

fn parse_code(token: &str) -> Option<u16> {
    if token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code() {
        let resp = Response::new("230 Login successful.\r\n");
        assert_eq!(resp.status_code().unwrap(), 230);
        let resp = Response::new("530 Login incorrect.\r\n");
        assert_eq!(resp.status_code().unwrap(), 530);
    }

    #[test]
    fn test_malformed_status_code() {
        for text in ["", "   \r\n", "hello world", "22 short", "2200 long", "220-Welcome"] {
            let err = Response::new(text).status_code().unwrap_err();
            assert!(
                matches!(err, FtpClientError::MalformedResponse(_)),
                "{text:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_preliminary_detection() {
        assert!(Response::new("150 Here comes the directory listing.\r\n").is_preliminary());
        assert!(!Response::new("150 Opening.\r\n226 Directory send OK.\r\n").is_preliminary());
        assert!(!Response::new("226 Transfer complete.\r\n").is_preliminary());
        assert!(!Response::new("").is_preliminary());
    }

    #[test]
    fn test_lossy_text() {
        let resp = Response::from_bytes(b"257 \"/home/\xff\" is the current directory\r\n");
        assert_eq!(resp.status_code().unwrap(), 257);
        assert!(resp.text().contains('\u{fffd}'));
    }
}
