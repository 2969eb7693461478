// Error kinds surfaced by the protocol engine
use crate::core_control::Response;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FtpClientError {
    #[error("Can't lookup host `{host}': {source}")]
    Resolution {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to connect to {host}: all {} address(es) failed", .attempts.len())]
    Dial {
        host: String,
        attempts: Vec<(SocketAddr, String)>,
    },

    #[error("Not connected.")]
    NotConnected,

    #[error("Already connected to {0}, use close first.")]
    AlreadyConnected(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response: {0:?}")]
    MalformedResponse(String),

    #[error("PASV command failed: {0}")]
    PasvNegotiation(String),

    /// The data connection failed; `replies` holds what the server said
    /// about the transfer on the control connection.
    #[error("{source}")]
    DataTransfer {
        #[source]
        source: Box<FtpClientError>,
        replies: Vec<Response>,
    },
}

impl FtpClientError {
    /// Errors after which the control socket must not be reused.
    pub fn is_connection_fatal(&self) -> bool {
        matches!(self, FtpClientError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_dial_error_message_counts_attempts() {
        let err = FtpClientError::Dial {
            host: "ftp.example.org".to_string(),
            attempts: vec![
                ("127.0.0.1:21".parse().unwrap(), "refused".to_string()),
                ("[::1]:21".parse().unwrap(), "timed out".to_string()),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Unable to connect to ftp.example.org: all 2 address(es) failed"
        );
    }

    #[test]
    fn test_only_io_errors_are_connection_fatal() {
        let io = FtpClientError::from(Error::new(ErrorKind::BrokenPipe, "pipe"));
        assert!(io.is_connection_fatal());
        assert!(!FtpClientError::NotConnected.is_connection_fatal());
        assert!(!FtpClientError::MalformedResponse("oops".into()).is_connection_fatal());

        let transfer = FtpClientError::DataTransfer {
            source: Box::new(FtpClientError::from(Error::new(
                ErrorKind::ConnectionRefused,
                "refused",
            ))),
            replies: vec![Response::new("425 Can't open data connection.\r\n")],
        };
        assert!(!transfer.is_connection_fatal());
        assert_eq!(transfer.to_string(), "refused");
    }
}
