use crate::core_error::FtpClientError;
use log::{info, warn};
use std::io::{Error, ErrorKind};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;

/// Opens a TCP connection to `addr`, giving up after `timeout`.
pub async fn dial(addr: SocketAddr, timeout: Duration) -> Result<TcpStream, Error> {
    match time::timeout(timeout, TcpStream::connect(addr)).await {
        Ok(result) => result,
        Err(_) => Err(Error::new(
            ErrorKind::TimedOut,
            format!("connection to {} timed out after {:?}", addr, timeout),
        )),
    }
}

/// Tries every address in order and keeps the first connection that succeeds.
///
/// Failures are logged and collected; addresses after the first success are
/// never attempted.
pub async fn dial_first(
    host: &str,
    addrs: &[SocketAddr],
    timeout: Duration,
) -> Result<(TcpStream, SocketAddr), FtpClientError> {
    let mut attempts = Vec::with_capacity(addrs.len());

    for &addr in addrs {
        info!("Trying {}...", addr);
        match dial(addr, timeout).await {
            Ok(stream) => {
                info!("Connected to {} ({})", host, addr);
                return Ok((stream, addr));
            }
            Err(e) => {
                warn!("Failed to connect to {}: {}", addr, e);
                attempts.push((addr, e.to_string()));
            }
        }
    }

    Err(FtpClientError::Dial {
        host: host.to_string(),
        attempts,
    })
}
