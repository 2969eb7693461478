use crate::constants::RESP_CODE_ENTERING_PASSIVE_MODE;
use crate::core_control::Response;
use crate::core_error::FtpClientError;
use crate::core_network::network::dial;
use log::debug;
use std::fmt;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Address announced by the server in a `227 Entering Passive Mode` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassiveEndpoint {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl PassiveEndpoint {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.host, self.port))
    }
}

impl fmt::Display for PassiveEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Extracts `h1,h2,h3,h4,p1,p2` from between the first `(` and the last `)`.
pub fn parse_pasv_tuple(text: &str) -> Result<PassiveEndpoint, FtpClientError> {
    let invalid = |reason: &str| {
        FtpClientError::PasvNegotiation(format!("{} in reply {:?}", reason, text.trim_end()))
    };

    let start = text.find('(').ok_or_else(|| invalid("missing `('"))?;
    let end = text.rfind(')').ok_or_else(|| invalid("missing `)'"))?;
    if end < start {
        return Err(invalid("unbalanced parentheses"));
    }

    let parts: Vec<&str> = text[start + 1..end].split(',').collect();
    if parts.len() != 6 {
        return Err(invalid("expected six comma separated numbers"));
    }

    let mut numbers = [0u8; 6];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<u8>()
            .map_err(|_| invalid("invalid number"))?;
    }

    Ok(PassiveEndpoint {
        host: Ipv4Addr::new(numbers[0], numbers[1], numbers[2], numbers[3]),
        port: (numbers[4] as u16) * 256 + numbers[5] as u16,
    })
}

/// Validates a PASV reply and returns the data connection endpoint.
pub fn parse_pasv_response(response: &Response) -> Result<PassiveEndpoint, FtpClientError> {
    let endpoint = parse_pasv_tuple(response.text())?;
    let code = response.status_code()?;
    if code != RESP_CODE_ENTERING_PASSIVE_MODE {
        return Err(FtpClientError::PasvNegotiation(format!(
            "unexpected reply code {}",
            code
        )));
    }
    Ok(endpoint)
}

/// Connects to the passive endpoint and reads until the server closes it.
///
/// The data connection is closed before returning, whether the read
/// succeeded or not.
pub async fn retrieve_data(
    endpoint: &PassiveEndpoint,
    timeout: Duration,
) -> Result<Vec<u8>, FtpClientError> {
    let mut stream = dial(endpoint.socket_addr(), timeout).await?;
    debug!("Data connection established with {}", endpoint);

    let mut data = Vec::new();
    let drained = stream.read_to_end(&mut data).await;
    if let Err(e) = stream.shutdown().await {
        debug!("Data connection shutdown failed: {}", e);
    }
    drop(stream);

    drained?;
    debug!("Received {} bytes over the data connection", data.len());
    Ok(data)
}
