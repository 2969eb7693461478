use crate::core_error::FtpClientError;
use log::debug;
use std::io::{Error, ErrorKind};
use std::net::SocketAddr;
use tokio::net::lookup_host;

/// Resolves `host` once, keeping the order the system resolver returned.
///
/// No caching and no retries: every connect performs a fresh lookup.
pub async fn resolve_host(host: &str, port: u16) -> Result<Vec<SocketAddr>, FtpClientError> {
    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(|source| FtpClientError::Resolution {
            host: host.to_string(),
            source,
        })?
        .collect();

    if addrs.is_empty() {
        return Err(FtpClientError::Resolution {
            host: host.to_string(),
            source: Error::new(ErrorKind::NotFound, "no addresses found"),
        });
    }

    debug!("Resolved {} to {:?}", host, addrs);
    Ok(addrs)
}
