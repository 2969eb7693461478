use crate::core_control::{Command, Response};
use crate::core_error::FtpClientError;
use log::debug;
use std::io::{Error, ErrorKind};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Half-duplex command/response cycle over the control connection.
///
/// Every response is exactly one read of at most `buffer_size` bytes. Replies
/// longer than that, or split across TCP segments, are only partially seen.
#[derive(Debug)]
pub struct ControlChannel<T> {
    stream: T,
    buffer_size: usize,
}

impl<T> ControlChannel<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: T, buffer_size: usize) -> Self {
        Self {
            stream,
            buffer_size,
        }
    }

    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    pub async fn send(&mut self, command: &Command) -> Result<(), FtpClientError> {
        debug!("---> {}", command.redacted());
        self.stream.write_all(command.to_line().as_bytes()).await?;
        self.stream.flush().await?;
        Ok(())
    }

    pub async fn recv(&mut self) -> Result<Response, FtpClientError> {
        let mut buffer = vec![0u8; self.buffer_size];
        let n = self.stream.read(&mut buffer).await?;
        if n == 0 {
            return Err(Error::new(
                ErrorKind::UnexpectedEof,
                "Connection closed by remote host",
            )
            .into());
        }
        let response = Response::from_bytes(&buffer[..n]);
        debug!("<--- {}", response.text().trim_end());
        Ok(response)
    }

    pub async fn shutdown(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("Control connection shutdown failed: {}", e);
        }
    }
}
