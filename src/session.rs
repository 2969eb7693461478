use crate::config::ClientConfig;
use crate::core_control::{Command, ControlChannel, FtpVerb, Response};
use crate::core_error::FtpClientError;
use crate::core_network::network::dial_first;
use crate::core_network::pasv::{parse_pasv_response, retrieve_data};
use crate::core_network::resolver::resolve_host;
use log::{debug, info, warn};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpStream;

type Result<T> = std::result::Result<T, FtpClientError>;

/// Output of one `ls`: the control replies and the raw listing bytes.
#[derive(Debug, Clone)]
pub struct Listing {
    pub pasv: Response,
    pub completion: Vec<Response>,
    pub data: Vec<u8>,
}

/// State of the single FTP connection driven by the client.
///
/// The control connection is owned here and nowhere else. The session counts
/// as connected exactly while it holds one.
#[derive(Debug)]
pub struct Session {
    control: Option<ControlChannel<TcpStream>>,
    remote_host: Option<String>,
    pub username: String,
    pub local_work_dir: PathBuf,
    pub default_local_work_dir: PathBuf,
    dial_timeout: Duration,
    response_buffer_size: usize,
}

impl Session {
    pub fn new(config: &ClientConfig) -> Self {
        let home = dirs::home_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            control: None,
            remote_host: None,
            username: current_os_user().unwrap_or_default(),
            local_work_dir: home.clone(),
            default_local_work_dir: home,
            dial_timeout: config.dial_timeout(),
            response_buffer_size: config.response_buffer_size,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.control.is_some()
    }

    pub fn remote_host(&self) -> Option<&str> {
        self.remote_host.as_deref()
    }

    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.control
            .as_ref()
            .and_then(|control| control.get_ref().peer_addr().ok())
    }

    /// Resolves `host`, dials the addresses in order and reads the greeting.
    pub async fn connect(&mut self, host: &str, port: u16) -> Result<Response> {
        if self.is_connected() {
            let current = self.remote_host.clone().unwrap_or_default();
            return Err(FtpClientError::AlreadyConnected(current));
        }

        let addrs = resolve_host(host, port).await?;
        let (stream, addr) = dial_first(host, &addrs, self.dial_timeout).await?;
        info!("Control connection open to {} ({})", host, addr);

        self.control = Some(ControlChannel::new(stream, self.response_buffer_size));
        self.remote_host = Some(host.to_string());
        self.recv_response().await
    }

    /// Sends one command line. Never touches a socket while disconnected.
    pub async fn send_command(&mut self, command: &Command) -> Result<()> {
        let control = self.control.as_mut().ok_or(FtpClientError::NotConnected)?;
        let result = control.send(command).await;
        self.check_control(result)
    }

    /// Performs exactly one read on the control connection.
    pub async fn recv_response(&mut self) -> Result<Response> {
        let control = self.control.as_mut().ok_or(FtpClientError::NotConnected)?;
        let result = control.recv().await;
        self.check_control(result)
    }

    async fn execute(&mut self, command: &Command) -> Result<Response> {
        self.send_command(command).await?;
        self.recv_response().await
    }

    /// Drops the control connection after an I/O failure on it.
    fn check_control<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            if e.is_connection_fatal() {
                warn!("Control connection lost: {}", e);
                self.control = None;
                self.remote_host = None;
            }
        }
        result
    }

    /// USER, PASS and optionally ACCT. Reply codes are returned, not judged.
    pub async fn authenticate(
        &mut self,
        username: &str,
        password: &str,
        account: Option<&str>,
    ) -> Result<Vec<Response>> {
        let mut replies = Vec::with_capacity(3);
        replies.push(
            self.execute(&Command::new(FtpVerb::USER).arg(username))
                .await?,
        );
        self.username = username.to_string();
        replies.push(
            self.execute(&Command::new(FtpVerb::PASS).arg(password))
                .await?,
        );
        if let Some(account) = account {
            replies.push(
                self.execute(&Command::new(FtpVerb::ACCT).arg(account))
                    .await?,
            );
        }
        Ok(replies)
    }

    pub async fn print_working_directory(&mut self) -> Result<Response> {
        self.execute(&Command::new(FtpVerb::PWD)).await
    }

    pub async fn change_working_directory(&mut self, path: &str) -> Result<Response> {
        self.execute(&Command::new(FtpVerb::CWD).arg(path)).await
    }

    /// PASV, then LIST, then drain the data connection, then read the
    /// completion reply. The steps run strictly one after the other.
    pub async fn list(&mut self, remote_dir: Option<&str>) -> Result<Listing> {
        let pasv = self.execute(&Command::new(FtpVerb::PASV)).await?;
        let endpoint = parse_pasv_response(&pasv)?;
        debug!("Passive endpoint {}", endpoint);

        self.send_command(&Command::new(FtpVerb::LIST).arg(remote_dir.unwrap_or("")))
            .await?;

        let data = match retrieve_data(&endpoint, self.dial_timeout).await {
            Ok(data) => data,
            Err(e) => {
                warn!("Data transfer from {} failed: {}", endpoint, e);
                let replies = self.recv_failed_transfer_replies().await;
                return Err(FtpClientError::DataTransfer {
                    source: Box::new(e),
                    replies,
                });
            }
        };

        let mut completion = vec![self.recv_response().await?];
        if completion[0].is_preliminary() {
            completion.push(self.recv_response().await?);
        }

        Ok(Listing {
            pasv,
            completion,
            data,
        })
    }

    /// Collects the replies to a LIST whose data connection failed, with the
    /// same extra read after a 1xx-only reply as a successful transfer.
    /// Stops early if the control connection is lost.
    async fn recv_failed_transfer_replies(&mut self) -> Vec<Response> {
        let mut replies = Vec::with_capacity(2);
        while replies.len() < 2 {
            match self.recv_response().await {
                Ok(reply) => {
                    let preliminary = reply.is_preliminary();
                    replies.push(reply);
                    if !preliminary {
                        break;
                    }
                }
                Err(e) => {
                    debug!("No completion reply: {}", e);
                    break;
                }
            }
        }
        replies
    }

    /// Sends QUIT if connected and forgets the control connection.
    ///
    /// Calling it while disconnected does nothing.
    pub async fn disconnect(&mut self) -> Result<()> {
        if !self.is_connected() {
            return Ok(());
        }

        let quit = self.execute(&Command::new(FtpVerb::QUIT)).await;
        if let Some(control) = self.control.take() {
            control.shutdown().await;
        }
        if let Some(host) = self.remote_host.take() {
            info!("Disconnected from {}", host);
        }

        let reply = quit?;
        debug!("Discarded QUIT reply: {}", reply.text().trim_end());
        Ok(())
    }
}

fn current_os_user() -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|name| !name.is_empty())
}
