// src/constants.rs

pub const FTP_SERVER_DEFAULT_PORT: u16 = 21;
pub const DIAL_TIMEOUT_SECONDS: u64 = 30;
pub const RESPONSE_BUFFER_SIZE: usize = 1024;
pub const REQUEST_SUFFIX: &str = "\r\n";
pub const DEFAULT_PROMPT: &str = "ftp> ";

pub const RESP_CODE_ENTERING_PASSIVE_MODE: u16 = 227;

pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");
