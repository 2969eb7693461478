// Control connection: outbound command lines and single-read responses
pub mod channel;
pub mod command;
pub mod response;

pub use channel::ControlChannel;
pub use command::{Command, FtpVerb};
pub use response::Response;
