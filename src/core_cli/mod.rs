pub mod command;
pub mod core_cli;
pub mod help;
pub mod prompt;

pub use core_cli::Cli;
pub use prompt::Prompt;
