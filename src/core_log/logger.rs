use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use std::io::Write;

/// Default filter; interactive output stays free of log lines unless asked.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Initializes the logger with a custom format and colors.
///
/// `RUST_LOG` still takes precedence over the default filter.
pub fn init_logger(verbose: bool) {
    Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format(|buf, record| {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();
}
