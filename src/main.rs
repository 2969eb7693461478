mod config;
mod constants;
mod core_cli;
mod core_control;
mod core_error;
mod core_log;
mod core_network;
mod session;
#[cfg(test)]
mod test_utils;

use crate::config::Config;
use crate::core_cli::{Cli, Prompt};
use crate::core_log::logger::init_logger;
use crate::session::Session;
use anyhow::Result;
use clap::Parser;
use log::info;
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    // Built-in defaults unless a configuration file is given
    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    info!("Client configuration: {:?}", config.client);

    let session = Session::new(&config.client);
    let mut prompt = Prompt::new(
        session,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
        &config.client,
    );

    // Connection failures are reported and the prompt starts disconnected
    if let Some(host) = &args.host {
        let port = args.port.unwrap_or(config.client.default_port);
        prompt.open(host, port).await?;
    }

    prompt.run().await?;

    Ok(())
}
