use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouilleftp", about = "A minimal FTP client written in Rust.")]
pub struct Cli {
    /// Host to connect to on startup
    pub host: Option<String>,

    /// Port of the FTP server (defaults to the configured port, 21)
    pub port: Option<u16>,

    /// Path to the configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["rouilleftp"]).unwrap();
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_host_and_port() {
        let cli = Cli::try_parse_from(["rouilleftp", "-v", "ftp.example.org", "2121"]).unwrap();
        assert_eq!(cli.host.as_deref(), Some("ftp.example.org"));
        assert_eq!(cli.port, Some(2121));
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["rouilleftp", "localhost", "http"]).is_err());
    }
}
