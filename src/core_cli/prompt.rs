use crate::config::ClientConfig;
use crate::constants::CLIENT_VERSION;
use crate::core_cli::command::{split_line, ClientCommand};
use crate::core_cli::help::{command_summary, help_line, usage_line};
use crate::core_control::Response;
use crate::core_error::FtpClientError;
use crate::session::Session;
use log::debug;
use std::io::{self, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Interactive read-eval-print loop around a [`Session`].
///
/// Only renders what the session returns; all protocol work stays in the
/// session.
pub struct Prompt<R, W> {
    session: Session,
    input: R,
    output: W,
    prompt: String,
    default_port: u16,
    running: bool,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(session: Session, input: R, output: W, config: &ClientConfig) -> Self {
        Self {
            session,
            input,
            output,
            prompt: config.prompt.clone(),
            default_port: config.default_port,
            running: false,
        }
    }

    /// Reads commands until `quit` or end of input.
    pub async fn run(&mut self) -> io::Result<()> {
        self.running = true;
        while self.running {
            let label = self.prompt.clone();
            let line = match self.read_line(&label).await? {
                Some(line) => line,
                None => {
                    writeln!(self.output)?;
                    self.quit().await?;
                    break;
                }
            };
            if let Some((name, args)) = split_line(&line) {
                self.execute(name, &args).await?;
            }
        }
        Ok(())
    }

    pub async fn execute(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        let command = match ClientCommand::from_str(name) {
            Some(command) => command,
            None => return writeln!(self.output, "?Invalid command."),
        };
        debug!("Executing {:?} with {:?}", command, args);

        match command {
            ClientCommand::Help => self.help(args),
            ClientCommand::Usage => self.usage_of(args),
            ClientCommand::Quit => self.quit().await,
            ClientCommand::Version => writeln!(self.output, "rouilleftp v{}", CLIENT_VERSION),
            ClientCommand::Close => self.close().await,
            ClientCommand::Pwd => self.pwd().await,
            ClientCommand::Cd => self.cd(name, args).await,
            ClientCommand::Ls => self.ls(name, args).await,
            ClientCommand::Lcd => self.lcd(name, args),
            ClientCommand::Open => self.open_command(name, args).await,
            ClientCommand::User => self.user(name, args).await,
        }
    }

    /// Connects to `host`, prints the greeting and runs the login prompts.
    pub async fn open(&mut self, host: &str, port: u16) -> io::Result<()> {
        match self.session.connect(host, port).await {
            Ok(greeting) => {
                if let Some(addr) = self.session.peer_addr() {
                    writeln!(self.output, "Connected to {}.", addr.ip())?;
                }
                self.print_response(&greeting)?;
                self.login(None, None, None).await
            }
            Err(e) => self.report(e),
        }
    }

    async fn read_line(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print_response(&mut self, response: &Response) -> io::Result<()> {
        let text = response.text();
        write!(self.output, "{}", text)?;
        if !text.ends_with('\n') {
            writeln!(self.output)?;
        }
        Ok(())
    }

    fn report(&mut self, err: FtpClientError) -> io::Result<()> {
        match &err {
            FtpClientError::Dial { attempts, .. } => {
                for (addr, reason) in attempts {
                    writeln!(self.output, "Trying {}...", addr.ip())?;
                    writeln!(self.output, "ftp: {}", reason)?;
                }
            }
            FtpClientError::DataTransfer { replies, .. } => {
                for reply in replies {
                    self.print_response(reply)?;
                }
            }
            _ => {}
        }
        writeln!(self.output, "ftp: {}", err)
    }

    fn usage(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.output, "{}", usage_line(name))
    }

    fn help(&mut self, args: &[&str]) -> io::Result<()> {
        if args.is_empty() {
            return write!(self.output, "{}", command_summary());
        }
        for name in args {
            writeln!(self.output, "{}", help_line(name))?;
        }
        Ok(())
    }

    fn usage_of(&mut self, args: &[&str]) -> io::Result<()> {
        if args.is_empty() {
            return self.usage("usage");
        }
        for name in args {
            self.usage(name)?;
        }
        Ok(())
    }

    async fn close(&mut self) -> io::Result<()> {
        if let Err(e) = self.session.disconnect().await {
            self.report(e)?;
        }
        Ok(())
    }

    async fn quit(&mut self) -> io::Result<()> {
        self.running = false;
        self.close().await
    }

    async fn pwd(&mut self) -> io::Result<()> {
        match self.session.print_working_directory().await {
            Ok(reply) => self.print_response(&reply),
            Err(e) => self.report(e),
        }
    }

    async fn cd(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        let remote_dir = match args {
            [] => match self.read_line("(remote-directory) ").await? {
                Some(dir) if !dir.trim().is_empty() => dir.trim().to_string(),
                _ => return self.usage(name),
            },
            [dir] => dir.to_string(),
            _ => return self.usage(name),
        };

        match self.session.change_working_directory(&remote_dir).await {
            Ok(reply) => self.print_response(&reply),
            Err(e) => self.report(e),
        }
    }

    fn local_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.session.local_work_dir.join(path)
        }
    }

    async fn ls(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        if args.len() > 2 {
            return self.usage(name);
        }
        let remote_dir = args.first().copied();

        let mut output_file = None;
        if let Some(file) = args.get(1) {
            let path = self.local_path(file);
            match std::fs::File::create(&path) {
                Ok(f) => output_file = Some((path, f)),
                Err(_) => {
                    return writeln!(
                        self.output,
                        "ftp: Can't access `{}': No such file or directory",
                        path.display()
                    );
                }
            }
        }

        let listing = match self.session.list(remote_dir).await {
            Ok(listing) => listing,
            Err(e) => return self.report(e),
        };

        self.print_response(&listing.pasv)?;
        match output_file {
            Some((path, mut file)) => {
                if let Err(e) = file.write_all(&listing.data).and_then(|_| file.flush()) {
                    writeln!(self.output, "ftp: {}: {}", path.display(), e)?;
                }
            }
            None => {
                self.output.write_all(&listing.data)?;
            }
        }
        for reply in &listing.completion {
            self.print_response(reply)?;
        }
        Ok(())
    }

    fn lcd(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        let target = match args {
            [] => self.session.default_local_work_dir.clone(),
            [dir] => self.local_path(dir),
            _ => return self.usage(name),
        };

        match std::fs::metadata(&target) {
            Ok(meta) if meta.is_dir() => {
                writeln!(self.output, "Local directory now: {}", target.display())?;
                self.session.local_work_dir = target;
                Ok(())
            }
            Ok(_) => writeln!(
                self.output,
                "ftp: Can't chdir `{}': No such file or directory",
                target.display()
            ),
            Err(e) => writeln!(self.output, "ftp: {}: {}", target.display(), e),
        }
    }

    async fn open_command(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        if self.session.is_connected() {
            let host = self.session.remote_host().unwrap_or_default().to_string();
            return self.report(FtpClientError::AlreadyConnected(host));
        }

        let typed;
        let args: Vec<&str> = if args.is_empty() {
            typed = match self.read_line("(to) ").await? {
                Some(line) => line,
                None => return self.usage(name),
            };
            typed.split_whitespace().collect()
        } else {
            args.to_vec()
        };

        let (host, port) = match args.as_slice() {
            [host] => (*host, self.default_port),
            [host, port] => match port.parse::<u16>() {
                Ok(port) => (*host, port),
                Err(_) => return self.usage(name),
            },
            _ => return self.usage(name),
        };
        let host = host.to_string();
        self.open(&host, port).await
    }

    async fn user(&mut self, name: &str, args: &[&str]) -> io::Result<()> {
        if !self.session.is_connected() {
            return self.report(FtpClientError::NotConnected);
        }

        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        match owned.as_slice() {
            [] => match self.read_line("Username: ").await? {
                Some(username) if !username.trim().is_empty() => {
                    self.login(Some(username.trim().to_string()), None, None)
                        .await
                }
                _ => self.usage(name),
            },
            [username] => self.login(Some(username.clone()), None, None).await,
            [username, password] => {
                self.login(Some(username.clone()), Some(password.clone()), None)
                    .await
            }
            [username, password, account] => {
                self.login(
                    Some(username.clone()),
                    Some(password.clone()),
                    Some(account.clone()),
                )
                .await
            }
            _ => self.usage(name),
        }
    }

    async fn login(
        &mut self,
        username: Option<String>,
        password: Option<String>,
        account: Option<String>,
    ) -> io::Result<()> {
        let username = match username {
            Some(username) => username,
            None => {
                let host = self.session.remote_host().unwrap_or_default().to_string();
                let default = self.session.username.clone();
                let label = format!("Name ({}:{}): ", host, default);
                match self.read_line(&label).await? {
                    Some(typed) if !typed.trim().is_empty() => typed.trim().to_string(),
                    _ if !default.is_empty() => default,
                    _ => return writeln!(self.output, "ftp: Login failed."),
                }
            }
        };
        let password = match password {
            Some(password) => password,
            None => self.read_line("Password: ").await?.unwrap_or_default(),
        };

        match self
            .session
            .authenticate(&username, &password, account.as_deref())
            .await
        {
            Ok(replies) => {
                for reply in &replies {
                    self.print_response(reply)?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }
}
