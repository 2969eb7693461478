// Loopback FTP peers shared by the session and prompt tests
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

pub struct FakeServer {
    pub port: u16,
    handle: JoinHandle<String>,
}

impl FakeServer {
    /// Greets, then answers each received line with the next scripted reply.
    pub async fn scripted(replies: Vec<&'static str>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut reader = greet(socket).await;
            let mut replies = replies.into_iter();
            let mut received = String::new();
            while let Some(line) = next_line(&mut reader).await {
                received.push_str(&line);
                if let Some(reply) = replies.next() {
                    reader.get_mut().write_all(reply.as_bytes()).await.unwrap();
                }
            }
            received
        });
        Self { port, handle }
    }

    /// Answers like a small anonymous server whose only directory holds `listing`.
    pub async fn serving(listing: Vec<u8>) -> Self {
        Self::serve(listing, Duration::ZERO).await
    }

    /// Like [`FakeServer::serving`], but holds back the `226` after a
    /// transfer so the `150` reaches the client on its own.
    pub async fn serving_slowly(listing: Vec<u8>, completion_delay: Duration) -> Self {
        Self::serve(listing, completion_delay).await
    }

    /// Announces a passive port nobody listens on and answers LIST with
    /// `list_replies`, pausing between them so each arrives on its own.
    pub async fn refusing_data(list_replies: Vec<&'static str>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut reader = greet(socket).await;
            let mut received = String::new();

            while let Some(line) = next_line(&mut reader).await {
                received.push_str(&line);
                let verb = line.split_whitespace().next().unwrap_or("").to_string();
                let reply = match verb.as_str() {
                    "PASV" => {
                        let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
                        let data_port = closed.local_addr().unwrap().port();
                        drop(closed);
                        pasv_reply(data_port)
                    }
                    "LIST" => {
                        let (last, first) = list_replies.split_last().unwrap();
                        for reply in first {
                            reader.get_mut().write_all(reply.as_bytes()).await.unwrap();
                            sleep(Duration::from_millis(300)).await;
                        }
                        last.to_string()
                    }
                    "PWD" => "257 \"/\" is the current directory\r\n".to_string(),
                    "QUIT" => "221 Goodbye.\r\n".to_string(),
                    _ => "500 Unknown command.\r\n".to_string(),
                };
                reader.get_mut().write_all(reply.as_bytes()).await.unwrap();
            }
            received
        });
        Self { port, handle }
    }

    async fn serve(listing: Vec<u8>, completion_delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut reader = greet(socket).await;
            let mut data_listener: Option<TcpListener> = None;
            let mut received = String::new();

            while let Some(line) = next_line(&mut reader).await {
                received.push_str(&line);
                let verb = line.split_whitespace().next().unwrap_or("").to_string();
                let writer = reader.get_mut();
                let written = match verb.as_str() {
                    "USER" => writer.write_all(b"331 Please specify the password.\r\n").await,
                    "PASS" => writer.write_all(b"230 Login successful.\r\n").await,
                    "PWD" => writer.write_all(b"257 \"/\" is the current directory\r\n").await,
                    "CWD" => writer.write_all(b"250 Directory successfully changed.\r\n").await,
                    "QUIT" => writer.write_all(b"221 Goodbye.\r\n").await,
                    "PASV" => {
                        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
                        let data_port = listener.local_addr().unwrap().port();
                        data_listener = Some(listener);
                        writer.write_all(pasv_reply(data_port).as_bytes()).await
                    }
                    "LIST" => {
                        writer
                            .write_all(b"150 Here comes the directory listing.\r\n")
                            .await
                            .unwrap();
                        let listener = data_listener.take().expect("LIST before PASV");
                        let (mut data, _) = listener.accept().await.unwrap();
                        data.write_all(&listing).await.unwrap();
                        drop(data);
                        if !completion_delay.is_zero() {
                            sleep(completion_delay).await;
                        }
                        writer.write_all(b"226 Directory send OK.\r\n").await
                    }
                    _ => writer.write_all(b"500 Unknown command.\r\n").await,
                };
                written.unwrap();
            }
            received
        });
        Self { port, handle }
    }

    /// Everything the client sent, available once it has hung up.
    pub async fn received(self) -> String {
        self.handle.await.unwrap()
    }
}

fn pasv_reply(data_port: u16) -> String {
    format!(
        "227 Entering Passive Mode (127,0,0,1,{},{}).\r\n",
        data_port / 256,
        data_port % 256
    )
}

async fn greet(socket: TcpStream) -> BufReader<TcpStream> {
    let mut reader = BufReader::new(socket);
    reader
        .get_mut()
        .write_all(b"220 rouille test server\r\n")
        .await
        .unwrap();
    reader
}

async fn next_line(reader: &mut BufReader<TcpStream>) -> Option<String> {
    let mut line = String::new();
    match reader.read_line(&mut line).await {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}
