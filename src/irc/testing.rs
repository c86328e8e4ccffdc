//! Helpers for driving a [`Client`] against an in-memory server.

use super::connection::Connection;
use super::framer::FramerSettings;
use super::observer::testing::RecordingObserver;
use super::{Client, ConnectionConfig};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, ReadHalf, WriteHalf};

/// The server end of a test connection.
pub struct Remote {
    reader: BufReader<ReadHalf<DuplexStream>>,
    writer: WriteHalf<DuplexStream>,
}

impl Remote {
    /// Next line written by the client, terminator included. `None` on EOF.
    pub async fn line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line).await.unwrap() {
            0 => None,
            _ => Some(line),
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.writer.write_all(line.as_bytes()).await.unwrap();
    }
}

pub fn test_config() -> ConnectionConfig {
    ConnectionConfig {
        server: "irc.example.net:6667".into(),
        nickname: "bot".into(),
        username: "bot".into(),
        realname: "Micro Bot".into(),
        password: None,
        idle_timeout: None,
    }
}

pub async fn start_client(config: ConnectionConfig) -> (Client, Arc<RecordingObserver>, Remote) {
    start_client_with_buffer(config, 64 * 1024).await
}

/// Like [`start_client`], over a pipe that holds at most `buffer` unread bytes.
pub async fn start_client_with_buffer(
    config: ConnectionConfig,
    buffer: usize,
) -> (Client, Arc<RecordingObserver>, Remote) {
    let (local, remote) = tokio::io::duplex(buffer);
    let (conn, source) = Connection::from_stream(local);
    let observer = Arc::new(RecordingObserver::default());
    let client = Client::start(
        config,
        conn,
        source,
        FramerSettings::default(),
        observer.clone(),
    );
    client.login().await.unwrap();
    let (reader, writer) = tokio::io::split(remote);
    let remote = Remote {
        reader: BufReader::new(reader),
        writer,
    };
    (client, observer, remote)
}

/// Consume the `NICK`/`USER` lines sent for [`test_config`].
pub async fn skip_login(remote: &mut Remote) {
    assert_eq!(remote.line().await.as_deref(), Some("NICK bot\r\n"));
    assert_eq!(remote.line().await.as_deref(), Some("USER bot 0 * :Micro Bot\r\n"));
}
