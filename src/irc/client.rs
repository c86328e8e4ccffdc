//! The protocol client: command builders, login and the read loop.
//!
//! [`Client`] is a cheap handle; clones share one connection. Plugins hold a
//! clone and call [`Client::join`], [`Client::message`] and
//! [`Client::disconnect`]. All output goes through the [`LineFramer`], so
//! nothing reaches the wire unframed or unthrottled.

use super::connection::{Connection, LineSource, MAX_INBOUND_LEN};
use super::error::{IrcError, Result};
use super::format::strip_formatting;
use super::framer::{FramerSettings, LineFramer};
use super::message::{remainder, Command, Message};
use super::observer::{Observer, SessionEvent};
use irc_proto::Command as ProtoCommand;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::codec::AnyDelimiterCodecError;

/// Farewell sent with `QUIT` by [`Client::disconnect`].
pub const QUIT_MESSAGE: &str = "Disconnecting";

/// How long [`Client::disconnect`] waits for the `QUIT` to be written.
pub const QUIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Connection settings for one session. Supplied by the config loader.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// `host:port`
    pub server: String,
    pub nickname: String,
    pub username: String,
    pub realname: String,
    pub password: Option<String>,
    /// When set, the read loop sends a `PING` after this much silence and
    /// drops the session after twice as much.
    pub idle_timeout: Option<Duration>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server", &self.server)
            .field("nickname", &self.nickname)
            .field("username", &self.username)
            .field("realname", &self.realname)
            .field("password", &self.password.as_ref().map(|_| super::message::REDACTED))
            .field("idle_timeout", &self.idle_timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    config: ConnectionConfig,
    framer: LineFramer,
    observer: Arc<dyn Observer>,
    disconnecting: AtomicBool,
    done: watch::Sender<bool>,
}

impl Client {
    /// Connect to `config.server`, start the read loop and log in.
    ///
    /// This call holds the only handle, so a failed login closes the
    /// connection before the error is returned. Use [`Client::start`] and
    /// [`Client::login`] to keep the session open after a failed login.
    pub async fn connect(config: ConnectionConfig, observer: Arc<dyn Observer>) -> Result<Client> {
        let (conn, source) = match Connection::connect(&config.server).await {
            Ok(parts) => parts,
            Err(e) => {
                observer.error(&format!("failed to connect: {}", e));
                return Err(e);
            }
        };
        observer.info(&format!("connected to {}", config.server));

        let client = Self::start(config, conn, source, FramerSettings::default(), observer);
        if let Err(e) = client.login().await {
            client.inner.framer.connection().close().await;
            return Err(e);
        }
        Ok(client)
    }

    /// Start a session over an already open connection. The read loop runs
    /// from here on; nothing is sent until [`Client::login`].
    pub fn start(
        config: ConnectionConfig,
        conn: Connection,
        source: LineSource,
        settings: FramerSettings,
        observer: Arc<dyn Observer>,
    ) -> Client {
        let (done, _) = watch::channel(false);
        let client = Client {
            inner: Arc::new(Inner {
                config,
                framer: LineFramer::new(conn, settings),
                observer,
                disconnecting: AtomicBool::new(false),
                done,
            }),
        };

        tokio::spawn(read_loop(client.clone(), source));
        client
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.inner.config
    }

    pub fn is_connected(&self) -> bool {
        !self.inner.framer.connection().is_closed()
    }

    /// Resolves once the read loop has stopped.
    pub async fn wait_closed(&self) {
        let mut done = self.inner.done.subscribe();
        let _ = done.wait_for(|finished| *finished).await;
    }

    /// Send `PASS` (when configured), `NICK` and `USER`. On failure the
    /// connection stays open and the caller decides what to do with it.
    pub async fn login(&self) -> Result<()> {
        if let Err(e) = self.send_login().await {
            self.inner.observer.error(&format!("failed to login: {}", e));
            return Err(e);
        }
        self.inner
            .observer
            .info(&format!("logged in as {}", self.inner.config.nickname));
        Ok(())
    }

    async fn send_login(&self) -> Result<()> {
        let config = &self.inner.config;
        if let Some(password) = config.password.as_deref() {
            self.authenticate(password)
                .await
                .map_err(|e| IrcError::login("PASS", e))?;
        }
        self.set_nickname(&config.nickname)
            .await
            .map_err(|e| IrcError::login("NICK", e))?;
        self.register_user(&config.username, &config.realname)
            .await
            .map_err(|e| IrcError::login("USER", e))?;
        Ok(())
    }

    async fn send(&self, cmd: Command) -> Result<()> {
        self.inner
            .observer
            .debug(&format!("sending {}: {}", cmd.verb(), cmd));
        self.inner.framer.send(cmd.to_wire().as_bytes()).await
    }

    pub async fn join(&self, channel: &str, key: &str) -> Result<()> {
        self.send(join_command(channel, key)?).await
    }

    pub async fn set_nickname(&self, nick: &str) -> Result<()> {
        self.send(nick_command(nick)?).await
    }

    /// Send `PASS`. An empty secret sends nothing.
    pub async fn authenticate(&self, secret: &str) -> Result<()> {
        match pass_command(secret)? {
            Some(cmd) => self.send(cmd).await,
            None => Ok(()),
        }
    }

    pub async fn register_user(&self, username: &str, realname: &str) -> Result<()> {
        self.send(user_command(username, realname)?).await
    }

    /// Send `text` to `target`. Newlines start new messages and long lines
    /// are wrapped so every `PRIVMSG` fits on one wire line. All pieces are
    /// written back to back.
    pub async fn message(&self, target: &str, text: &str) -> Result<()> {
        let chunk_len = self.inner.framer.settings().chunk_len();
        let commands = privmsg_commands(target, text, chunk_len)?;
        if commands.is_empty() {
            return Ok(());
        }

        let mut payload = String::new();
        for cmd in &commands {
            self.inner
                .observer
                .debug(&format!("sending PRIVMSG: {}", strip_formatting(&cmd.to_string())));
            payload.push_str(&cmd.to_wire());
            payload.push('\n');
        }
        self.inner.framer.send(payload.as_bytes()).await
    }

    pub async fn ping(&self, token: &str) -> Result<()> {
        self.send(Command::new("PING").trailing(token)).await
    }

    /// Answer a keepalive challenge, echoing its token.
    pub async fn pong(&self, token: &str) -> Result<()> {
        self.send(Command::new("PONG").last_param(token)).await
    }

    pub async fn quit(&self, message: &str) -> Result<()> {
        self.send(Command::new("QUIT").trailing(message)).await
    }

    /// Say goodbye and close the connection. Only the first call does
    /// anything. The `QUIT` gets [`QUIT_TIMEOUT`] to go out; the connection is
    /// closed either way.
    pub async fn disconnect(&self) {
        if self.inner.disconnecting.swap(true, Ordering::SeqCst) {
            return;
        }
        match tokio::time::timeout(QUIT_TIMEOUT, self.quit(QUIT_MESSAGE)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => self
                .inner
                .observer
                .debug(&format!("QUIT not delivered: {}", e)),
            Err(_) => self.inner.observer.warn("QUIT timed out, closing anyway"),
        }
        if self.inner.framer.connection().close().await {
            self.inner.observer.info("disconnected");
        }
    }
}

async fn read_loop(client: Client, mut source: LineSource) {
    let observer = client.inner.observer.clone();
    let idle_timeout = client.inner.config.idle_timeout;
    let mut pinged = false;

    loop {
        let next = match idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, source.next_line()).await {
                Ok(next) => next,
                Err(_) if pinged => {
                    observer.error(&format!("no traffic for {:?}, dropping connection", limit * 2));
                    client.disconnect().await;
                    break;
                }
                Err(_) => {
                    pinged = true;
                    if let Err(e) = client.ping(&client.inner.config.nickname).await {
                        observer.warn(&format!("failed to send PING: {}", e));
                    }
                    continue;
                }
            },
            None => source.next_line().await,
        };
        pinged = false;

        let line = match next {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                observer.warn(&format!(
                    "discarding inbound line longer than {} bytes",
                    MAX_INBOUND_LEN
                ));
                continue;
            }
            Err(AnyDelimiterCodecError::Io(e)) => {
                observer.error(&format!("read failed: {}", e));
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let msg: Message = match line.parse() {
            Ok(msg) => msg,
            Err(e) => {
                observer.warn(&format!("unparseable line {:?}: {}", line, e));
                continue;
            }
        };

        match &msg.command {
            ProtoCommand::PING(token, _) => {
                if let Err(e) = client.pong(token).await {
                    observer.warn(&format!("failed to answer PING: {}", e));
                }
            }
            ProtoCommand::Raw(verb, _) if verb.eq_ignore_ascii_case("PING") => {
                observer.warn("malformed PING, ignoring");
            }
            command if is_error(command) => {
                observer.event(SessionEvent::ServerError(remainder(&line).to_string()));
                client.disconnect().await;
                break;
            }
            _ => observer.event(SessionEvent::Inbound(msg)),
        }
    }

    client.inner.framer.connection().close().await;
    observer.event(SessionEvent::Closed);
    client.inner.done.send_replace(true);
}

/// `ERROR` parses as `Command::ERROR` with one argument and as a raw command
/// otherwise.
fn is_error(command: &ProtoCommand) -> bool {
    match command {
        ProtoCommand::ERROR(_) => true,
        ProtoCommand::Raw(verb, _) => verb.eq_ignore_ascii_case("ERROR"),
        _ => false,
    }
}

fn contains_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

fn require_token(field: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(IrcError::validation(field, "must not be empty"));
    }
    if contains_whitespace(value) {
        return Err(IrcError::validation(field, "must not contain whitespace"));
    }
    Ok(())
}

/// `#name` with exactly one leading `#` added by us.
pub fn canonical_channel(channel: &str) -> Result<String> {
    let name = channel.strip_prefix('#').unwrap_or(channel);
    require_token("channel", name)?;
    if name.contains(',') {
        return Err(IrcError::validation("channel", "must not contain ','"));
    }
    Ok(format!("#{}", name))
}

pub fn join_command(channel: &str, key: &str) -> Result<Command> {
    let cmd = Command::new("JOIN").arg(canonical_channel(channel)?);
    if key.is_empty() {
        return Ok(cmd);
    }
    if contains_whitespace(key) {
        return Err(IrcError::validation("channel key", "must not contain whitespace"));
    }
    Ok(cmd.secret_arg(key))
}

pub fn nick_command(nick: &str) -> Result<Command> {
    require_token("nickname", nick)?;
    Ok(Command::new("NICK").arg(nick))
}

pub fn pass_command(secret: &str) -> Result<Option<Command>> {
    if secret.is_empty() {
        return Ok(None);
    }
    if contains_whitespace(secret) {
        return Err(IrcError::validation("password", "must not contain whitespace"));
    }
    Ok(Some(Command::new("PASS").secret_arg(secret)))
}

pub fn user_command(username: &str, realname: &str) -> Result<Command> {
    require_token("username", username)?;
    if realname.contains(['\r', '\n']) {
        return Err(IrcError::validation("realname", "must not contain line breaks"));
    }
    Ok(Command::new("USER")
        .arg(username)
        .arg("0")
        .arg("*")
        .trailing(realname))
}

/// One `PRIVMSG` per line of `text`, wrapped so each fits in `chunk_len`
/// bytes. CTCP delimiters are stripped so relayed text cannot smuggle in
/// CTCP requests.
pub fn privmsg_commands(target: &str, text: &str, chunk_len: usize) -> Result<Vec<Command>> {
    require_token("target", target)?;
    let overhead = "PRIVMSG ".len() + target.len() + " :".len();
    let budget = chunk_len.saturating_sub(overhead).max(1);

    let clean: String = text.chars().filter(|c| *c != '\x01' && *c != '\r').collect();
    let mut commands = Vec::new();
    for line in clean.split('\n') {
        for piece in wrap(line, budget) {
            commands.push(Command::new("PRIVMSG").arg(target).trailing(piece));
        }
    }
    Ok(commands)
}

/// Cut `text` into pieces of at most `max` bytes on UTF-8 boundaries,
/// preferring to break after a space.
fn wrap(text: &str, max: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while rest.len() > max {
        let mut cut = max;
        while cut > 0 && !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        if cut == 0 {
            cut = rest.chars().next().map_or(rest.len(), char::len_utf8);
        } else if let Some(space) = rest[..cut].rfind(' ') {
            if space > 0 {
                cut = space + 1;
            }
        }
        let (head, tail) = rest.split_at(cut);
        pieces.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        pieces.push(rest);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::irc::framer::{CHUNK_LEN, MAX_LINE_LEN};
    use crate::irc::observer::testing::RecordingObserver;
    use irc_proto::Response;
    use crate::irc::testing::{
        skip_login, start_client as start, start_client_with_buffer as start_with_buffer,
        test_config as config,
    };
    use tokio::io::AsyncReadExt;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_nick_validation() {
        assert!(matches!(nick_command("a b"), Err(IrcError::Validation { .. })));
        assert!(matches!(nick_command(""), Err(IrcError::Validation { .. })));
        assert_eq!(nick_command("abc").unwrap().to_wire(), "NICK abc");
    }

    #[test]
    fn test_user_validation() {
        assert!(matches!(user_command("a b", "x"), Err(IrcError::Validation { .. })));
        assert_eq!(
            user_command("bot", "Micro Bot").unwrap().to_wire(),
            "USER bot 0 * :Micro Bot"
        );
    }

    #[test]
    fn test_join_canonicalizes_and_redacts() {
        assert_eq!(join_command("chan", "").unwrap().to_wire(), "JOIN #chan");
        assert_eq!(join_command("#chan", "").unwrap().to_wire(), "JOIN #chan");

        let cmd = join_command("#chan", "secret").unwrap();
        assert_eq!(cmd.to_wire(), "JOIN #chan secret");
        assert_eq!(cmd.to_string(), "JOIN #chan [REDACTED]");
        assert!(!cmd.to_string().contains("secret"));

        assert!(matches!(join_command("#", ""), Err(IrcError::Validation { .. })));
        assert!(matches!(join_command("a b", ""), Err(IrcError::Validation { .. })));
        assert!(matches!(join_command("a,b", ""), Err(IrcError::Validation { .. })));
    }

    #[test]
    fn test_pass_empty_sends_nothing() {
        assert!(pass_command("").unwrap().is_none());
        let cmd = pass_command("hunter2").unwrap().unwrap();
        assert_eq!(cmd.to_wire(), "PASS hunter2");
        assert_eq!(cmd.to_string(), "PASS [REDACTED]");
    }

    #[test]
    fn test_privmsg_wraps_long_text() {
        let text = "word ".repeat(300);
        let commands = privmsg_commands("#chan", &text, CHUNK_LEN).unwrap();
        assert!(commands.len() > 1);

        let mut rebuilt = String::new();
        for cmd in &commands {
            let wire = cmd.to_wire();
            assert!(wire.len() + 2 <= MAX_LINE_LEN);
            rebuilt.push_str(wire.strip_prefix("PRIVMSG #chan :").unwrap());
        }
        assert_eq!(rebuilt, text.trim_end_matches('\n'));
    }

    #[test]
    fn test_privmsg_splits_lines_and_strips_ctcp() {
        let commands = privmsg_commands("#chan", "one\r\n\x01two\x01", CHUNK_LEN).unwrap();
        let wire: Vec<String> = commands.iter().map(Command::to_wire).collect();
        assert_eq!(wire, vec!["PRIVMSG #chan :one", "PRIVMSG #chan :two"]);
    }

    #[test]
    fn test_wrap_respects_char_boundaries() {
        let text = "é".repeat(10);
        let pieces = wrap(&text, 5);
        assert!(pieces.iter().all(|p| p.len() <= 5));
        assert_eq!(pieces.concat(), text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_sequence_order() {
        let mut cfg = config();
        cfg.password = Some("hunter2".into());
        let (_client, observer, mut remote) = start(cfg).await;

        assert_eq!(remote.line().await.as_deref(), Some("PASS hunter2\r\n"));
        skip_login(&mut remote).await;

        let logs = observer.logs();
        assert!(logs.iter().any(|(_, m)| m.contains("PASS [REDACTED]")));
        assert!(logs.iter().all(|(_, m)| !m.contains("hunter2")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_failure_is_login_error() {
        let mut cfg = config();
        cfg.nickname = "bad nick".into();
        let (local, mut remote) = tokio::io::duplex(1024);
        let (conn, source) = Connection::from_stream(local);
        let observer = Arc::new(RecordingObserver::default());

        let client = Client::start(cfg, conn, source, FramerSettings::default(), observer);
        let result = client.login().await;
        assert!(matches!(result, Err(IrcError::Login { step: "NICK", .. })));

        // The session stays open until the caller closes it.
        assert!(client.is_connected());
        client.disconnect().await;
        client.wait_closed().await;

        let mut received = String::new();
        remote.read_to_string(&mut received).await.unwrap();
        assert_eq!(received, "QUIT :Disconnecting\r\n");
    }

    #[tokio::test]
    async fn test_connect_closes_socket_after_failed_login() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut cfg = config();
        cfg.server = listener.local_addr().unwrap().to_string();
        cfg.nickname = "bad nick".into();

        let observer = Arc::new(RecordingObserver::default());
        let (result, accepted) = tokio::join!(Client::connect(cfg, observer), listener.accept());
        assert!(matches!(result, Err(IrcError::Login { step: "NICK", .. })));

        let (mut socket, _) = accepted.unwrap();
        let mut received = Vec::new();
        let read = tokio::time::timeout(Duration::from_secs(5), socket.read_to_end(&mut received)).await;
        assert!(matches!(read, Ok(Ok(0))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_with_stalled_peer_finishes() {
        let (client, _observer, _remote) = start_with_buffer(config(), 64).await;

        let sender = {
            let client = client.clone();
            tokio::spawn(async move { client.message("#chan", &"x".repeat(400)).await })
        };
        tokio::task::yield_now().await;

        let finished = tokio::time::timeout(Duration::from_secs(10), client.disconnect()).await;
        assert!(finished.is_ok());
        assert!(!client.is_connected());
        assert!(matches!(sender.await.unwrap(), Err(IrcError::Closed)));
        client.wait_closed().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_ping_is_answered_and_not_forwarded() {
        let (_client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        remote.send("PING abc123\r\n").await;
        assert_eq!(remote.line().await.as_deref(), Some("PONG abc123\r\n"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(observer.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_lines_are_forwarded() {
        let (_client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        remote
            .send("\r\n:srv 001 bot :Welcome\r\n:alice!a@host PRIVMSG #chan :hi\r\nNOTICE bot :psst\r\n")
            .await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let commands: Vec<ProtoCommand> = observer
            .events()
            .into_iter()
            .map(|event| match event {
                SessionEvent::Inbound(msg) => msg.command,
                other => panic!("unexpected event {:?}", other),
            })
            .collect();
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], ProtoCommand::Response(Response::RPL_WELCOME, _)));
        assert_eq!(commands[1], ProtoCommand::PRIVMSG("#chan".into(), "hi".into()));
        assert_eq!(commands[2], ProtoCommand::NOTICE("bot".into(), "psst".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_prefixed_ping_is_answered() {
        let (_client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        remote.send(":irc.example.net PING :irc.example.net\r\n").await;
        assert_eq!(remote.line().await.as_deref(), Some("PONG irc.example.net\r\n"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(observer.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlong_inbound_line_is_skipped() {
        let (client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        remote.send(&"x".repeat(4096)).await;
        remote.send("\r\nPING abc\r\n").await;
        assert_eq!(remote.line().await.as_deref(), Some("PONG abc\r\n"));

        assert!(client.is_connected());
        assert!(observer
            .logs()
            .iter()
            .any(|(level, m)| *level == "warn" && m.contains("longer than 512")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_server_error_closes_session() {
        let (client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        remote.send("ERROR :Closing Link\r\n").await;
        client.wait_closed().await;

        assert_eq!(
            observer.events(),
            vec![
                SessionEvent::ServerError("Closing Link".into()),
                SessionEvent::Closed
            ]
        );
        assert!(!client.is_connected());
        assert_eq!(remote.line().await.as_deref(), Some("QUIT :Disconnecting\r\n"));
        assert_eq!(remote.line().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_twice_is_noop() {
        let (client, observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        client.disconnect().await;
        client.disconnect().await;
        client.wait_closed().await;

        assert_eq!(remote.line().await.as_deref(), Some("QUIT :Disconnecting\r\n"));
        assert_eq!(remote.line().await, None);
        assert_eq!(observer.events(), vec![SessionEvent::Closed]);
        assert!(matches!(
            client.message("#chan", "late").await,
            Err(IrcError::Closed)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_is_sent_contiguously() {
        let (client, _observer, mut remote) = start(config()).await;
        skip_login(&mut remote).await;

        let text = "x".repeat(1000);
        client.message("#chan", &text).await.unwrap();

        let mut rebuilt = String::new();
        while rebuilt.len() < text.len() {
            let line = remote.line().await.unwrap();
            assert!(line.len() <= MAX_LINE_LEN);
            let body = line.strip_prefix("PRIVMSG #chan :").unwrap();
            rebuilt.push_str(body.trim_end_matches("\r\n"));
        }
        assert_eq!(rebuilt, text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_timeout_pings_then_drops() {
        let mut cfg = config();
        cfg.idle_timeout = Some(Duration::from_secs(60));
        let (client, observer, mut remote) = start(cfg).await;
        skip_login(&mut remote).await;

        assert_eq!(remote.line().await.as_deref(), Some("PING :bot\r\n"));
        assert_eq!(remote.line().await.as_deref(), Some("QUIT :Disconnecting\r\n"));
        client.wait_closed().await;
        assert!(observer
            .logs()
            .iter()
            .any(|(level, m)| *level == "error" && m.contains("no traffic")));
    }
}
