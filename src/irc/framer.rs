//! Outbound line framing with length limit and send throttle.
//!
//! Every byte that reaches the wire passes through [`LineFramer::send`]. A
//! payload may hold several newline-separated sub-messages; each one becomes
//! at least one CRLF-terminated line, and sub-messages longer than
//! [`CHUNK_LEN`] are cut into consecutive chunks. Lines are spaced at least
//! [`SEND_INTERVAL`] apart.
//!
//! The framer lock is held for the whole payload, including the waits
//! between its lines, so two concurrent senders can never interleave.

use super::connection::Connection;
use super::error::Result;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Maximum line length on the wire, terminator included.
pub const MAX_LINE_LEN: usize = 500;

/// Payload bytes per line once the CRLF terminator is accounted for.
pub const CHUNK_LEN: usize = MAX_LINE_LEN - 2;

/// Minimum spacing between two lines.
pub const SEND_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
pub struct FramerSettings {
    pub max_line_len: usize,
    pub interval: Duration,
}

impl Default for FramerSettings {
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
            interval: SEND_INTERVAL,
        }
    }
}

impl FramerSettings {
    pub fn chunk_len(&self) -> usize {
        self.max_line_len.saturating_sub(2).max(1)
    }
}

pub struct LineFramer {
    conn: Connection,
    settings: FramerSettings,
    /// Time of the last line written; doubles as the write-path lock.
    last_write: Mutex<Option<Instant>>,
}

impl LineFramer {
    pub fn new(conn: Connection, settings: FramerSettings) -> Self {
        Self {
            conn,
            settings,
            last_write: Mutex::new(None),
        }
    }

    pub fn settings(&self) -> FramerSettings {
        self.settings
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Frame `payload` and write it. Stops at the first failed line; the
    /// remaining lines of the payload are not sent.
    pub async fn send(&self, payload: &[u8]) -> Result<()> {
        let lines = split_lines(payload, self.settings.chunk_len());

        let mut last_write = self.last_write.lock().await;
        for line in lines {
            if let Some(last) = *last_write {
                tokio::time::sleep_until(last + self.settings.interval).await;
            }

            let mut frame = Vec::with_capacity(line.len() + 2);
            frame.extend_from_slice(line);
            frame.extend_from_slice(b"\r\n");
            self.conn.write_frame(&frame).await?;

            *last_write = Some(Instant::now());
        }
        Ok(())
    }
}

/// Split a payload into wire lines (terminators not included).
pub fn split_lines(payload: &[u8], chunk_len: usize) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    for sub in payload.split(|b| *b == b'\n') {
        let sub = sub.strip_suffix(b"\r").unwrap_or(sub);
        if sub.is_empty() {
            continue;
        }
        lines.extend(sub.chunks(chunk_len));
    }
    lines
}
