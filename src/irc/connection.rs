//! Transport ownership for a single IRC session.
//!
//! [`Connection`] is the write side and is only written to by the
//! [`LineFramer`](super::framer::LineFramer). [`LineSource`] is the read side
//! and has exactly one consumer, the client's read loop. Closing the
//! connection also wakes the reader and any write stuck on a peer that
//! stopped reading.

use super::error::{IrcError, Result};
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{watch, Mutex};
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder};

/// Longest inbound line accepted, `\r` included. Longer lines are discarded.
pub const MAX_INBOUND_LEN: usize = 512;

type BoxWriter = Box<dyn AsyncWrite + Send + Unpin>;
type BoxReader = Box<dyn AsyncRead + Send + Unpin>;

pub struct Connection {
    writer: Mutex<Option<BoxWriter>>,
    closed: watch::Sender<bool>,
}

pub struct LineSource {
    reader: BoxReader,
    codec: AnyDelimiterCodec,
    buf: BytesMut,
    eof: bool,
    closed: watch::Receiver<bool>,
}

impl Connection {
    /// Resolve `address` (`host:port`) and open a TCP stream to it.
    pub async fn connect(address: &str) -> Result<(Connection, LineSource)> {
        let dial_err = |source| IrcError::Dial {
            address: address.to_string(),
            source,
        };

        let addrs: Vec<_> = tokio::net::lookup_host(address)
            .await
            .map_err(dial_err)?
            .collect();
        tracing::debug!(from = %address, to = ?addrs, "resolved server");

        let mut last_err = None;
        for addr in addrs {
            match TcpStream::connect(addr).await {
                Ok(stream) => {
                    let _ = stream.set_nodelay(true);
                    tracing::debug!(peer = %addr, "tcp connected");
                    return Ok(Self::from_stream(stream));
                }
                Err(e) => {
                    tracing::debug!(peer = %addr, error = %e, "connect attempt failed");
                    last_err = Some(e);
                }
            }
        }

        Err(dial_err(last_err.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no addresses resolved")
        })))
    }

    /// Wrap an already established byte stream.
    pub fn from_stream<S>(stream: S) -> (Connection, LineSource)
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half): (ReadHalf<S>, WriteHalf<S>) = tokio::io::split(stream);
        let (closed_tx, closed_rx) = watch::channel(false);

        let conn = Connection {
            writer: Mutex::new(Some(Box::new(write_half))),
            closed: closed_tx,
        };
        let source = LineSource {
            reader: Box::new(read_half),
            codec: AnyDelimiterCodec::new_with_max_length(
                b"\n".to_vec(),
                b"\n".to_vec(),
                MAX_INBOUND_LEN,
            ),
            buf: BytesMut::with_capacity(4 * 1024),
            eof: false,
            closed: closed_rx,
        };
        (conn, source)
    }

    /// Write one already framed line and flush it. A write blocked on the
    /// peer is abandoned as soon as the connection is closed.
    pub async fn write_frame(&self, frame: &[u8]) -> Result<()> {
        let mut closed = self.closed.subscribe();
        if *closed.borrow_and_update() {
            return Err(IrcError::Closed);
        }

        tokio::select! {
            result = self.write_locked(frame) => result,
            _ = closed_signal(&mut closed) => Err(IrcError::Closed),
        }
    }

    async fn write_locked(&self, frame: &[u8]) -> Result<()> {
        let mut guard = self.writer.lock().await;
        let writer = guard.as_mut().ok_or(IrcError::Closed)?;
        writer.write_all(frame).await.map_err(IrcError::Write)?;
        writer.flush().await.map_err(IrcError::Write)?;
        Ok(())
    }

    /// Release the transport. Returns `true` only for the call that actually
    /// closed it.
    pub async fn close(&self) -> bool {
        // Raising the flag first makes pending writes drop the writer lock.
        if self.closed.send_replace(true) {
            return false;
        }
        let writer = self.writer.lock().await.take();
        if let Some(mut writer) = writer {
            if let Err(e) = writer.shutdown().await {
                tracing::debug!(error = %e, "shutdown failed");
            }
        }
        true
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

impl LineSource {
    /// Next inbound line without its terminator. `Ok(None)` means the stream
    /// ended or the connection was closed locally. A line longer than
    /// [`MAX_INBOUND_LEN`] yields `MaxChunkLengthExceeded` once and is then
    /// skipped.
    ///
    /// Cancel safe: a partially read line stays buffered for the next call.
    pub async fn next_line(
        &mut self,
    ) -> std::result::Result<Option<String>, AnyDelimiterCodecError> {
        loop {
            if *self.closed.borrow() {
                return Ok(None);
            }

            let frame = if self.eof {
                self.codec.decode_eof(&mut self.buf)?
            } else {
                self.codec.decode(&mut self.buf)?
            };
            if let Some(frame) = frame {
                let line = frame.strip_suffix(b"\r").unwrap_or(&frame[..]);
                return Ok(Some(String::from_utf8_lossy(line).into_owned()));
            }
            if self.eof {
                return Ok(None);
            }

            tokio::select! {
                read = self.reader.read_buf(&mut self.buf) => {
                    if read? == 0 {
                        self.eof = true;
                    }
                }
                _ = closed_signal(&mut self.closed) => return Ok(None),
            }
        }
    }
}

async fn closed_signal(rx: &mut watch::Receiver<bool>) {
    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            return;
        }
    }
}
