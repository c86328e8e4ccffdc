//! Observability sink injected into the client and its read loop.

use super::message::Message;

/// Something the read loop noticed about the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// An inbound line with no special protocol handling.
    Inbound(Message),
    /// The server sent `ERROR`; the session is being torn down.
    ServerError(String),
    /// The read side ended and the read loop has stopped.
    Closed,
}

/// Receives log output and session events from one client.
pub trait Observer: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);

    fn event(&self, event: SessionEvent) {
        match event {
            SessionEvent::Inbound(msg) => self.debug(&format!("<< {}", msg.to_string().trim_end())),
            SessionEvent::ServerError(reason) => self.error(&format!("server error: {}", reason)),
            SessionEvent::Closed => self.info("connection closed"),
        }
    }
}

/// Forwards everything to `tracing` under the `microbot::irc` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "microbot::irc", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "microbot::irc", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "microbot::irc", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "microbot::irc", "{}", message);
    }
}
