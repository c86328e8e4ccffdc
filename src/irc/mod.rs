//! IRC protocol layer: transport, line framing, message model and the client.

pub mod client;
pub mod connection;
pub mod error;
pub mod format;
pub mod framer;
pub mod message;
pub mod observer;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{Client, ConnectionConfig};
pub use error::{IrcError, Result};
pub use observer::{Observer, SessionEvent, TracingObserver};
