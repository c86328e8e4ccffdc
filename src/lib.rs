//! microbot: relay social feed events into an IRC channel.
//!
//! - [`irc`]: the protocol client (connection, line framing, read loop,
//!   command builders)
//! - [`plugins`]: feed plugins that post through the client
//! - [`config`]: TOML configuration

pub mod config;
pub mod irc;
pub mod plugins;
