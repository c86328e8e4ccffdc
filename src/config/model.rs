//! Configuration data model.
//!
//! Only `irc.server` is required; everything else has a default. Structs do
//! not derive `Debug` because they carry passwords and access tokens.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::net::Ipv6Addr;
use std::time::Duration;

use super::nickname::generate_nickname;
use crate::irc::ConnectionConfig;
use crate::plugins::mastodon::MastodonConfig;

/// Port used when `irc.server` has none.
pub const DEFAULT_PORT: u16 = 6667;

/// Root application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub irc: IrcConfig,
    #[serde(default)]
    pub mastodon: Vec<MastodonConfig>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct IrcConfig {
    /// `host` or `host:port`
    pub server: String,
    #[serde(default = "generate_nickname")]
    pub nickname: String,
    /// Defaults to the nickname.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default = "default_realname")]
    pub realname: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Seconds of silence before the bot pings the server; off when unset.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

fn default_realname() -> String {
    "microbot".into()
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.irc.server.trim().is_empty() {
            bail!("irc.server must not be empty");
        }
        if self.irc.nickname.trim().is_empty() {
            bail!("irc.nickname must not be empty");
        }
        for (i, feed) in self.mastodon.iter().enumerate() {
            if feed.channel.trim_start_matches('#').is_empty() {
                bail!("mastodon[{}].channel must not be empty", i);
            }
            if !feed.server.starts_with("http://") && !feed.server.starts_with("https://") {
                bail!("mastodon[{}].server must be an http(s) URL", i);
            }
        }
        Ok(())
    }
}

impl IrcConfig {
    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            server: with_default_port(&self.server),
            nickname: self.nickname.clone(),
            username: self
                .username
                .clone()
                .unwrap_or_else(|| self.nickname.clone()),
            realname: self.realname.clone(),
            password: self.password.clone().filter(|p| !p.is_empty()),
            idle_timeout: self.idle_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Append [`DEFAULT_PORT`] unless `server` already names a port. A bare IPv6
/// literal is bracketed first.
fn with_default_port(server: &str) -> String {
    if server.parse::<Ipv6Addr>().is_ok() {
        return format!("[{}]:{}", server, DEFAULT_PORT);
    }
    let has_port = match server.strip_prefix('[') {
        Some(bracketed) => bracketed.contains("]:"),
        None => server.contains(':'),
    };
    if has_port {
        server.to_string()
    } else {
        format!("{}:{}", server, DEFAULT_PORT)
    }
}
