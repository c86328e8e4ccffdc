//! Mastodon streaming plugin.
//!
//! Subscribes to one streaming timeline and posts every new status into an
//! IRC channel: an optional "reblogged" header, the status text line by
//! line, and a link.

pub mod event;
pub mod html;

use crate::irc::format::{colored, nick_color};
use crate::irc::Client;
use crate::plugins::Plugin;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use event::{FeedEvent, Status};
use eventsource_stream::Eventsource;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    /// Every public status the server knows about.
    Federated,
    /// Public statuses from local accounts.
    Local,
    /// The authenticated user's home timeline.
    Timeline,
}

impl StreamKind {
    fn path(self) -> &'static str {
        match self {
            StreamKind::Federated => "public",
            StreamKind::Local => "public/local",
            StreamKind::Timeline => "user",
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct MastodonConfig {
    pub stream: StreamKind,
    pub channel: String,
    /// Channel key, empty for none.
    #[serde(default)]
    pub password: String,
    /// Base URL, e.g. `https://mastodon.social`.
    pub server: String,
    #[serde(default)]
    pub access_token: String,
}

pub struct Mastodon {
    client: Client,
    config: MastodonConfig,
    http: reqwest::Client,
}

impl Mastodon {
    pub fn new(client: Client, mut config: MastodonConfig) -> Self {
        if !config.channel.starts_with('#') {
            config.channel = format!("#{}", config.channel);
        }
        Self {
            client,
            config,
            http: reqwest::Client::new(),
        }
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/api/v1/streaming/{}",
            self.config.server.trim_end_matches('/'),
            self.config.stream.path()
        )
    }

    async fn open_stream(&self) -> Result<reqwest::Response> {
        let mut request = self
            .http
            .get(self.stream_url())
            .header(reqwest::header::ACCEPT, "text/event-stream");
        if !self.config.access_token.is_empty() {
            request = request.bearer_auth(&self.config.access_token);
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to open stream at {}", self.config.server))?
            .error_for_status()
            .context("Streaming API refused the subscription")?;
        Ok(response)
    }
}

#[async_trait]
impl Plugin for Mastodon {
    fn name(&self) -> String {
        format!("mastodon {} -> {}", self.config.server, self.config.channel)
    }

    async fn run(self: Box<Self>, cancel: CancellationToken) -> Result<()> {
        let response = tokio::select! {
            _ = cancel.cancelled() => return Ok(()),
            response = self.open_stream() => response?,
        };

        self.client
            .join(&self.config.channel, &self.config.password)
            .await
            .with_context(|| format!("Failed to join {}", self.config.channel))?;

        let relay = Relay::new(self.client.clone(), self.config.channel.clone());
        let mut events = std::pin::pin!(response.bytes_stream().eventsource());

        loop {
            let next = tokio::select! {
                _ = cancel.cancelled() => return Ok(()),
                next = events.next() => next,
            };
            match next {
                Some(Ok(event)) => relay.handle(FeedEvent::decode(&event.event, &event.data)).await?,
                Some(Err(e)) => return relay.handle(FeedEvent::Error(e.to_string())).await,
                None => bail!("stream closed by {}", self.config.server),
            }
        }
    }
}

/// Turns feed events into channel messages.
pub struct Relay {
    client: Client,
    channel: String,
}

impl Relay {
    pub fn new(client: Client, channel: String) -> Self {
        Self { client, channel }
    }

    /// Returns an error for [`FeedEvent::Error`], which ends the plugin.
    pub async fn handle(&self, event: FeedEvent) -> Result<()> {
        match event {
            FeedEvent::Update(status) => {
                tracing::debug!(url = %status.link(), "mastodon update");
                let lines = format_status(&status);
                self.client
                    .message(&self.channel, &lines.join("\n"))
                    .await
                    .with_context(|| format!("Failed to post to {}", self.channel))?;
            }
            FeedEvent::Notification(notification) => {
                tracing::debug!(
                    kind = %notification.kind,
                    username = %notification.account.username,
                    "mastodon notification"
                );
            }
            FeedEvent::Error(reason) => bail!("mastodon failure: {}", reason),
            FeedEvent::Unknown(kind) => {
                tracing::info!(event = %kind, "not sure how to handle this event type");
            }
        }
        Ok(())
    }
}

/// Chat lines for one status.
pub fn format_status(status: &Status) -> Vec<String> {
    let author = colored(status.account.name(), nick_color(&status.account.id));
    let mut lines = Vec::new();

    let shown = match &status.reblog {
        Some(original) => {
            lines.push(format!(
                "{} reblogged {}:",
                author,
                colored(original.account.name(), nick_color(&original.account.id))
            ));
            &**original
        }
        None => status,
    };

    for line in html::text_content(&shown.content).split('\n') {
        if !line.trim().is_empty() {
            lines.push(format!("{} {}", author, line));
        }
    }

    let link = shown.link();
    if !link.is_empty() {
        lines.push(format!("{} \u{00bb} {}", author, link));
    }
    lines
}
