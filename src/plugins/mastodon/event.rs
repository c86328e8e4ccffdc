//! Streaming API payloads and the closed set of events the relay handles.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub acct: String,
    #[serde(default)]
    pub display_name: String,
}

impl Account {
    /// Display name, or the username when none is set.
    pub fn name(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub content: String,
    pub account: Account,
    #[serde(default)]
    pub reblog: Option<Box<Status>>,
}

impl Status {
    /// Public link to the status.
    pub fn link(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.uri)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub account: Account,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    Update(Status),
    Notification(Notification),
    Error(String),
    /// Any other event type (deletes, edits, filter changes, ...).
    Unknown(String),
}

impl FeedEvent {
    /// Decode one server-sent event from the streaming API.
    pub fn decode(event: &str, data: &str) -> FeedEvent {
        match event {
            "update" => match serde_json::from_str(data) {
                Ok(status) => FeedEvent::Update(status),
                Err(e) => undecodable(event, e),
            },
            "notification" => match serde_json::from_str(data) {
                Ok(notification) => FeedEvent::Notification(notification),
                Err(e) => undecodable(event, e),
            },
            "error" => FeedEvent::Error(data.to_string()),
            other => FeedEvent::Unknown(other.to_string()),
        }
    }
}

fn undecodable(event: &str, err: serde_json::Error) -> FeedEvent {
    tracing::warn!(event = %event, error = %err, "undecodable streaming payload");
    FeedEvent::Unknown(event.to_string())
}
