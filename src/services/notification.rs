//! Outbound push notifications (ntfy)

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification endpoint returned HTTP {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// 1 (min) to 5 (max)
    pub priority: u8,
    pub tags: Vec<String>,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: 3,
            tags: vec!["info".to_string()],
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority.clamp(1, 5);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Single delivery attempt; callers log failures and move on.
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

#[derive(Serialize)]
struct PublishMessage<'a> {
    topic: &'a str,
    title: &'a str,
    message: &'a str,
    priority: u8,
    tags: &'a [String],
}

/// Publishes to an ntfy server through its JSON endpoint.
pub struct NtfySink {
    client: reqwest::Client,
    base_url: String,
    topic: String,
}

impl NtfySink {
    pub fn new(
        base_url: impl Into<String>,
        topic: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, topic, client))
    }

    pub fn with_client(
        base_url: impl Into<String>,
        topic: impl Into<String>,
        client: reqwest::Client,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            topic: topic.into(),
        }
    }
}

#[async_trait]
impl NotificationSink for NtfySink {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = PublishMessage {
            topic: &self.topic,
            title: &notification.title,
            message: &notification.body,
            priority: notification.priority,
            tags: &notification.tags,
        };

        let response = self
            .client
            .post(format!("{}/", self.base_url))
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status.as_u16()));
        }

        debug!(topic = %self.topic, title = %notification.title, "Notification published");
        Ok(())
    }
}
