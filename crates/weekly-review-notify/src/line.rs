use crate::base::{Notification, NotifyError, NotifyEvent, Notifier};
use crate::messages;
use std::time::Duration;
use weekly_review_core::LineSettings;

const PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";
const MAX_CHARS: usize = 5000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// LINE Messaging API push to a single user
pub struct LineNotifier {
    client: reqwest::blocking::Client,
    settings: LineSettings,
}

impl LineNotifier {
    pub fn new(settings: LineSettings) -> Result<Self, NotifyError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client, settings })
    }

    fn payload(&self, text: &str) -> serde_json::Value {
        serde_json::json!({
            "to": self.settings.user_id.as_deref().unwrap_or_default(),
            "messages": [{"type": "text", "text": text}]
        })
    }
}

impl Notifier for LineNotifier {
    fn name(&self) -> &str {
        "line"
    }

    fn max_chars(&self) -> usize {
        MAX_CHARS
    }

    fn compose(&self, event: &NotifyEvent<'_>) -> Notification {
        messages::chat(event)
    }

    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let token = match self.settings.channel_access_token.as_deref() {
            Some(token) if self.settings.is_configured() => token,
            _ => {
                tracing::info!("LINE credentials incomplete, skipping push");
                return Ok(());
            }
        };

        let response = self
            .client
            .post(PUSH_ENDPOINT)
            .bearer_auth(token)
            .json(&self.payload(&notification.body))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
