//! Base notifier trait and shared types

use thiserror::Error;
use weekly_review_core::{AnalysisResult, TemplateVersion};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("push api returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// What happened during a run
#[derive(Debug, Clone, Copy)]
pub enum NotifyEvent<'a> {
    /// Weekday quick check finished
    Reminder(&'a AnalysisResult),
    /// Weekend detailed review finished
    Review {
        result: &'a AnalysisResult,
        template: TemplateVersion,
    },
    /// The run could not complete
    Error(&'a str),
}

/// A composed message ready for one sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub subtitle: String,
    pub body: String,
}

/// A destination for review messages
pub trait Notifier {
    /// Sink name (unique identifier)
    fn name(&self) -> &str;

    /// Longest body the sink accepts, in characters
    fn max_chars(&self) -> usize;

    /// Build the sink-specific message for an event
    fn compose(&self, event: &NotifyEvent<'_>) -> Notification;

    /// Hand a message to the sink
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;

    /// Compose, truncate and deliver; failures are logged and reported as `false`
    fn notify(&self, event: &NotifyEvent<'_>) -> bool {
        let mut notification = self.compose(event);
        notification.body = truncate_chars(&notification.body, self.max_chars());

        match self.deliver(&notification) {
            Ok(()) => {
                tracing::info!(sink = self.name(), title = %notification.title, "notification sent");
                true
            }
            Err(e) => {
                tracing::error!(sink = self.name(), error = %e, "notification failed");
                false
            }
        }
    }
}

/// First `max` characters of `text`, never splitting a code point
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
