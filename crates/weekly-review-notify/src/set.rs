//! Fan-out over every configured sink

use crate::base::{NotifyError, NotifyEvent, Notifier};
use crate::{DesktopNotifier, LineNotifier};
use weekly_review_core::LineSettings;

/// Ordered collection of notification sinks
pub struct NotifierSet {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierSet {
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Desktop banner plus LINE push
    pub fn standard(line: LineSettings) -> Result<Self, NotifyError> {
        let mut set = Self::new();
        set.register(Box::new(DesktopNotifier::new()));
        set.register(Box::new(LineNotifier::new(line)?));
        Ok(set)
    }

    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Deliver the event to every sink; one failure never stops the rest
    pub fn notify_all(&self, event: &NotifyEvent<'_>) -> Vec<(String, bool)> {
        self.notifiers
            .iter()
            .map(|n| (n.name().to_string(), n.notify(event)))
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierSet {
    fn default() -> Self {
        Self::new()
    }
}
