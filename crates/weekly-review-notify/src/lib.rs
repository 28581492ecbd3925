//! Notification sinks for review outcomes

mod base;
mod desktop;
mod line;
pub mod messages;
mod set;

pub use base::{truncate_chars, Notification, NotifyError, NotifyEvent, Notifier};
pub use desktop::DesktopNotifier;
pub use line::LineNotifier;
pub use set::NotifierSet;
