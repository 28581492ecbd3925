use crate::base::{Notification, NotifyError, NotifyEvent, Notifier};
use crate::messages;
use std::process::Command;

const MAX_CHARS: usize = 100;

/// Local desktop banner: `osascript` on macOS, `notify-send` elsewhere
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn program() -> &'static str {
        if cfg!(target_os = "macos") {
            "osascript"
        } else {
            "notify-send"
        }
    }

    fn args(program: &str, notification: &Notification) -> Vec<String> {
        if program == "osascript" {
            return vec!["-e".to_string(), apple_script(notification)];
        }
        let body = if notification.subtitle.is_empty() {
            notification.body.clone()
        } else {
            format!("{}\n{}", notification.subtitle, notification.body)
        };
        vec![notification.title.clone(), body]
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn apple_script(notification: &Notification) -> String {
    format!(
        "display notification \"{}\" with title \"{}\" subtitle \"{}\"",
        escape(&notification.body),
        escape(&notification.title),
        escape(&notification.subtitle)
    )
}

impl Notifier for DesktopNotifier {
    fn name(&self) -> &str {
        "desktop"
    }

    fn max_chars(&self) -> usize {
        MAX_CHARS
    }

    fn compose(&self, event: &NotifyEvent<'_>) -> Notification {
        messages::desktop(event)
    }

    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        let program = Self::program();
        let output = Command::new(program)
            .args(Self::args(program, notification))
            .output()
            .map_err(|source| NotifyError::Spawn { program, source })?;

        if !output.status.success() {
            return Err(NotifyError::Command {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
