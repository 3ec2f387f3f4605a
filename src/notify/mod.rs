use async_trait::async_trait;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::config::NotifyConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A transient status message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Shows status messages; fire-and-forget
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Shows a message on stderr, keeps it briefly, fades it and removes it
pub struct TerminalNotifier {
    display: Duration,
    fade: Duration,
    quiet: bool,
}

impl TerminalNotifier {
    pub fn new(config: &NotifyConfig, quiet: bool) -> Self {
        Self {
            display: Duration::from_millis(config.display_ms),
            fade: Duration::from_millis(config.fade_ms),
            quiet,
        }
    }

    /// Quiet mode hides success messages, errors always show
    fn suppresses(&self, kind: NotificationKind) -> bool {
        self.quiet && kind == NotificationKind::Success
    }

    fn icon(kind: NotificationKind) -> String {
        match kind {
            NotificationKind::Success => style("✔").green().bold().to_string(),
            NotificationKind::Error => style("✘").red().bold().to_string(),
        }
    }
}

#[async_trait]
impl Notifier for TerminalNotifier {
    async fn notify(&self, notification: Notification) {
        if self.suppresses(notification.kind) {
            return;
        }

        if !Term::stderr().is_term() {
            eprintln!("{}", notification.message);
            return;
        }

        let bar_style = ProgressStyle::with_template("{prefix} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner().with_style(bar_style);
        bar.set_prefix(Self::icon(notification.kind));
        bar.set_message(style(&notification.message).bold().to_string());
        bar.tick();

        tokio::time::sleep(self.display).await;

        bar.set_message(style(&notification.message).dim().to_string());
        bar.tick();

        tokio::time::sleep(self.fade).await;
        bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_constructors() {
        assert_eq!(Notification::success("ok").kind, NotificationKind::Success);
        let err = Notification::error("bad");
        assert_eq!(err.kind, NotificationKind::Error);
        assert_eq!(err.message, "bad");
    }

    fn config(display_ms: u64, fade_ms: u64) -> NotifyConfig {
        NotifyConfig { display_ms, fade_ms }
    }

    #[test]
    fn test_quiet_hides_only_success() {
        let quiet = TerminalNotifier::new(&config(0, 0), true);
        assert!(quiet.suppresses(NotificationKind::Success));
        assert!(!quiet.suppresses(NotificationKind::Error));

        let loud = TerminalNotifier::new(&config(0, 0), false);
        assert!(!loud.suppresses(NotificationKind::Success));
    }

    #[test]
    fn test_quiet_success_returns_immediately() {
        let notifier = TerminalNotifier::new(&config(60_000, 60_000), true);

        let started = Instant::now();
        tokio_test::block_on(notifier.notify(Notification::success("copied")));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_error_notification_finishes_after_display() {
        let notifier = TerminalNotifier::new(&config(0, 0), true);

        let shown = tokio::time::timeout(
            Duration::from_secs(5),
            notifier.notify(Notification::error("failed")),
        )
        .await;
        assert!(shown.is_ok());
    }
}
