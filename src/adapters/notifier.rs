use crate::core::{NotificationKind, Notifier};

/// 終端機上的通知：成功寫到 stdout，失敗寫到 stderr
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    pub fn render(kind: NotificationKind, title: &str, description: &str) -> String {
        match kind {
            NotificationKind::Success => format!("✅ {} - {}", title, description),
            NotificationKind::Failure => format!("❌ {} - {}", title, description),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, kind: NotificationKind, title: &str, description: &str) {
        let line = Self::render(kind, title, description);
        match kind {
            NotificationKind::Success => {
                tracing::info!("{}", line);
                println!("{}", line);
            }
            NotificationKind::Failure => {
                tracing::warn!("{}", line);
                eprintln!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        assert_eq!(
            ConsoleNotifier::render(NotificationKind::Success, "Message sent", "Thanks"),
            "✅ Message sent - Thanks"
        );
        assert_eq!(
            ConsoleNotifier::render(NotificationKind::Failure, "Message not sent", "Retry"),
            "❌ Message not sent - Retry"
        );
    }
}
