use chrono::{DateTime, Duration, Utc};
use gymreg_core::{Level, Notification};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use std::collections::VecDeque;

/// Notifications currently on screen, oldest first
#[derive(Debug)]
pub struct Toasts {
    /// What's showing and when it went up
    items: VecDeque<(DateTime<Utc>, Notification)>,

    /// How long each toast stays up
    lifetime: Duration,
}

impl Toasts {
    /// No toasts yet
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            lifetime,
        }
    }

    /// Show a notification, starting at `now`
    pub fn push(&mut self, notification: Notification, now: DateTime<Utc>) {
        self.items.push_back((now, notification));
    }

    /// Drop toasts that have been up for at least their lifetime. Returns
    /// whether anything was removed.
    pub fn expire(&mut self, now: DateTime<Utc>) -> bool {
        let before = self.items.len();

        self.items
            .retain(|(shown_at, _)| now.signed_duration_since(*shown_at) < self.lifetime);

        self.items.len() != before
    }

    /// How many toasts are showing
    #[cfg(test)]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// The most recent notification still showing
    pub fn latest(&self) -> Option<&Notification> {
        self.items.back().map(|(_, notification)| notification)
    }

    /// Stack toasts up from the bottom-right corner of `area`, newest at the
    /// bottom. Whatever doesn't fit isn't drawn.
    pub fn render(&self, frame: &mut Frame<'_>, area: Rect) {
        let width = (area.width / 3).max(30).min(area.width);
        let height = 4;
        let mut bottom = area.bottom();

        for (_, notification) in self.items.iter().rev() {
            if bottom < area.y + height {
                break;
            }
            bottom -= height;

            let toast_area = Rect::new(area.right() - width, bottom, width, height);

            let (title, color) = match notification.level {
                Level::Success => ("Success", Color::Green),
                Level::Error => ("Error", Color::Red),
                Level::Info => ("Info", Color::Blue),
            };

            let toast = Paragraph::new(notification.message.as_str())
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(title)
                        .border_style(Style::default().fg(color)),
                );

            frame.render_widget(Clear, toast_area);
            frame.render_widget(toast, toast_area);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn latest_is_newest() {
        let now = Utc::now();
        let mut toasts = Toasts::new(Duration::seconds(5));

        toasts.push(Notification::info("first"), now);
        toasts.push(Notification::error("second"), now);

        assert_eq!(toasts.latest(), Some(&Notification::error("second")));
    }

    #[test]
    fn expires_after_lifetime() {
        let now = Utc::now();
        let mut toasts = Toasts::new(Duration::seconds(5));
        toasts.push(Notification::info("old"), now);
        toasts.push(Notification::info("new"), now + Duration::seconds(3));

        assert!(!toasts.expire(now + Duration::seconds(4)));
        assert_eq!(toasts.items.len(), 2);

        assert!(toasts.expire(now + Duration::seconds(5)));
        assert_eq!(toasts.latest(), Some(&Notification::info("new")));

        assert!(toasts.expire(now + Duration::seconds(8)));
        assert_eq!(toasts.latest(), None);
    }
}
