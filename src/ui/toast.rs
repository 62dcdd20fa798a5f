use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Component;
use crate::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Info,
    Error,
}

/// Transient notification with a title and a description line.
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub toast_type: ToastType,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        toast_type: ToastType,
    ) -> Self {
        let duration = match toast_type {
            ToastType::Error => Duration::from_secs(6),
            ToastType::Success | ToastType::Info => Duration::from_secs(4),
        };
        Self {
            title: title.into(),
            description: description.into(),
            toast_type,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastType::Success)
    }

    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastType::Info)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(title, description, ToastType::Error)
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

pub struct ToastManager {
    toasts: VecDeque<Toast>,
    max_visible: usize,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub const fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
            max_visible: 4,
        }
    }

    pub fn show(&mut self, toast: Toast) {
        tracing::debug!(title = %toast.title, description = %toast.description, "Toast");
        self.toasts.push_back(toast);
        while self.toasts.len() > self.max_visible {
            self.toasts.pop_front();
        }
    }

    #[cfg(test)]
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}

impl Component for ToastManager {
    type Output = ();

    fn handle_tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let toast_height = 4u16;
        let toast_width = 48u16.min(area.width.saturating_sub(4));
        let spacing = 1u16;

        // Newest toast sits at the bottom, older ones stack upward.
        for (i, toast) in self.toasts.iter().rev().enumerate() {
            let offset = u16::try_from(i).unwrap_or(u16::MAX) * (toast_height + spacing);
            let Some(y) = area
                .bottom()
                .checked_sub(toast_height + offset + 1)
                .filter(|y| *y >= area.y)
            else {
                break;
            };
            let x = area.right().saturating_sub(toast_width + 2);
            let toast_area = Rect::new(x, y, toast_width, toast_height);

            let (border_color, icon) = match toast.toast_type {
                ToastType::Success => (theme.success(), "✓"),
                ToastType::Info => (theme.info(), "ℹ"),
                ToastType::Error => (theme.error(), "✗"),
            };

            frame.render_widget(Clear, toast_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(theme.surface0()));

            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{icon} "), Style::default().fg(border_color)),
                    Span::styled(
                        toast.title.clone(),
                        Style::default()
                            .fg(theme.text())
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    toast.description.clone(),
                    Style::default().fg(theme.subtext1()),
                )),
            ];

            let paragraph = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_keeps_newest_toasts() {
        let mut manager = ToastManager::new();
        for i in 0..6 {
            manager.show(Toast::info(format!("toast {i}"), ""));
        }
        let titles: Vec<_> = manager.visible().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["toast 2", "toast 3", "toast 4", "toast 5"]);
    }

    #[test]
    fn test_tick_drops_expired_toasts() {
        let mut manager = ToastManager::new();
        let mut stale = Toast::success("old", "");
        stale.duration = Duration::ZERO;
        manager.show(stale);
        manager.show(Toast::error("fresh", ""));

        manager.handle_tick();

        let titles: Vec<_> = manager.visible().map(|t| t.title.clone()).collect();
        assert_eq!(titles, vec!["fresh"]);
    }
}
