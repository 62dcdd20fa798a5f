use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::Theme;
use crate::theme::TextVariant;

/// Section title with an optional right-aligned action such as "See all".
pub struct SectionHeader<'a> {
    title: &'a str,
    action: Option<(String, &'a str)>,
    theme: &'a Theme,
}

impl<'a> SectionHeader<'a> {
    pub const fn new(title: &'a str, theme: &'a Theme) -> Self {
        Self {
            title,
            action: None,
            theme,
        }
    }

    /// Adds an action hint, shown as `label [key]`.
    #[must_use]
    pub fn action(mut self, key: impl Into<String>, label: &'a str) -> Self {
        self.action = Some((key.into(), label));
        self
    }
}

impl Widget for SectionHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let [title_area, action_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);

        Paragraph::new(Line::styled(self.title, theme.typography(TextVariant::Title)))
            .render(title_area, buf);

        if let Some((key, label)) = self.action {
            let line = Line::from(vec![
                Span::styled(label, Style::default().fg(theme.primary())),
                Span::styled(format!(" [{key}]"), theme.typography(TextVariant::Caption)),
            ]);
            Paragraph::new(line)
                .alignment(Alignment::Right)
                .render(action_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, width: u16) -> String {
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_title_and_action() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 50, 1);
        let mut buf = Buffer::empty(area);
        SectionHeader::new("Browse categories", &theme)
            .action("Enter", "See all")
            .render(area, &mut buf);

        let text = row(&buf, area.width);
        assert!(text.starts_with("Browse categories"));
        assert!(text.trim_end().ends_with("See all [Enter]"));
    }

    #[test]
    fn test_without_action() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        SectionHeader::new("Popular", &theme).render(area, &mut buf);
        assert_eq!(row(&buf, area.width).trim_end(), "Popular");
    }
}
