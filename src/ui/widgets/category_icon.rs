use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Widget};

use crate::Theme;

/// A tile showing a category glyph above its name.
pub struct CategoryIcon<'a> {
    icon: &'a str,
    label: &'a str,
    selected: bool,
    theme: &'a Theme,
}

impl<'a> CategoryIcon<'a> {
    /// Tiles need three inner rows: glyph, gap, label.
    pub const HEIGHT: u16 = 5;
    pub const WIDTH: u16 = 16;

    pub const fn new(icon: &'a str, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            icon,
            label,
            selected: false,
            theme,
        }
    }

    #[must_use]
    pub const fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for CategoryIcon<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let (border, label_style) = if self.selected {
            (
                theme.border_focused(),
                Style::default()
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (theme.border(), Style::default().fg(theme.subtext1()))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(if self.selected {
                theme.surface0()
            } else {
                theme.base()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let [icon_area, _, label_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new(Line::styled(self.icon, Style::default().fg(theme.primary())))
            .alignment(Alignment::Center)
            .render(icon_area, buf);
        Paragraph::new(Line::styled(self.label, label_style))
            .alignment(Alignment::Center)
            .render(label_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_icon_and_label() {
        let theme = Theme::default();
        let area = Rect::new(0, 0, CategoryIcon::WIDTH, CategoryIcon::HEIGHT);
        let mut buf = Buffer::empty(area);
        CategoryIcon::new("*", "Plumbing", &theme).render(area, &mut buf);

        let row = |y: u16| -> String {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol().to_string())
                .collect()
        };
        assert!(row(1).contains('*'));
        assert!(row(3).contains("Plumbing"));
    }
}
