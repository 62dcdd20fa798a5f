use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Wrap};

use super::Scroll;
use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::screen::{Screen, ScreenMsg};
use crate::theme::TextVariant;
use crate::ui::{EventResult, Keybinding, Result};

enum Para {
    Heading(&'static str),
    Title(&'static str),
    Body(&'static str),
    Bullet(&'static str),
    Caption(&'static str),
}

const CONTENT: &[Para] = &[
    Para::Heading("About Servly"),
    Para::Body(
        "Servly connects people who need help around the home with trusted local \
         professionals. We believe booking a plumber should be as easy as ordering \
         dinner, and that skilled tradespeople deserve a fair way to grow their business.",
    ),
    Para::Title("Our mission"),
    Para::Body(
        "Make local services simple, safe and transparent for everyone involved.",
    ),
    Para::Title("For customers"),
    Para::Bullet("Browse categories or search for the service you need."),
    Para::Bullet("Compare verified providers, their reviews and prices."),
    Para::Bullet("Book a time that works for you and pay securely."),
    Para::Title("For providers"),
    Para::Bullet("Create your profile and choose the services you offer."),
    Para::Bullet("Upload your license, insurance and ID for verification."),
    Para::Bullet("Once approved, receive bookings from customers nearby."),
    Para::Title("Trust and safety"),
    Para::Body(
        "Every provider is reviewed by our team before they can accept bookings. \
         Documents are checked by a person, not just an algorithm.",
    ),
    Para::Title("Contact"),
    Para::Body("support@servly.app"),
    Para::Caption("Servly is an independent marketplace. Providers are not Servly employees."),
];

fn lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in CONTENT {
        match block {
            Para::Heading(text) => {
                lines.push(Line::styled(*text, theme.typography(TextVariant::Heading)));
                lines.push(Line::from(""));
            }
            Para::Title(text) => {
                lines.push(Line::from(""));
                lines.push(Line::styled(*text, theme.typography(TextVariant::Title)));
            }
            Para::Body(text) => lines.push(Line::styled(*text, theme.typography(TextVariant::Body))),
            Para::Bullet(text) => lines.push(Line::styled(
                format!("  • {text}"),
                theme.typography(TextVariant::Body),
            )),
            Para::Caption(text) => {
                lines.push(Line::from(""));
                lines.push(Line::styled(*text, theme.typography(TextVariant::Caption)));
            }
        }
    }
    lines
}

pub struct AboutPage {
    scroll: Scroll,
    resolver: Arc<KeyResolver>,
}

impl AboutPage {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            scroll: Scroll::default(),
            resolver,
        }
    }
}

impl Screen for AboutPage {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        Ok(if self.scroll.handle_key(&key, &self.resolver) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        })
    }

    fn update(&mut self) -> Result<ScreenMsg> {
        Ok(ScreenMsg::Idle)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .padding(Padding::horizontal(2));
        let inner = block.inner(area);
        let lines = lines(theme);
        // Wrapped height is at least the line count.
        self.scroll.clamp(lines.len(), inner.height);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll.0, 0));
        frame.render_widget(paragraph, area);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["About".to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![Keybinding::new(
            format!(
                "{}/{}",
                self.resolver.display_nav(NavAction::Up),
                self.resolver.display_nav(NavAction::Down)
            ),
            "Scroll",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_covers_both_audiences() {
        let text: Vec<String> = lines(&Theme::default())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(text[0], "About Servly");
        assert!(text.iter().any(|l| l == "For customers"));
        assert!(text.iter().any(|l| l == "For providers"));
        assert!(text.iter().any(|l| l.contains("support@servly.app")));
    }
}
