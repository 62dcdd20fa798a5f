use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;
use crate::config::{DialogAction, GlobalAction, KeyResolver};
use crate::ui::{Component, EventResult, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
    /// Whether this keybinding is also shown in the status bar hints.
    pub hint: bool,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            hint: false,
        }
    }

    pub fn hint(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            hint: true,
        }
    }
}

pub enum HelpEvent {
    Close,
}

struct Section {
    title: String,
    keybindings: Vec<Keybinding>,
}

/// Overlay listing the active screen's bindings followed by the global ones.
pub struct HelpOverlay {
    sections: Vec<Section>,
    resolver: Arc<KeyResolver>,
}

impl HelpOverlay {
    pub fn new(
        screen_title: impl Into<String>,
        local: Vec<Keybinding>,
        global: Vec<Keybinding>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        let mut sections = Vec::new();
        if !local.is_empty() {
            sections.push(Section {
                title: screen_title.into(),
                keybindings: local,
            });
        }
        sections.push(Section {
            title: "Global".to_string(),
            keybindings: global,
        });
        Self { sections, resolver }
    }
}

impl Component for HelpOverlay {
    type Output = HelpEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_global(&key, GlobalAction::Help)
            || self.resolver.matches_global(&key, GlobalAction::Back)
            || self.resolver.matches_dialog(&key, DialogAction::Dismiss)
        {
            return Ok(HelpEvent::Close.into());
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(70));
        frame.render_widget(Clear, popup_area);

        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.text());
        let section_style = Style::default()
            .fg(theme.subtext0())
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("── {} ──", section.title),
                section_style,
            )));
            for kb in &section.keybindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>14}", kb.key), key_style),
                    Span::raw("  "),
                    Span::styled(kb.description.clone(), desc_style),
                ]));
            }
        }

        let block = Block::default()
            .title(format!(
                " Help (press {} or {} to close) ",
                self.resolver.display_global(GlobalAction::Help),
                self.resolver.display_global(GlobalAction::Back)
            ))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_empty_local_section_is_skipped() {
        let overlay = HelpOverlay::new(
            "Documents",
            vec![],
            vec![Keybinding::new("q", "Quit")],
            Arc::new(KeyResolver::default()),
        );
        assert_eq!(overlay.sections.len(), 1);
        assert_eq!(overlay.sections[0].title, "Global");
    }

    #[test]
    fn test_help_key_closes() {
        let mut overlay = HelpOverlay::new(
            "Documents",
            vec![Keybinding::hint("u", "Upload")],
            vec![],
            Arc::new(KeyResolver::default()),
        );
        let result = overlay
            .handle_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(result, EventResult::Event(HelpEvent::Close)));
    }
}
