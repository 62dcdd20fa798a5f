use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, SearchAction};
use crate::ui::{Component, EventResult, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchBarEvent {
    /// Query text changed while typing.
    Changed(String),
    /// Enter pressed; focus leaves the bar, query is kept.
    Submitted(String),
    /// Search closed; query is cleared.
    Cleared,
}

/// Search input shown above a filterable view.
///
/// Unfocused it only reacts to the toggle key, so it can sit in front of a
/// grid or table without stealing navigation keys.
pub struct SearchBar {
    query: String,
    placeholder: String,
    focused: bool,
    resolver: Arc<KeyResolver>,
}

impl SearchBar {
    pub fn new(placeholder: impl Into<String>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            query: String::new(),
            placeholder: placeholder.into(),
            focused: false,
            resolver,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[cfg(test)]
    pub fn focus(&mut self) {
        self.focused = true;
    }

    fn changed(&self) -> EventResult<SearchBarEvent> {
        SearchBarEvent::Changed(self.query.clone()).into()
    }
}

impl Component for SearchBar {
    type Output = SearchBarEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.focused {
            if self.resolver.matches_search(&key, SearchAction::Toggle) {
                self.focused = true;
                return Ok(EventResult::Consumed);
            }
            return Ok(EventResult::Ignored);
        }

        if self.resolver.matches_search(&key, SearchAction::Exit) {
            self.focused = false;
            self.query.clear();
            return Ok(SearchBarEvent::Cleared.into());
        }

        Ok(match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => {
                self.focused = false;
                SearchBarEvent::Submitted(self.query.clone()).into()
            }
            (KeyCode::Backspace, _) => {
                if self.query.pop().is_some() {
                    self.changed()
                } else {
                    EventResult::Consumed
                }
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.query.clear();
                self.changed()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.query.push(c);
                self.changed()
            }
            _ => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focused {
            theme.border_focused()
        } else {
            theme.border()
        };

        let mut spans = vec![Span::styled("⌕ ", Style::default().fg(theme.overlay1()))];
        if self.query.is_empty() && !self.focused {
            spans.push(Span::styled(
                format!(
                    "{} ({} to search)",
                    self.placeholder,
                    self.resolver.display_search(SearchAction::Toggle)
                ),
                Style::default().fg(theme.overlay0()),
            ));
        } else {
            spans.push(Span::styled(
                self.query.clone(),
                Style::default().fg(theme.text()),
            ));
            if self.focused {
                spans.push(Span::styled(
                    " ",
                    Style::default().bg(theme.text()).add_modifier(Modifier::BOLD),
                ));
            }
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.surface0()));

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn bar() -> SearchBar {
        SearchBar::new("Search services", Arc::new(KeyResolver::default()))
    }

    #[test]
    fn test_unfocused_bar_ignores_typing() {
        let mut bar = bar();
        let result = bar.handle_key(key(KeyCode::Char('j'))).unwrap();
        assert_eq!(result, EventResult::Ignored);
        assert!(bar.query().is_empty());
    }

    #[test]
    fn test_typing_emits_changes() {
        let mut bar = bar();
        bar.handle_key(key(KeyCode::Char('/'))).unwrap();
        assert!(bar.is_focused());

        bar.handle_key(key(KeyCode::Char('p'))).unwrap();
        let result = bar.handle_key(key(KeyCode::Char('l'))).unwrap();
        assert_eq!(result, EventResult::Event(SearchBarEvent::Changed("pl".into())));

        let result = bar.handle_key(key(KeyCode::Backspace)).unwrap();
        assert_eq!(result, EventResult::Event(SearchBarEvent::Changed("p".into())));
    }

    #[test]
    fn test_submit_keeps_query_and_releases_focus() {
        let mut bar = bar();
        bar.focus();
        bar.handle_key(key(KeyCode::Char('x'))).unwrap();
        let result = bar.handle_key(key(KeyCode::Enter)).unwrap();
        assert_eq!(result, EventResult::Event(SearchBarEvent::Submitted("x".into())));
        assert!(!bar.is_focused());
        assert_eq!(bar.query(), "x");
    }

    #[test]
    fn test_exit_clears_query() {
        let mut bar = bar();
        bar.focus();
        bar.handle_key(key(KeyCode::Char('x'))).unwrap();
        let result = bar.handle_key(key(KeyCode::Esc)).unwrap();
        assert_eq!(result, EventResult::Event(SearchBarEvent::Cleared));
        assert!(bar.query().is_empty());
    }
}
