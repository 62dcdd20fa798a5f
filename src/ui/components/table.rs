use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table as RatatuiTable, TableState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self { header, constraint }
    }
}

pub trait TableRow {
    fn columns() -> &'static [ColumnDef];
    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;
}

/// Read-only scrollable table.
pub struct Table<T: TableRow> {
    items: Vec<T>,
    state: TableState,
    title: Option<String>,
    empty_message: String,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow> Table<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut table = Self {
            items: Vec::new(),
            state: TableState::default(),
            title: None,
            empty_message: "Nothing to show".to_string(),
            resolver,
        };
        table.set_items(items);
        table
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        if self.items.is_empty() {
            self.state.select(None);
        } else {
            let last = self.items.len() - 1;
            self.state
                .select(Some(self.state.selected().map_or(0, |i| i.min(last))));
        }
    }

    fn block(&self, theme: &Theme) -> Block<'static> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));
        if let Some(title) = &self.title {
            block = block.title(title.clone()).title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            );
        }
        block
    }
}

impl<T: TableRow> Component for Table<T> {
    type Output = ();

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.items.is_empty() {
            return Ok(EventResult::Ignored);
        }
        let last = self.items.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let step = 10;

        let next = if self.resolver.matches_nav(&key, NavAction::Down) {
            usize::min(current + 1, last)
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            current.saturating_sub(1)
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            usize::min(current + step, last)
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            current.saturating_sub(step)
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            0
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            last
        } else {
            return Ok(EventResult::Ignored);
        };

        self.state.select(Some(next));
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = self.block(theme);

        if self.items.is_empty() {
            let placeholder = Paragraph::new(self.empty_message.clone())
                .style(Style::default().fg(theme.overlay1()))
                .centered()
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let columns = T::columns();
        let header = Row::new(columns.iter().map(|c| {
            Cell::from(c.header).style(
                Style::default()
                    .fg(theme.header())
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .style(Style::default().bg(theme.surface0()));

        let rows = self
            .items
            .iter()
            .map(|item| Row::new(item.render_cells(theme)).style(Style::default().fg(theme.text())));

        let table = RatatuiTable::new(rows, columns.iter().map(|c| c.constraint))
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
