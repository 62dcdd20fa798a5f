use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::Theme;
use crate::app::AppMessage;
use crate::catalog::{self, CATEGORIES, Category};
use crate::config::{DashboardAction, KeyResolver, NavAction, SearchAction};
use crate::screen::{Screen, ScreenMsg, merge};
use crate::search::Matcher;
use crate::theme::TextVariant;
use crate::ui::{
    CategoryIcon, Component, EventResult, Keybinding, Result, SearchBar, SearchBarEvent,
    SectionHeader, Toast,
};

#[derive(Debug)]
enum DashboardMsg {
    Open(&'static Category),
}

/// Customer home: category search and the category grid.
pub struct CustomerDashboard {
    search: SearchBar,
    matcher: Matcher,
    show_all: bool,
    selected: usize,
    /// Grid width in tiles, as laid out by the last render.
    columns: usize,
    resolver: Arc<KeyResolver>,
    msg_tx: UnboundedSender<DashboardMsg>,
    msg_rx: UnboundedReceiver<DashboardMsg>,
    app_tx: UnboundedSender<AppMessage>,
}

impl CustomerDashboard {
    pub fn new(resolver: Arc<KeyResolver>, app_tx: UnboundedSender<AppMessage>) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            search: SearchBar::new("Search services", resolver.clone()),
            matcher: Matcher::new(),
            show_all: false,
            selected: 0,
            columns: 3,
            resolver,
            msg_tx,
            msg_rx,
            app_tx,
        }
    }

    /// Categories currently shown, best match first while searching.
    ///
    /// A query searches the whole catalog regardless of "See all".
    fn categories(&self) -> Vec<&'static Category> {
        let query = self.search.query().trim();
        if query.is_empty() {
            return catalog::visible(self.show_all).collect();
        }
        let mut scored: Vec<_> = CATEGORIES
            .iter()
            .filter_map(|c| {
                self.matcher
                    .best_score([c.name, c.description], query)
                    .map(|score| (score, c))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, c)| c).collect()
    }

    fn move_selection(&mut self, key: &KeyEvent, len: usize) -> bool {
        let columns = self.columns.max(1);
        if self.resolver.matches_nav(key, NavAction::Right) {
            if self.selected + 1 < len {
                self.selected += 1;
            }
        } else if self.resolver.matches_nav(key, NavAction::Left) {
            self.selected = self.selected.saturating_sub(1);
        } else if self.resolver.matches_nav(key, NavAction::Down) {
            if self.selected + columns < len {
                self.selected += columns;
            }
        } else if self.resolver.matches_nav(key, NavAction::Up) {
            if self.selected >= columns {
                self.selected -= columns;
            }
        } else {
            return false;
        }
        true
    }

    fn process_message(&self, msg: DashboardMsg) -> ScreenMsg {
        match msg {
            DashboardMsg::Open(category) => {
                tracing::debug!(slug = category.slug, "Category opened");
                let _ = self.app_tx.send(AppMessage::ShowToast(Toast::info(
                    format!("{} {}", category.icon, category.name),
                    format!("{}. Booking opens soon in your area.", category.description),
                )));
                ScreenMsg::Idle
            }
        }
    }

    fn render_grid(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, items: &[&Category]) {
        if items.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(
                    format!("No services match \"{}\"", self.search.query()),
                    theme.typography(TextVariant::Caption),
                ))
                .alignment(Alignment::Center),
                area,
            );
            return;
        }

        let tile_width = CategoryIcon::WIDTH + 1;
        let columns = usize::from((area.width / tile_width).max(1));
        let visible_rows = usize::from((area.height / CategoryIcon::HEIGHT).max(1));
        self.columns = columns;
        self.selected = self.selected.min(items.len() - 1);

        let selected_row = self.selected / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);

        for (i, category) in items.iter().enumerate().skip(first_row * columns) {
            let row = i / columns - first_row;
            if row >= visible_rows {
                break;
            }
            let col = i % columns;
            // Both bounded by the area dimensions above.
            let x = area.x + u16::try_from(col).unwrap_or(0) * tile_width;
            let y = area.y + u16::try_from(row).unwrap_or(0) * CategoryIcon::HEIGHT;
            let tile = Rect::new(x, y, CategoryIcon::WIDTH, CategoryIcon::HEIGHT)
                .intersection(area);
            frame.render_widget(
                CategoryIcon::new(category.icon, category.name, theme).selected(i == self.selected),
                tile,
            );
        }
    }
}

impl Screen for CustomerDashboard {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        match self.search.handle_key(key)? {
            EventResult::Event(
                SearchBarEvent::Changed(_) | SearchBarEvent::Submitted(_) | SearchBarEvent::Cleared,
            ) => {
                self.selected = 0;
                return Ok(EventResult::Consumed);
            }
            EventResult::Consumed => return Ok(EventResult::Consumed),
            EventResult::Ignored => {}
        }

        if self.resolver.matches_dashboard(&key, DashboardAction::SeeAll) {
            self.show_all = !self.show_all;
            self.selected = 0;
            return Ok(EventResult::Consumed);
        }

        let items = self.categories();
        if self.resolver.matches_nav(&key, NavAction::Select) {
            if let Some(category) = items.get(self.selected) {
                let _ = self.msg_tx.send(DashboardMsg::Open(*category));
            }
            return Ok(EventResult::Consumed);
        }

        Ok(if self.move_selection(&key, items.len()) {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        })
    }

    fn update(&mut self) -> Result<ScreenMsg> {
        let mut result = ScreenMsg::Idle;
        while let Ok(msg) = self.msg_rx.try_recv() {
            let next = self.process_message(msg);
            result = merge(result, next);
        }
        Ok(result)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [search_area, _, header_area, _, grid_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        self.search.render(frame, search_area, theme);

        let searching = !self.search.query().trim().is_empty();
        let title = if searching { "Results" } else { "Browse categories" };
        let mut header = SectionHeader::new(title, theme);
        if !searching {
            let label = if self.show_all { "Show popular" } else { "See all" };
            header = header.action(self.resolver.display_dashboard(DashboardAction::SeeAll), label);
        }
        frame.render_widget(header, header_area);

        let items = self.categories();
        self.render_grid(frame, grid_area, theme, &items);
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Customer".to_string(), "Home".to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        if self.search.is_focused() {
            return vec![
                Keybinding::hint("Enter", "Apply"),
                Keybinding::hint(self.resolver.display_search(SearchAction::Exit), "Clear search"),
            ];
        }
        vec![
            Keybinding::hint(self.resolver.display_search(SearchAction::Toggle), "Search"),
            Keybinding::hint(
                self.resolver.display_dashboard(DashboardAction::SeeAll),
                "See all",
            ),
            Keybinding::new(self.resolver.display_nav(NavAction::Select), "Open category"),
            Keybinding::new(
                format!(
                    "{}/{}/{}/{}",
                    self.resolver.display_nav(NavAction::Left),
                    self.resolver.display_nav(NavAction::Down),
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Right)
                ),
                "Move",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::ui::ToastType;

    fn dashboard() -> (CustomerDashboard, UnboundedReceiver<AppMessage>) {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        (
            CustomerDashboard::new(Arc::new(KeyResolver::default()), app_tx),
            app_rx,
        )
    }

    fn press(dashboard: &mut CustomerDashboard, code: KeyCode) -> EventResult<()> {
        dashboard
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(dashboard: &mut CustomerDashboard, text: &str) {
        for c in text.chars() {
            press(dashboard, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_see_all_toggles_full_catalog() {
        let (mut dashboard, _rx) = dashboard();
        let popular = dashboard.categories().len();
        assert!(popular < CATEGORIES.len());

        press(&mut dashboard, KeyCode::Char('s'));
        assert_eq!(dashboard.categories().len(), CATEGORIES.len());

        press(&mut dashboard, KeyCode::Char('s'));
        assert_eq!(dashboard.categories().len(), popular);
    }

    #[test]
    fn test_search_filters_and_ranks() {
        let (mut dashboard, _rx) = dashboard();
        press(&mut dashboard, KeyCode::Char('/'));
        type_str(&mut dashboard, "plumb");

        let results = dashboard.categories();
        assert_eq!(results.first().map(|c| c.slug), Some("plumbing"));
        assert!(results.len() < CATEGORIES.len());
    }

    #[test]
    fn test_search_swallows_letters_while_focused() {
        let (mut dashboard, _rx) = dashboard();
        press(&mut dashboard, KeyCode::Char('/'));
        // 's' is typed into the query instead of toggling "See all".
        assert_eq!(press(&mut dashboard, KeyCode::Char('s')), EventResult::Consumed);
        assert!(!dashboard.show_all);
        assert_eq!(dashboard.search.query(), "s");
    }

    #[test]
    fn test_grid_navigation_stays_in_bounds() {
        let (mut dashboard, _rx) = dashboard();
        dashboard.columns = 3;
        let len = dashboard.categories().len();

        press(&mut dashboard, KeyCode::Left);
        assert_eq!(dashboard.selected, 0);
        press(&mut dashboard, KeyCode::Down);
        assert_eq!(dashboard.selected, 3);
        press(&mut dashboard, KeyCode::Down);
        assert_eq!(dashboard.selected, 3.min(len - 1));
        press(&mut dashboard, KeyCode::Up);
        assert_eq!(dashboard.selected, 0);
        press(&mut dashboard, KeyCode::Right);
        assert_eq!(dashboard.selected, 1);
    }

    #[test]
    fn test_select_shows_info_toast() {
        let (mut dashboard, mut app_rx) = dashboard();
        let first = dashboard.categories()[0];
        press(&mut dashboard, KeyCode::Enter);
        assert!(matches!(dashboard.update().unwrap(), ScreenMsg::Idle));

        match app_rx.try_recv() {
            Ok(AppMessage::ShowToast(toast)) => {
                assert_eq!(toast.toast_type, ToastType::Info);
                assert!(toast.title.contains(first.name));
            }
            _ => panic!("expected a toast"),
        }
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (mut dashboard, _rx) = dashboard();
        assert_eq!(press(&mut dashboard, KeyCode::Char('q')), EventResult::Ignored);
    }
}
