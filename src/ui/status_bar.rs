use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction};
use crate::model::User;
use crate::ui::Keybinding;

const LOGO: &[&str] = &[
    r"   ___          _     ",
    r"  / __| ___ _ _| |_  _",
    r"  \__ \/ -_) '_\ V / |",
    r"  |___/\___|_|  \_/|_|",
    r"         servly       ",
];

/// Bottom bar: session info, key hints and the logo.
pub struct StatusBar {
    user: Option<User>,
    api_url: String,
    route: String,
    document_count: Option<usize>,
    resolver: Arc<KeyResolver>,
}

impl StatusBar {
    pub fn new(api_url: impl Into<String>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            user: None,
            api_url: api_url.into(),
            route: String::new(),
            document_count: None,
            resolver,
        }
    }

    pub fn set_user(&mut self, user: Option<User>) {
        self.user = user;
    }

    pub fn set_route(&mut self, path: impl Into<String>) {
        self.route = path.into();
    }

    pub const fn set_document_count(&mut self, count: Option<usize>) {
        self.document_count = count;
    }

    pub const fn document_count(&self) -> Option<usize> {
        self.document_count
    }

    pub fn render_with_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [status, hints, logo] = Layout::horizontal([
            Constraint::Length(42),
            Constraint::Min(20),
            Constraint::Length(24),
        ])
        .areas(inner);

        self.render_status_info(frame, status, theme);
        self.render_keybindings(frame, hints, theme, local_keybindings);
        Self::render_logo(frame, logo, theme);
    }

    fn render_status_info(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let w = area.width as usize;
        let label_style = Style::default().fg(theme.overlay1());
        let value_style = Style::default().fg(theme.text());

        let mut lines = match &self.user {
            Some(user) => {
                let role = user.role.map_or("not selected", |r| r.as_str());
                vec![
                    Line::from(Span::styled(
                        truncate_str(&user.label(), w),
                        Style::default()
                            .fg(theme.lavender())
                            .add_modifier(Modifier::BOLD),
                    )),
                    status_line("role", role, w, label_style, Style::default().fg(theme.blue())),
                ]
            }
            None => vec![
                Line::from(Span::styled(
                    "Not signed in",
                    Style::default()
                        .fg(theme.overlay0())
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ],
        };
        lines.push(status_line("page", &self.route, w, label_style, value_style));
        lines.push(status_line("api", &self.api_url, w, label_style, value_style));
        if let Some(count) = self.document_count {
            lines.push(status_line(
                "documents",
                &count.to_string(),
                w,
                label_style,
                value_style,
            ));
        }

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let global = self.global_keybindings();
        let hints: Vec<&Keybinding> = local_keybindings
            .iter()
            .filter(|kb| kb.hint)
            .chain(global.iter().filter(|kb| kb.hint))
            .collect();

        if hints.is_empty() || area.height == 0 {
            return;
        }

        // Align the separators into one straight column.
        let max_key_w = hints.iter().map(|kb| kb.key.chars().count()).max().unwrap_or(1);
        let max_desc_w = hints
            .iter()
            .map(|kb| kb.description.chars().count())
            .max()
            .unwrap_or(1);
        let col_width = u16::try_from(max_key_w + 3 + max_desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let col = i / num_rows;
            if col >= num_cols {
                break;
            }
            columns[col].push(Line::from(vec![
                Span::styled(
                    format!("{:>width$}", kb.key, width = max_key_w),
                    Style::default().fg(theme.peach()),
                ),
                Span::styled(" │ ", Style::default().fg(theme.surface2())),
                Span::styled(kb.description.clone(), Style::default().fg(theme.subtext0())),
            ]));
        }

        let areas = Layout::horizontal(vec![Constraint::Length(col_width); num_cols]).split(area);
        for (lines, col_area) in columns.into_iter().zip(areas.iter()) {
            frame.render_widget(Paragraph::new(lines), *col_area);
        }
    }

    fn render_logo(frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines: Vec<Line> = LOGO
            .iter()
            .map(|line| {
                Line::from(Span::styled(
                    *line,
                    Style::default()
                        .fg(theme.mauve())
                        .add_modifier(Modifier::BOLD),
                ))
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    /// Global keybindings, also listed in the help overlay.
    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "Help"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Back), "Back"),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Quit), "Quit"),
            Keybinding::new(self.resolver.display_global(GlobalAction::About), "About"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Legal), "Legal"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Theme), "Theme"),
            Keybinding::new(self.resolver.display_nav(NavAction::Select), "Select"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navigate",
            ),
        ]
    }
}

/// `     label value`, label right-aligned.
fn status_line<'a>(
    label: &'a str,
    value: &str,
    max_width: usize,
    label_style: Style,
    value_style: Style,
) -> Line<'a> {
    const LABEL_W: usize = 10;
    let available = max_width.saturating_sub(LABEL_W + 1);
    Line::from(vec![
        Span::styled(format!("{label:>LABEL_W$}"), label_style),
        Span::raw(" "),
        Span::styled(truncate_str(value, available), value_style),
    ])
}

fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_width).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("http://localhost:5000", 40), "http://localhost:5000");
        assert_eq!(truncate_str("http://localhost:5000", 10), "http://...");
        assert_eq!(truncate_str("ünïcödé", 3), "ünï");
    }

    #[test]
    fn test_global_hints_present() {
        let bar = StatusBar::new("http://localhost:5000", Arc::new(KeyResolver::default()));
        let hints: Vec<_> = bar
            .global_keybindings()
            .into_iter()
            .filter(|kb| kb.hint)
            .map(|kb| kb.description)
            .collect();
        assert_eq!(hints, vec!["Help", "Back", "Quit"]);
    }
}
