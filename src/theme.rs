mod typography;

use catppuccin::PALETTE;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

pub use typography::TextVariant;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Colour tokens shared by every screen and widget.
///
/// Values are plain colours so any palette can back them; the Catppuccin
/// flavours and the Servly brand palette are provided below.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    // Base colors
    pub base: Color,
    pub mantle: Color,
    pub crust: Color,

    // Surface colors
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,

    // Overlay colors
    pub overlay0: Color,
    pub overlay1: Color,
    pub overlay2: Color,

    // Text colors
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,

    // Accent colors
    pub rosewater: Color,
    pub flamingo: Color,
    pub pink: Color,
    pub mauve: Color,
    pub red: Color,
    pub maroon: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub teal: Color,
    pub sky: Color,
    pub sapphire: Color,
    pub blue: Color,
    pub lavender: Color,

    pub border_type: BorderType,
}

impl Theme {
    /// Create a theme from a Catppuccin flavor.
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            crust: catppuccin_to_color(&c.crust),
            surface0: catppuccin_to_color(&c.surface0),
            surface1: catppuccin_to_color(&c.surface1),
            surface2: catppuccin_to_color(&c.surface2),
            overlay0: catppuccin_to_color(&c.overlay0),
            overlay1: catppuccin_to_color(&c.overlay1),
            overlay2: catppuccin_to_color(&c.overlay2),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            subtext1: catppuccin_to_color(&c.subtext1),
            rosewater: catppuccin_to_color(&c.rosewater),
            flamingo: catppuccin_to_color(&c.flamingo),
            pink: catppuccin_to_color(&c.pink),
            mauve: catppuccin_to_color(&c.mauve),
            red: catppuccin_to_color(&c.red),
            maroon: catppuccin_to_color(&c.maroon),
            peach: catppuccin_to_color(&c.peach),
            yellow: catppuccin_to_color(&c.yellow),
            green: catppuccin_to_color(&c.green),
            teal: catppuccin_to_color(&c.teal),
            sky: catppuccin_to_color(&c.sky),
            sapphire: catppuccin_to_color(&c.sapphire),
            blue: catppuccin_to_color(&c.blue),
            lavender: catppuccin_to_color(&c.lavender),
            border_type: BorderType::Rounded,
        }
    }

    /// Servly brand palette (dark, teal accent).
    #[must_use]
    pub const fn servly() -> Self {
        #[allow(clippy::cast_possible_truncation)]
        const fn rgb(hex: u32) -> Color {
            Color::Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
        }
        Self {
            base: rgb(0x0F17_2A),
            mantle: rgb(0x0B12_22),
            crust: rgb(0x070C_18),
            surface0: rgb(0x1E29_3B),
            surface1: rgb(0x3341_55),
            surface2: rgb(0x4755_69),
            overlay0: rgb(0x6474_8B),
            overlay1: rgb(0x94A3_B8),
            overlay2: rgb(0xA8B5_C7),
            text: rgb(0xF1F5_F9),
            subtext0: rgb(0xCBD5_E1),
            subtext1: rgb(0xE2E8_F0),
            rosewater: rgb(0xFDE6_E6),
            flamingo: rgb(0xFBCF_E8),
            pink: rgb(0xF472_B6),
            mauve: rgb(0x14B8_A6),
            red: rgb(0xEF44_44),
            maroon: rgb(0xDC26_26),
            peach: rgb(0xFB92_3C),
            yellow: rgb(0xFACC_15),
            green: rgb(0x22C5_5E),
            teal: rgb(0x2DD4_BF),
            sky: rgb(0x38BD_F8),
            sapphire: rgb(0x0EA5_E9),
            blue: rgb(0x3B82_F6),
            lavender: rgb(0x5EEA_D4),
            border_type: BorderType::Rounded,
        }
    }

    /// Catppuccin Mocha theme (dark).
    #[must_use]
    pub fn catppuccin_mocha() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// Catppuccin Latte theme (light).
    #[must_use]
    pub fn catppuccin_latte() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    /// Catppuccin Frappé theme (dark).
    #[must_use]
    pub fn catppuccin_frappe() -> Self {
        Self::from_catppuccin(&PALETTE.frappe)
    }

    /// Catppuccin Macchiato theme (dark).
    #[must_use]
    pub fn catppuccin_macchiato() -> Self {
        Self::from_catppuccin(&PALETTE.macchiato)
    }

    // Base colors
    #[must_use]
    pub const fn base(&self) -> Color {
        self.base
    }

    #[must_use]
    pub const fn mantle(&self) -> Color {
        self.mantle
    }

    #[must_use]
    pub const fn crust(&self) -> Color {
        self.crust
    }

    // Surface colors
    #[must_use]
    pub const fn surface0(&self) -> Color {
        self.surface0
    }

    #[must_use]
    pub const fn surface1(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn surface2(&self) -> Color {
        self.surface2
    }

    // Overlay colors
    #[must_use]
    pub const fn overlay0(&self) -> Color {
        self.overlay0
    }

    #[must_use]
    pub const fn overlay1(&self) -> Color {
        self.overlay1
    }

    #[must_use]
    pub const fn overlay2(&self) -> Color {
        self.overlay2
    }

    // Text colors
    #[must_use]
    pub const fn text(&self) -> Color {
        self.text
    }

    #[must_use]
    pub const fn subtext0(&self) -> Color {
        self.subtext0
    }

    #[must_use]
    pub const fn subtext1(&self) -> Color {
        self.subtext1
    }

    // Accent colors
    #[must_use]
    pub const fn rosewater(&self) -> Color {
        self.rosewater
    }

    #[must_use]
    pub const fn flamingo(&self) -> Color {
        self.flamingo
    }

    #[must_use]
    pub const fn pink(&self) -> Color {
        self.pink
    }

    #[must_use]
    pub const fn mauve(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn red(&self) -> Color {
        self.red
    }

    #[must_use]
    pub const fn maroon(&self) -> Color {
        self.maroon
    }

    #[must_use]
    pub const fn peach(&self) -> Color {
        self.peach
    }

    #[must_use]
    pub const fn yellow(&self) -> Color {
        self.yellow
    }

    #[must_use]
    pub const fn green(&self) -> Color {
        self.green
    }

    #[must_use]
    pub const fn teal(&self) -> Color {
        self.teal
    }

    #[must_use]
    pub const fn sky(&self) -> Color {
        self.sky
    }

    #[must_use]
    pub const fn sapphire(&self) -> Color {
        self.sapphire
    }

    #[must_use]
    pub const fn blue(&self) -> Color {
        self.blue
    }

    #[must_use]
    pub const fn lavender(&self) -> Color {
        self.lavender
    }

    // Semantic colors
    #[must_use]
    pub const fn primary(&self) -> Color {
        self.blue
    }


    #[must_use]
    pub const fn success(&self) -> Color {
        self.green
    }

    #[must_use]
    pub const fn warning(&self) -> Color {
        self.yellow
    }

    #[must_use]
    pub const fn error(&self) -> Color {
        self.red
    }

    #[must_use]
    pub const fn info(&self) -> Color {
        self.sky
    }

    // UI element colors
    #[must_use]
    pub const fn border(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.lavender
    }

    #[must_use]
    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }


    #[must_use]
    pub const fn header(&self) -> Color {
        self.yellow
    }

}

impl Default for Theme {
    fn default() -> Self {
        Self::servly()
    }
}

/// Information about a theme for display in selectors.
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Display name for the theme
    pub name: &'static str,
    /// The theme instance
    pub theme: Theme,
}

impl ThemeInfo {
    const fn new(name: &'static str, theme: Theme) -> Self {
        Self { name, theme }
    }
}

impl std::fmt::Display for ThemeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Returns a list of all available built-in themes.
pub fn available_themes() -> Vec<ThemeInfo> {
    vec![
        ThemeInfo::new("Servly", Theme::servly()),
        ThemeInfo::new("Catppuccin Mocha", Theme::catppuccin_mocha()),
        ThemeInfo::new("Catppuccin Macchiato", Theme::catppuccin_macchiato()),
        ThemeInfo::new("Catppuccin Frappé", Theme::catppuccin_frappe()),
        ThemeInfo::new("Catppuccin Latte", Theme::catppuccin_latte()),
    ]
}

/// Look up a theme by name. Returns the default theme if not found.
pub fn theme_from_name(name: &str) -> Theme {
    available_themes()
        .into_iter()
        .find(|t| t.name == name)
        .map(|t| t.theme)
        .unwrap_or_default()
}

// === Theme Selector View ===

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, ListItem};

use crate::config::{GlobalAction, KeyResolver};
use crate::ui::{Component, EventResult, List, ListEvent, ListRow, Result};

impl ListRow for ThemeInfo {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        ListItem::new(self.name.to_string()).style(Style::default().fg(theme.text()))
    }
}

pub enum ThemeEvent {
    Cancelled,
    Selected(ThemeInfo),
}

pub struct ThemeSelectorView {
    list: List<ThemeInfo>,
    resolver: Arc<KeyResolver>,
}

impl ThemeSelectorView {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            list: List::new(available_themes(), resolver.clone()),
            resolver,
        }
    }
}

impl Component for ThemeSelectorView {
    type Output = ThemeEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_global(&key, GlobalAction::Back)
            || self.resolver.matches_global(&key, GlobalAction::Theme)
        {
            return Ok(ThemeEvent::Cancelled.into());
        }

        let result = self.list.handle_key(key)?;
        Ok(match result {
            EventResult::Event(ListEvent::Activated(info)) => ThemeEvent::Selected(info).into(),
            EventResult::Consumed | EventResult::Event(_) => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(40), Constraint::Percentage(50));

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Select Theme (Enter to confirm, Esc to cancel) ")
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.base()));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        self.list.render(frame, inner, theme);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_theme_from_name() {
        assert_eq!(theme_from_name("Servly").base, Theme::servly().base);
        assert_eq!(
            theme_from_name("Catppuccin Latte").base,
            Theme::catppuccin_latte().base
        );
        // Unknown names fall back to the brand palette.
        assert_eq!(theme_from_name("Solarized").base, Theme::servly().base);
    }

    #[test]
    fn test_servly_palette_values() {
        let theme = Theme::servly();
        assert_eq!(theme.base(), Color::Rgb(0x0F, 0x17, 0x2A));
        assert_eq!(theme.primary(), Color::Rgb(0x3B, 0x82, 0xF6));
    }

    #[test]
    fn test_selector_activates_highlighted_theme() {
        let mut view = ThemeSelectorView::new(Arc::new(KeyResolver::default()));
        view.handle_key(KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE))
            .unwrap();
        let result = view
            .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(
            result,
            EventResult::Event(ThemeEvent::Selected(info)) if info.name == "Catppuccin Mocha"
        ));
    }

    #[test]
    fn test_selector_cancel() {
        let mut view = ThemeSelectorView::new(Arc::new(KeyResolver::default()));
        let result = view
            .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(result, EventResult::Event(ThemeEvent::Cancelled)));
    }
}
