use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap};

use super::Scroll;
use crate::Theme;
use crate::config::{KeyResolver, LegalAction, NavAction};
use crate::screen::{Screen, ScreenMsg};
use crate::theme::TextVariant;
use crate::ui::{EventResult, Keybinding, Result};

const LAST_UPDATED: &str = "Last updated: January 2025";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegalTab {
    #[default]
    TermsOfService,
    PrivacyPolicy,
    ProviderAgreement,
}

impl LegalTab {
    pub const ALL: [Self; 3] = [
        Self::TermsOfService,
        Self::PrivacyPolicy,
        Self::ProviderAgreement,
    ];

    pub const fn title(self) -> &'static str {
        match self {
            Self::TermsOfService => "Terms of Service",
            Self::PrivacyPolicy => "Privacy Policy",
            Self::ProviderAgreement => "Provider Agreement",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::TermsOfService => 0,
            Self::PrivacyPolicy => 1,
            Self::ProviderAgreement => 2,
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Numbered sections as (heading, body).
    const fn sections(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::TermsOfService => &[
                (
                    "1. Acceptance of terms",
                    "By creating an account or using Servly you agree to these terms. If you do \
                     not agree, do not use the service.",
                ),
                (
                    "2. The marketplace",
                    "Servly connects customers with independent service providers. Servly is not \
                     a party to the agreement between a customer and a provider and does not \
                     perform the services itself.",
                ),
                (
                    "3. Accounts",
                    "You are responsible for keeping your login credentials secure and for all \
                     activity under your account. Each account has exactly one role.",
                ),
                (
                    "4. Bookings and payments",
                    "Prices are set by providers. Payments are processed by our payment partner \
                     when a booking is confirmed.",
                ),
                (
                    "5. Cancellations",
                    "Bookings cancelled less than 24 hours before the appointment may incur a \
                     cancellation fee set by the provider.",
                ),
                (
                    "6. Limitation of liability",
                    "To the extent permitted by law, Servly is not liable for the quality of work \
                     performed by providers or for indirect damages.",
                ),
            ],
            Self::PrivacyPolicy => &[
                (
                    "1. Information we collect",
                    "Account details you give us, bookings you make, and verification documents \
                     uploaded by providers.",
                ),
                (
                    "2. How we use it",
                    "To operate the marketplace, verify providers, process payments and contact \
                     you about your bookings.",
                ),
                (
                    "3. Sharing",
                    "We share booking details with the provider or customer involved. We never \
                     sell your personal information.",
                ),
                (
                    "4. Verification documents",
                    "Licenses, insurance certificates and identity documents are visible only to \
                     our review team and are kept for as long as the provider account exists.",
                ),
                (
                    "5. Your rights",
                    "You can request a copy of your data or its deletion at any time by writing \
                     to privacy@servly.app.",
                ),
            ],
            Self::ProviderAgreement => &[
                (
                    "1. Eligibility",
                    "Providers must hold any license their trade requires and carry liability \
                     insurance where applicable.",
                ),
                (
                    "2. Verification",
                    "Before accepting bookings you must upload a valid license, proof of \
                     insurance and a government ID. Our team reviews every submission.",
                ),
                (
                    "3. Service standards",
                    "Arrive on time, do the work as described, and communicate changes to the \
                     customer before the job starts.",
                ),
                (
                    "4. Fees",
                    "Servly charges a service fee on each completed booking. The current rate is \
                     shown in your provider dashboard.",
                ),
                (
                    "5. Termination",
                    "We may suspend providers whose documents expire or who repeatedly receive \
                     poor reviews.",
                ),
            ],
        }
    }
}

fn lines(tab: LegalTab, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(tab.title(), theme.typography(TextVariant::Heading)),
        Line::styled(LAST_UPDATED, theme.typography(TextVariant::Caption)),
    ];
    for (heading, body) in tab.sections() {
        lines.push(Line::from(""));
        lines.push(Line::styled(*heading, theme.typography(TextVariant::Title)));
        lines.push(Line::styled(*body, theme.typography(TextVariant::Body)));
    }
    lines
}

/// Terms, privacy and provider agreement behind a tab bar.
///
/// The selected tab lives only in this value, so re-entering the page
/// starts over at the first tab.
pub struct LegalPage {
    tab: LegalTab,
    scroll: Scroll,
    resolver: Arc<KeyResolver>,
}

impl LegalPage {
    pub fn new(resolver: Arc<KeyResolver>) -> Self {
        Self {
            tab: LegalTab::default(),
            scroll: Scroll::default(),
            resolver,
        }
    }

    pub const fn tab(&self) -> LegalTab {
        self.tab
    }

    fn select(&mut self, tab: LegalTab) {
        self.tab = tab;
        self.scroll = Scroll::default();
    }
}

impl Screen for LegalPage {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if self.resolver.matches_legal(&key, LegalAction::NextTab) {
            self.select(self.tab.next());
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_legal(&key, LegalAction::PreviousTab) {
            self.select(self.tab.previous());
            return Ok(EventResult::Consumed);
        }
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
        let [tabs_area, body_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

        let tabs = Tabs::new(LegalTab::ALL.iter().map(|t| t.title()))
            .select(self.tab.index())
            .style(Style::default().fg(theme.subtext0()))
            .highlight_style(
                Style::default()
                    .fg(theme.primary())
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" | ")
            .padding(" ", " ");
        frame.render_widget(tabs, tabs_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()))
            .padding(Padding::horizontal(2));
        let lines = lines(self.tab, theme);
        self.scroll.clamp(lines.len(), block.inner(body_area).height);

        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((self.scroll.0, 0)),
            body_area,
        );
    }

    fn breadcrumbs(&self) -> Vec<String> {
        vec!["Legal".to_string(), self.tab.title().to_string()]
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(
                self.resolver.display_legal(LegalAction::NextTab),
                "Next tab",
            ),
            Keybinding::new(
                self.resolver.display_legal(LegalAction::PreviousTab),
                "Previous tab",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Scroll",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn press(page: &mut LegalPage, code: KeyCode) -> EventResult<()> {
        page.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_tabs_cycle_in_both_directions() {
        assert_eq!(LegalTab::TermsOfService.next(), LegalTab::PrivacyPolicy);
        assert_eq!(LegalTab::ProviderAgreement.next(), LegalTab::TermsOfService);
        assert_eq!(LegalTab::TermsOfService.previous(), LegalTab::ProviderAgreement);
        for tab in LegalTab::ALL {
            assert_eq!(tab.next().previous(), tab);
        }
    }

    #[test]
    fn test_keys_switch_tabs() {
        let mut page = LegalPage::new(Arc::new(KeyResolver::default()));
        assert_eq!(page.tab(), LegalTab::TermsOfService);

        assert_eq!(press(&mut page, KeyCode::Tab), EventResult::Consumed);
        assert_eq!(page.tab(), LegalTab::PrivacyPolicy);
        assert_eq!(page.breadcrumbs(), vec!["Legal", "Privacy Policy"]);

        press(&mut page, KeyCode::Left);
        press(&mut page, KeyCode::Left);
        assert_eq!(page.tab(), LegalTab::ProviderAgreement);
    }

    #[test]
    fn test_new_page_starts_on_first_tab() {
        let resolver = Arc::new(KeyResolver::default());
        let mut page = LegalPage::new(resolver.clone());
        press(&mut page, KeyCode::Tab);
        assert_eq!(LegalPage::new(resolver).tab(), LegalTab::TermsOfService);
    }

    #[test]
    fn test_unbound_keys_fall_through() {
        let mut page = LegalPage::new(Arc::new(KeyResolver::default()));
        assert_eq!(press(&mut page, KeyCode::Char('q')), EventResult::Ignored);
    }

    #[test]
    fn test_every_tab_has_content() {
        let theme = Theme::default();
        for tab in LegalTab::ALL {
            assert!(lines(tab, &theme).len() > 4, "{} is empty", tab.title());
        }
    }
}
