//! Pages without server interaction: sign-up entry, customer dashboard and
//! the static About and Legal content.

mod about;
mod dashboard;
mod legal;
mod signup;

pub use about::AboutPage;
pub use dashboard::CustomerDashboard;
pub use legal::LegalPage;
pub use signup::SignUpPage;

use crossterm::event::KeyEvent;

use crate::config::{KeyResolver, NavAction};

/// Vertical scroll offset shared by the text pages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Scroll(u16);

impl Scroll {
    /// Returns true if the key scrolled.
    fn handle_key(&mut self, key: &KeyEvent, resolver: &KeyResolver) -> bool {
        let next = if resolver.matches_nav(key, NavAction::Down) {
            self.0.saturating_add(1)
        } else if resolver.matches_nav(key, NavAction::Up) {
            self.0.saturating_sub(1)
        } else if resolver.matches_nav(key, NavAction::PageDown) {
            self.0.saturating_add(10)
        } else if resolver.matches_nav(key, NavAction::PageUp) {
            self.0.saturating_sub(10)
        } else if resolver.matches_nav(key, NavAction::Home) {
            0
        } else {
            return false;
        };
        self.0 = next;
        true
    }

    /// Keep the offset within `content_height - viewport`.
    fn clamp(&mut self, content_height: usize, viewport: u16) {
        let max = content_height.saturating_sub(viewport as usize);
        self.0 = self.0.min(u16::try_from(max).unwrap_or(u16::MAX));
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_scroll_clamps() {
        let resolver = KeyResolver::default();
        let mut scroll = Scroll::default();
        assert!(scroll.handle_key(&KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE), &resolver));
        assert_eq!(scroll, Scroll(10));
        scroll.clamp(12, 5);
        assert_eq!(scroll, Scroll(7));
        assert!(scroll.handle_key(&KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE), &resolver));
        assert_eq!(scroll, Scroll(0));
        assert!(!scroll.handle_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE), &resolver));
    }
}
