//! Typography tokens.
//!
//! A terminal has one font size, so each variant maps to a colour and
//! modifier combination drawn from the active [`Theme`].

use ratatui::style::{Modifier, Style};

use super::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextVariant {
    /// Page headings ("About Servly").
    Heading,
    /// Section titles.
    Title,
    Subtitle,
    Body,
    /// Secondary text such as timestamps and hints.
    Caption,
    /// Small uppercase-style labels above values.
    Label,
}

impl TextVariant {
    #[cfg(test)]
    pub const ALL: [Self; 6] = [
        Self::Heading,
        Self::Title,
        Self::Subtitle,
        Self::Body,
        Self::Caption,
        Self::Label,
    ];

    #[must_use]
    pub fn style(self, theme: &Theme) -> Style {
        match self {
            Self::Heading => Style::default()
                .fg(theme.mauve())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Self::Title => Style::default()
                .fg(theme.text())
                .add_modifier(Modifier::BOLD),
            Self::Subtitle => Style::default().fg(theme.subtext1()),
            Self::Body => Style::default().fg(theme.text()),
            Self::Caption => Style::default()
                .fg(theme.overlay1())
                .add_modifier(Modifier::ITALIC),
            Self::Label => Style::default()
                .fg(theme.subtext0())
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Style for a typography variant.
    #[must_use]
    pub fn typography(&self, variant: TextVariant) -> Style {
        variant.style(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_is_bold_accent() {
        let theme = Theme::servly();
        let style = theme.typography(TextVariant::Heading);
        assert_eq!(style.fg, Some(theme.mauve()));
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_every_variant_has_a_colour() {
        let theme = Theme::catppuccin_latte();
        for variant in TextVariant::ALL {
            assert!(theme.typography(variant).fg.is_some(), "{variant:?}");
        }
    }
}
