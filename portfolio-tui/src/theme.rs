//! Color palette and semantic styles.
//!
//! A dark green "field terminal" palette: near-black green backgrounds, a
//! mint accent for data and selection, warm yellow for the active facet.

use ratatui::style::Color;

pub mod colors {
    use super::Color;

    // === Backgrounds ===
    pub const BG_DARK: Color = Color::Rgb(0x0B, 0x14, 0x10);
    pub const BG_MEDIUM: Color = Color::Rgb(0x10, 0x1C, 0x17);
    pub const BG_HIGHLIGHT: Color = Color::Rgb(0x1B, 0x2E, 0x25);

    // === Text ===
    pub const FG_PRIMARY: Color = Color::Rgb(0xD8, 0xE6, 0xDD);
    pub const FG_DIM: Color = Color::Rgb(0x7D, 0x93, 0x87);
    pub const FG_HINT: Color = Color::Rgb(0x4E, 0x60, 0x56);

    // === Accents ===
    /// Mint accent, used for data series and focus
    pub const GREEN: Color = Color::Rgb(0x52, 0xB7, 0x88);
    pub const GREEN_LIGHT: Color = Color::Rgb(0x95, 0xD5, 0xB2);
    /// Active facet highlight
    pub const YELLOW: Color = Color::Rgb(0xE9, 0xC4, 0x6A);
    pub const BLUE: Color = Color::Rgb(0x74, 0xB3, 0xCE);
    pub const BLUE_LIGHT: Color = Color::Rgb(0xA8, 0xD8, 0xEA);
    pub const PURPLE: Color = Color::Rgb(0xB3, 0x9D, 0xDB);

    // === Borders ===
    pub const BORDER: Color = Color::Rgb(0x2D, 0x4A, 0x3E);
    pub const BORDER_DIM: Color = Color::Rgb(0x1B, 0x2E, 0x25);
    pub const BORDER_ACCENT: Color = GREEN;
}

/// Semantic styling helpers
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    pub fn text() -> Style {
        Style::default().fg(colors::FG_PRIMARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(colors::FG_DIM)
    }

    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    pub fn success() -> Style {
        Style::default().fg(colors::GREEN)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors::YELLOW)
    }

    pub fn info() -> Style {
        Style::default().fg(colors::BLUE)
    }

    /// Row under the cursor in a focused list
    pub fn selected() -> Style {
        Style::default()
            .fg(colors::BG_DARK)
            .bg(colors::GREEN)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor in an unfocused list
    pub fn selected_dim() -> Style {
        Style::default().fg(colors::FG_PRIMARY).bg(colors::BG_HIGHLIGHT)
    }

    /// Currently active facet value (skill or year), inverted
    pub fn facet_active() -> Style {
        Style::default()
            .fg(colors::BG_DARK)
            .bg(colors::YELLOW)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tag() -> Style {
        Style::default().fg(colors::GREEN_LIGHT)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(colors::BORDER_ACCENT)
    }

    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    pub fn border_dim() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn title_accent() -> Style {
        Style::default()
            .fg(colors::GREEN)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section() -> Style {
        Style::default()
            .fg(colors::PURPLE)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(colors::BLUE)
    }

    pub fn input_focused() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .bg(colors::BG_HIGHLIGHT)
    }
}
