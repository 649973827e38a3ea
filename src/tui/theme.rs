use ratatui::style::{Color, Modifier, Style};
use crate::config::ThemeConfig;

pub const LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Marker drawn after favorited team names
pub const FAVORITE_MARKER: &str = "★";

/// Palette for one of the two color schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub fg: Color,
    pub bg: Color,
    pub selection_fg: Color,
    pub unfocused_selection_fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub live: Color,
    pub error_bg: Color,
    pub error_fg: Color,
}

impl Theme {
    pub fn light(config: &ThemeConfig) -> Self {
        Theme {
            fg: Color::Black,
            bg: Color::White,
            selection_fg: config.selection_fg,
            unfocused_selection_fg: config.unfocused_selection_fg(),
            muted: Color::Gray,
            accent: Color::Blue,
            live: Color::Red,
            error_bg: Color::Red,
            error_fg: Color::White,
        }
    }

    pub fn dark(config: &ThemeConfig) -> Self {
        Theme {
            fg: Color::White,
            bg: Color::Black,
            selection_fg: config.selection_fg,
            unfocused_selection_fg: config.unfocused_selection_fg(),
            muted: Color::DarkGray,
            accent: Color::Cyan,
            live: Color::LightRed,
            error_bg: Color::Red,
            error_fg: Color::White,
        }
    }

    pub fn for_mode(dark: bool, config: &ThemeConfig) -> Self {
        if dark {
            Self::dark(config)
        } else {
            Self::light(config)
        }
    }

    pub fn base_style(&self) -> Style {
        Style::new().fg(self.fg).bg(self.bg)
    }

    // Tab navigation
    pub fn tab_active_style(&self) -> Style {
        Style::new()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive_style(&self) -> Style {
        Style::new().fg(self.fg)
    }

    pub fn list_header_style(&self) -> Style {
        Style::new()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn list_normal_style(&self) -> Style {
        Style::new().fg(self.fg)
    }

    pub fn list_selected_style(&self) -> Style {
        Style::new()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn live_style(&self) -> Style {
        Style::new()
            .fg(self.live)
            .add_modifier(Modifier::BOLD)
    }

    // Cards and blocks
    pub fn card_border_style(&self) -> Style {
        Style::new().fg(self.muted)
    }

    pub fn card_title_style(&self) -> Style {
        Style::new()
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    // Status and hints
    pub fn status_error_style(&self) -> Style {
        Style::new()
            .bg(self.error_bg)
            .fg(self.error_fg)
    }

    pub fn hint_style(&self) -> Style {
        Style::new().fg(self.muted)
    }
}
