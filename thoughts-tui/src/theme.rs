//! Theming for the thoughts TUI.

use ratatui::style::{Color, Modifier, Style};

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Get the color palette for this theme
    pub fn palette(&self) -> ThemePalette {
        match self {
            Self::Dark => ThemePalette::dark(),
            Self::Light => ThemePalette::light(),
        }
    }
}

/// Color palette for a theme
#[derive(Debug, Clone)]
pub struct ThemePalette {
    pub bg: Color,
    pub fg: Color,

    pub primary: Color,
    pub accent: Color,

    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub border: Color,
    pub border_active: Color,

    pub text_muted: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl ThemePalette {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(18, 18, 24),
            fg: Color::Rgb(220, 220, 230),

            primary: Color::Rgb(100, 149, 237), // Cornflower blue
            accent: Color::Rgb(255, 193, 7),    // Amber

            success: Color::Rgb(46, 204, 113),
            warning: Color::Rgb(241, 196, 15),
            error: Color::Rgb(231, 76, 60),

            border: Color::Rgb(60, 60, 80),
            border_active: Color::Rgb(100, 149, 237),

            text_muted: Color::Rgb(120, 120, 140),

            selection_bg: Color::Rgb(60, 80, 120),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 252),
            fg: Color::Rgb(30, 30, 40),

            primary: Color::Rgb(33, 150, 243),
            accent: Color::Rgb(255, 152, 0),

            success: Color::Rgb(76, 175, 80),
            warning: Color::Rgb(255, 160, 0),
            error: Color::Rgb(244, 67, 54),

            border: Color::Rgb(200, 200, 210),
            border_active: Color::Rgb(33, 150, 243),

            text_muted: Color::Rgb(140, 140, 155),

            selection_bg: Color::Rgb(200, 220, 250),
            selection_fg: Color::Rgb(20, 20, 30),
        }
    }

    pub fn base_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.fg)
    }

    pub fn title_style(&self, active: bool) -> Style {
        if active {
            Style::default()
                .fg(self.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_muted)
        }
    }

    pub fn border_style(&self, active: bool) -> Style {
        if active {
            Style::default().fg(self.border_active)
        } else {
            Style::default().fg(self.border)
        }
    }

    pub fn link_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn date_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success)
    }

    pub fn warning_style(&self) -> Style {
        Style::default()
            .fg(self.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
    }
}
