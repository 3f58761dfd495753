//! Colors and text styles for the hex panes.

use ratatui::style::{Color, Modifier, Style};

/// The styles used when drawing panes and bars.
#[derive(Debug, Clone)]
pub struct Theme {
    pub border: Style,
    pub border_focused: Style,
    /// Offsets, column header, separator, zero bytes, placeholder glyphs
    pub dim: Style,
    /// Selection in the focused pane on the focused axis
    pub selection_active: Style,
    /// Selection anywhere else
    pub selection_inactive: Style,
    pub status_bg: Color,
    pub status_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Style::default(),
            border_focused: Style::default().fg(Color::Yellow),
            dim: Style::default().fg(Color::Indexed(245)),
            selection_active: Style::default().add_modifier(Modifier::REVERSED),
            selection_inactive: Style::default().bg(Color::Indexed(240)),
            status_bg: Color::Indexed(236), // Dark gray that works on both
            status_fg: Color::Indexed(252), // Light gray
        }
    }
}

impl Theme {
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }

    pub fn selection(&self, active: bool) -> Style {
        if active {
            self.selection_active
        } else {
            self.selection_inactive
        }
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }
}
