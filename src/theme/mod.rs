//! Colour themes

mod dark_plus;

pub use dark_plus::DARK_PLUS;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

use crate::curriculum::{LessonKind, NodeKind};

/// A color theme for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,

    // Background colors
    pub bg_primary: Color,
    pub bg_secondary: Color,
    pub bg_tertiary: Color,

    // Foreground colors
    pub fg_primary: Color,
    pub fg_secondary: Color,
    pub fg_muted: Color,

    // Accent colors
    pub accent_primary: Color,
    pub accent_secondary: Color,

    // Semantic colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Syntax highlighting
    pub syntax_keyword: Color,
    pub syntax_string: Color,
    pub syntax_number: Color,
    pub syntax_comment: Color,
    pub syntax_function: Color,
    pub syntax_type: Color,
    pub syntax_variable: Color,
    pub syntax_operator: Color,

    /// Background of code panels
    pub code_bg: Color,

    // UI elements
    pub border: Color,
    pub border_focused: Color,
    pub selection: Color,
    pub cursor: Color,
}

impl Theme {
    pub const DARK_PLUS: &'static str = "Dark Plus";

    /// Look up a built-in theme by name, ignoring case
    pub fn by_name(name: &str) -> Option<Self> {
        name.eq_ignore_ascii_case(Self::DARK_PLUS).then(Theme::dark_plus)
    }

    /// Badge colour for a lesson kind
    pub fn kind_color(&self, kind: LessonKind) -> Color {
        match kind {
            LessonKind::Concept => self.info,
            LessonKind::HandsOn => self.warning,
            LessonKind::Lab => self.accent_secondary,
        }
    }

    /// Chip colour for a node in a flow diagram
    pub fn node_color(&self, kind: NodeKind) -> Color {
        match kind {
            NodeKind::Start => self.success,
            NodeKind::End => self.error,
            NodeKind::Step => self.accent_primary,
            NodeKind::Conditional => self.warning,
        }
    }

    pub fn panel_border(&self, focused: bool) -> Color {
        if focused { self.border_focused } else { self.border }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark_plus()
    }
}
