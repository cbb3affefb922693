//! Dark Plus palette, after the VS Code default dark theme

use ratatui::style::Color;

use super::Theme;

pub const DARK_PLUS: Theme = Theme {
    name: String::new(),

    bg_primary: Color::Rgb(30, 30, 30),   // #1e1e1e editor
    bg_secondary: Color::Rgb(37, 37, 38), // #252526 side bar
    bg_tertiary: Color::Rgb(51, 51, 51),  // #333333 activity bar

    fg_primary: Color::Rgb(212, 212, 212),   // #d4d4d4
    fg_secondary: Color::Rgb(255, 255, 255), // #ffffff
    fg_muted: Color::Rgb(133, 133, 133),     // #858585

    accent_primary: Color::Rgb(0, 122, 204),     // #007acc status bar
    accent_secondary: Color::Rgb(197, 134, 192), // #c586c0

    success: Color::Rgb(137, 209, 133), // #89d185
    warning: Color::Rgb(204, 167, 0),   // #cca700
    error: Color::Rgb(241, 76, 76),     // #f14c4c
    info: Color::Rgb(117, 190, 255),    // #75beff

    syntax_keyword: Color::Rgb(86, 156, 214),   // #569cd6
    syntax_string: Color::Rgb(206, 145, 120),   // #ce9178
    syntax_number: Color::Rgb(181, 206, 168),   // #b5cea8
    syntax_comment: Color::Rgb(106, 153, 85),   // #6a9955
    syntax_function: Color::Rgb(220, 220, 170), // #dcdcaa
    syntax_type: Color::Rgb(78, 201, 176),      // #4ec9b0
    syntax_variable: Color::Rgb(156, 220, 254), // #9cdcfe
    syntax_operator: Color::Rgb(212, 212, 212), // #d4d4d4

    code_bg: Color::Rgb(13, 17, 23), // #0d1117

    border: Color::Rgb(69, 69, 69),            // #454545
    border_focused: Color::Rgb(0, 122, 204),   // #007acc
    selection: Color::Rgb(38, 79, 120),        // #264f78
    cursor: Color::Rgb(174, 175, 173),         // #aeafad
};

impl Theme {
    pub fn dark_plus() -> Self {
        Theme { name: Theme::DARK_PLUS.to_string(), ..DARK_PLUS }
    }
}
