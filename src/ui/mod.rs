//! UI rendering components

pub mod help;
pub mod landing;
pub mod lesson;
pub mod module_screen;
pub mod sidebar;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::{AppState, Screen};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    if matches!(state.screen, Screen::Landing) {
        landing::draw(frame, chunks[0], state, theme);
    } else {
        module_screen::draw(frame, chunks[0], state, theme);
    }

    status_line::draw(frame, chunks[1], &state.screen, &state.status, theme);

    if state.show_help {
        help::draw(frame, theme);
    }
}
