//! One-line status bar at the bottom of the screen

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::{Screen, StatusMessage};
use crate::theme::Theme;

const LANDING_HINT: &str = "j/k select · Enter open · ? help · q quit";
const MODULE_HINT: &str = "n/p lesson · m complete · ]/[ code · y copy · Esc back · ? help";

pub fn draw(frame: &mut Frame, area: Rect, screen: &Screen, status: &StatusMessage, theme: &Theme) {
    frame.render_widget(Paragraph::new(status_line(screen, status, theme)), area);
}

fn status_line(screen: &Screen, status: &StatusMessage, theme: &Theme) -> Line<'static> {
    if let Some(message) = &status.message {
        let color = if status.is_error { theme.error } else { theme.fg_secondary };
        return Line::from(Span::styled(message.clone(), Style::default().fg(color)));
    }

    let hint = match screen {
        Screen::Landing => LANDING_HINT,
        Screen::Module(_) => MODULE_HINT,
    };
    Line::from(Span::styled(hint, Style::default().fg(theme.fg_muted)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn shows_hint_without_message() {
        let line = status_line(&Screen::Landing, &StatusMessage::default(), &Theme::default());
        assert_eq!(text(&line), LANDING_HINT);
    }

    #[test]
    fn errors_use_error_color() {
        let theme = Theme::default();
        let mut status = StatusMessage::default();
        status.set_error("Module D is coming soon");
        let line = status_line(&Screen::Landing, &status, &theme);
        assert_eq!(text(&line), "Module D is coming soon");
        assert_eq!(line.spans[0].style.fg, Some(theme.error));
    }
}
