//! Key binding overlay

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::theme::Theme;

/// (keys, description)
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("j/k ↑/↓", "Move selection / scroll"),
    ("g/G", "Top / bottom"),
    ("PgUp/PgDn", "Page up / down"),
    ("Ctrl-u/d", "Half page up / down"),
    ("Enter", "Open module / lesson"),
    ("Tab h/l", "Switch sidebar and content"),
    ("n/p", "Next / previous lesson"),
    ("m", "Mark lesson complete"),
    ("]/[", "Next / previous code panel"),
    ("y", "Copy focused code panel"),
    ("?", "Toggle this help"),
    ("Esc", "Close help / back to modules"),
    ("q", "Quit"),
];

/// Centre a `width` x `height` box inside `area`
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub fn draw(frame: &mut Frame, theme: &Theme) {
    let area = centered(frame.area(), 52, KEY_BINDINGS.len() as u16 + 4);

    let block = Block::default()
        .title(" Keys ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_secondary));

    let mut lines = vec![Line::from("")];
    lines.extend(KEY_BINDINGS.iter().map(|(keys, description)| {
        Line::from(vec![
            Span::styled(
                format!("  {keys:<12}"),
                Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
            ),
            Span::styled(*description, Style::default().fg(theme.fg_primary)),
        ])
    }));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
