//! Module screen: header with progress, lesson sidebar, and lesson content

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

use super::{lesson, sidebar};
use crate::app::state::{AppState, Panel};
use crate::page::ModulePage;
use crate::theme::Theme;

const SIDEBAR_MIN_WIDTH: u16 = 30;
const HEADER_HEIGHT: u16 = 5;

pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(3)])
        .split(area);

    if let Some(page) = state.page() {
        draw_header(frame, chunks[0], page, theme);
    }

    let panels = split_panels(chunks[1]);
    let focus = state.focused_panel;
    sidebar::draw(frame, panels[0], state, theme, focus == Panel::Sidebar);
    lesson::draw(frame, panels[1], state, theme, focus == Panel::Content);
}

/// Sidebar takes a quarter of the width, at least `SIDEBAR_MIN_WIDTH` columns
fn split_panels(area: Rect) -> [Rect; 2] {
    let sidebar_width = (area.width / 4).max(SIDEBAR_MIN_WIDTH).min(area.width / 2);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(20)])
        .split(area);
    [chunks[0], chunks[1]]
}

fn draw_header(frame: &mut Frame, area: Rect, page: &ModulePage, theme: &Theme) {
    let module = page.module();
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(2), Constraint::Length(1)])
        .split(inner);

    let heading = Line::from(vec![
        Span::styled(
            module.heading(),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  [{}]", module.tag), Style::default().fg(theme.accent_secondary)),
    ]);
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let description = Paragraph::new(module.description.as_str())
        .style(Style::default().fg(theme.fg_muted))
        .wrap(Wrap { trim: true });
    frame.render_widget(description, rows[1]);

    let gauge = Gauge::default()
        .ratio(page.progress_fraction().clamp(0.0, 1.0))
        .label(page.progress_label())
        .gauge_style(Style::default().fg(theme.success).bg(theme.bg_tertiary));
    frame.render_widget(gauge, rows[2]);
}
