//! Lesson list for the mounted module

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::page::SidebarEntry;
use crate::theme::Theme;

const STATUS_NOT_STARTED: &str = "○";
const STATUS_CURRENT: &str = "▸";
const STATUS_COMPLETED: &str = "✓";

/// Each lesson takes a title row and a metadata row
pub const LINES_PER_ENTRY: usize = 2;

pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let block = Block::default()
        .title(" Lessons ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border(focused)))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    state.sidebar.visible_height = inner.height as usize / LINES_PER_ENTRY;
    state.sidebar.ensure_selection_visible();

    let Some(page) = state.page() else { return };
    let lines: Vec<Line> = page
        .sidebar_entries()
        .iter()
        .enumerate()
        .skip(state.sidebar.scroll_offset)
        .flat_map(|(i, entry)| {
            entry_lines(entry, focused && i == state.sidebar.selected_index, theme)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn status_glyph(entry: &SidebarEntry<'_>) -> &'static str {
    if entry.is_completed {
        STATUS_COMPLETED
    } else if entry.is_current {
        STATUS_CURRENT
    } else {
        STATUS_NOT_STARTED
    }
}

fn entry_lines(entry: &SidebarEntry<'_>, selected: bool, theme: &Theme) -> [Line<'static>; 2] {
    let lesson = entry.lesson;
    let title_style = if selected {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else if entry.is_current {
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary)
    };
    let glyph_color = if entry.is_completed {
        theme.success
    } else if entry.is_current {
        theme.accent_primary
    } else {
        theme.fg_muted
    };

    [
        Line::from(vec![
            Span::styled(format!("{} ", status_glyph(entry)), Style::default().fg(glyph_color)),
            Span::styled(format!("{}. {}", lesson.id, lesson.title), title_style),
        ]),
        Line::from(vec![
            Span::styled(format!("  {} · ", lesson.duration), Style::default().fg(theme.fg_muted)),
            Span::styled(lesson.kind.label(), Style::default().fg(theme.kind_color(lesson.kind))),
        ]),
    ]
}
