//! Lesson content renderer

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;
use crate::clipboard::ClipboardCodePanel;
use crate::curriculum::{ContentBlock, GraphDiagram, Lesson, Table};
use crate::page::LessonContent;
use crate::syntax;
use crate::theme::Theme;

const COPY_HINT: &str = "[y] Copy";
const COPIED: &str = "✓ Copied";

/// Styled lines of a lesson plus the line index of every code panel header
#[derive(Debug, Default)]
pub struct RenderedLesson {
    pub lines: Vec<Line<'static>>,
    pub code_anchors: Vec<usize>,
}

/// Draw the content panel for the current lesson
pub fn draw(frame: &mut Frame, area: Rect, state: &mut AppState, theme: &Theme, focused: bool) {
    let Some(page) = state.page() else { return };
    let (Some(lesson), Some(content)) = (page.current_lesson(), page.current_content()) else {
        return;
    };
    let completed = page.tracker().is_completed(lesson.id);

    let block = Block::default()
        .title(format!(" {}. {} ", lesson.id, lesson.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_border(focused)))
        .style(Style::default().bg(theme.bg_primary));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Reserve 1 column for scrollbar
    let content_width = inner.width.saturating_sub(2) as usize;
    let content_area =
        Rect { x: inner.x, y: inner.y, width: inner.width.saturating_sub(1), height: inner.height };
    let scrollbar_x = inner.x + inner.width.saturating_sub(1);

    let rendered =
        render_lesson(lesson, content, completed, state.content.focused_code, theme, content_width);
    let total_lines = rendered.lines.len();
    let visible_height = inner.height as usize;

    state.content.total_lines = total_lines;
    state.content.visible_height = visible_height;
    state.content.code_anchors = rendered.code_anchors;
    state.content.clamp_scroll();

    let scroll_offset = state.content.scroll_offset;
    let visible_lines: Vec<Line> =
        rendered.lines.into_iter().skip(scroll_offset).take(visible_height).collect();
    frame.render_widget(Paragraph::new(visible_lines), content_area);

    draw_scrollbar(frame, scrollbar_x, inner.y, inner.height, scroll_offset, total_lines, theme);
}

fn draw_scrollbar(
    frame: &mut Frame,
    x: u16,
    y: u16,
    height: u16,
    scroll_offset: usize,
    total_lines: usize,
    theme: &Theme,
) {
    let height = height as usize;
    if total_lines <= height || height == 0 {
        return;
    }

    let thumb_height = (height * height / total_lines).max(1);
    let max_scroll = total_lines.saturating_sub(height / 2).max(1);
    let thumb_top = ((height - thumb_height) * scroll_offset.min(max_scroll)) / max_scroll;

    for i in 0..height {
        let in_thumb = i >= thumb_top && i < thumb_top + thumb_height;
        let (ch, color) = if in_thumb { ("█", theme.accent_secondary) } else { ("░", theme.bg_tertiary) };
        frame.render_widget(
            Paragraph::new(ch).style(Style::default().fg(color)),
            Rect { x, y: y.saturating_add(i as u16), width: 1, height: 1 },
        );
    }
}

/// Render a lesson into display lines
pub fn render_lesson(
    lesson: &Lesson,
    content: &LessonContent,
    completed: bool,
    focused_code: Option<usize>,
    theme: &Theme,
    width: usize,
) -> RenderedLesson {
    let mut out = RenderedLesson::default();

    out.lines.push(Line::from(Span::styled(
        lesson.title.clone(),
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
    )));
    out.lines.push(Line::from(vec![
        Span::styled(format!("{} · ", lesson.duration), Style::default().fg(theme.fg_muted)),
        Span::styled(lesson.kind.label(), Style::default().fg(theme.kind_color(lesson.kind))),
    ]));

    let mut panel_index = 0;
    for block in &content.blocks {
        match block {
            ContentBlock::Heading { level, text } => render_heading(&mut out.lines, *level, text, theme),
            ContentBlock::Paragraph(text) => render_paragraph(&mut out.lines, text, theme, width),
            ContentBlock::Code(panel) => {
                out.code_anchors.push(out.lines.len());
                render_code_panel(&mut out.lines, panel, focused_code == Some(panel_index), theme, width);
                panel_index += 1;
            }
            ContentBlock::UnorderedList(items) => {
                render_list(&mut out.lines, items.iter().map(|_| "  • ".to_string()), items, theme, width)
            }
            ContentBlock::OrderedList(items) => render_list(
                &mut out.lines,
                (1..=items.len()).map(|n| format!("  {n}. ")),
                items,
                theme,
                width,
            ),
            ContentBlock::Blockquote(text) => render_blockquote(&mut out.lines, text, theme, width),
            ContentBlock::HorizontalRule => {
                out.lines.push(Line::from(Span::styled(
                    "─".repeat(width.saturating_sub(4).min(32)),
                    Style::default().fg(theme.border),
                )));
            }
            ContentBlock::Table(table) => render_table(&mut out.lines, table, theme, width),
            ContentBlock::Graph(graph) => render_graph(&mut out.lines, graph, theme, width),
        }
    }

    out.lines.push(Line::from(""));
    out.lines.push(if completed {
        Line::from(Span::styled(
            "✓ Completed",
            Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled("[m] ", Style::default().fg(theme.accent_primary)),
            Span::styled("Mark as complete", Style::default().fg(theme.fg_primary)),
        ])
    });

    out
}

fn render_heading(lines: &mut Vec<Line<'static>>, level: u8, text: &str, theme: &Theme) {
    let style = match level {
        1 => Style::default()
            .fg(theme.accent_primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        2 => Style::default().fg(theme.syntax_function).add_modifier(Modifier::BOLD),
        3 => Style::default().fg(theme.info).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(theme.fg_secondary),
    };

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(text.replace('`', ""), style)));
    if level <= 2 {
        lines.push(Line::from(""));
    }
}

fn render_paragraph(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme, width: usize) {
    let spans = parse_inline_formatting(text, theme);
    lines.extend(wrap_spans(spans, width.saturating_sub(2)));
    lines.push(Line::from(""));
}

/// Parse inline markdown formatting into styled spans
fn parse_inline_formatting(text: &str, theme: &Theme) -> Vec<Span<'static>> {
    let plain = Style::default().fg(theme.fg_primary);
    let mut spans = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current = String::new();

    while let Some(c) = chars.next() {
        match c {
            '`' => {
                if !current.is_empty() {
                    spans.push(Span::styled(std::mem::take(&mut current), plain));
                }
                let code: String = chars.by_ref().take_while(|&next| next != '`').collect();
                spans.push(Span::styled(
                    code,
                    Style::default().fg(theme.syntax_string).bg(theme.bg_secondary),
                ));
            }
            '*' => {
                let is_double = chars.peek() == Some(&'*');
                if is_double {
                    chars.next();
                }

                let mut inner = String::new();
                let mut found_end = false;
                while let Some(next) = chars.next() {
                    if next == '*' {
                        if !is_double {
                            found_end = true;
                            break;
                        }
                        if chars.peek() == Some(&'*') {
                            chars.next();
                            found_end = true;
                            break;
                        }
                    }
                    inner.push(next);
                }

                if found_end {
                    if !current.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut current), plain));
                    }
                    let modifier = if is_double { Modifier::BOLD } else { Modifier::ITALIC };
                    let fg = if is_double { theme.fg_secondary } else { theme.fg_primary };
                    spans.push(Span::styled(inner, Style::default().fg(fg).add_modifier(modifier)));
                } else {
                    current.push('*');
                    if is_double {
                        current.push('*');
                    }
                    current.push_str(&inner);
                }
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, plain));
    }
    if spans.is_empty() {
        spans.push(Span::raw(""));
    }

    spans
}

/// Wrap styled spans into lines while preserving formatting
fn wrap_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Line<'static>> {
    if width == 0 {
        return vec![Line::from(spans)];
    }

    let mut lines = Vec::new();
    let mut current_line: Vec<Span<'static>> = Vec::new();
    let mut current_width = 0;

    for span in spans {
        let style = span.style;
        for word in span.content.split_inclusive(char::is_whitespace) {
            let word_len = word.chars().count();
            if current_width + word_len > width && current_width > 0 {
                lines.push(Line::from(std::mem::take(&mut current_line)));
                current_width = 0;
            }
            current_line.push(Span::styled(word.to_string(), style));
            current_width += word_len;
        }
    }

    if !current_line.is_empty() {
        lines.push(Line::from(current_line));
    }
    if lines.is_empty() {
        lines.push(Line::from(""));
    }

    lines
}

fn render_code_panel(
    lines: &mut Vec<Line<'static>>,
    panel: &ClipboardCodePanel,
    focused: bool,
    theme: &Theme,
    width: usize,
) {
    let border = Style::default().fg(theme.panel_border(focused));
    let mut label = panel.language().unwrap_or("code").to_string();
    if let Some(title) = panel.title() {
        label.push_str(" · ");
        label.push_str(title);
    }
    let (action, action_style) = if panel.is_copied() {
        (COPIED, Style::default().fg(theme.success).add_modifier(Modifier::BOLD))
    } else if focused {
        (COPY_HINT, Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD))
    } else {
        (COPY_HINT, Style::default().fg(theme.fg_muted))
    };

    let used = 3 + label.chars().count() + 1 + action.chars().count() + 1;
    let fill = width.saturating_sub(used).max(1);
    let mut label_style = Style::default().fg(theme.info);
    if focused {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }
    lines.push(Line::from(vec![
        Span::styled("┌─ ", border),
        Span::styled(label, label_style),
        Span::styled(format!(" {}", "─".repeat(fill)), border),
        Span::styled(format!(" {action}"), action_style),
    ]));

    for highlighted in syntax::highlight_code(panel.code(), panel.language(), theme) {
        let mut spans = vec![Span::styled("│ ", border)];
        spans.extend(highlighted.spans);
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled(format!("└{}", "─".repeat(width.saturating_sub(1).min(40))), border)));
    lines.push(Line::from(""));
}

fn render_list(
    lines: &mut Vec<Line<'static>>,
    prefixes: impl Iterator<Item = String>,
    items: &[String],
    theme: &Theme,
    width: usize,
) {
    for (prefix, item) in prefixes.zip(items) {
        let indent = " ".repeat(prefix.chars().count());
        let content_width = width.saturating_sub(indent.len());
        let wrapped = wrap_spans(parse_inline_formatting(item, theme), content_width);

        for (i, line) in wrapped.into_iter().enumerate() {
            let lead = if i == 0 {
                Span::styled(prefix.clone(), Style::default().fg(theme.accent_secondary))
            } else {
                Span::raw(indent.clone())
            };
            let mut spans = vec![lead];
            spans.extend(line.spans);
            lines.push(Line::from(spans));
        }
    }
    lines.push(Line::from(""));
}

fn render_blockquote(lines: &mut Vec<Line<'static>>, text: &str, theme: &Theme, width: usize) {
    let muted: Vec<Span<'static>> = parse_inline_formatting(text, theme)
        .into_iter()
        .map(|s| Span::styled(s.content.to_string(), s.style.fg(theme.fg_muted)))
        .collect();

    for line in wrap_spans(muted, width.saturating_sub(4)) {
        let mut spans = vec![Span::styled("  │ ", Style::default().fg(theme.accent_primary))];
        spans.extend(line.spans);
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
}

/// Fit column widths into the available width, shrinking the widest first
fn fit_columns(mut widths: Vec<usize>, available: usize) -> Vec<usize> {
    const MIN_COLUMN: usize = 6;
    let gaps = widths.len().saturating_sub(1) * 2;
    while widths.iter().sum::<usize>() + gaps > available {
        let Some((i, widest)) = widths.iter().copied().enumerate().max_by_key(|&(_, w)| w) else {
            break;
        };
        if widest <= MIN_COLUMN {
            break;
        }
        widths[i] = widest - 1;
    }
    widths
}

fn render_table(lines: &mut Vec<Line<'static>>, table: &Table, theme: &Theme, width: usize) {
    if table.column_count() == 0 {
        return;
    }
    let col_widths = fit_columns(table.column_widths(), width.saturating_sub(2));
    let num_cols = col_widths.len();

    let header_bg = theme.accent_primary;
    let header_spans: Vec<Span<'static>> = col_widths
        .iter()
        .enumerate()
        .flat_map(|(i, &w)| {
            let header = table.headers.get(i).map(|h| h.replace('`', "")).unwrap_or_default();
            let gap = (i > 0).then(|| Span::styled("  ", Style::default().bg(header_bg)));
            gap.into_iter().chain(std::iter::once(Span::styled(
                pad_or_truncate(&header, w),
                Style::default()
                    .fg(theme.fg_secondary)
                    .bg(header_bg)
                    .add_modifier(Modifier::BOLD),
            )))
        })
        .collect();
    lines.push(Line::from(header_spans));

    for (row_idx, row) in table.rows.iter().enumerate() {
        let row_bg = if row_idx % 2 == 0 { theme.bg_secondary } else { theme.bg_primary };
        let wrapped: Vec<Vec<String>> = (0..num_cols)
            .map(|i| {
                let cell = row.get(i).map(|c| c.replace('`', "")).unwrap_or_default();
                wrap_cell_text(&cell, col_widths[i])
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line_idx in 0..height {
            let mut spans = Vec::new();
            for (col_idx, cell_lines) in wrapped.iter().enumerate() {
                if col_idx > 0 {
                    spans.push(Span::styled("  ", Style::default().bg(row_bg)));
                }
                let text = cell_lines.get(line_idx).map(String::as_str).unwrap_or("");
                let fg = if col_idx == 0 { theme.syntax_variable } else { theme.fg_primary };
                spans.push(Span::styled(
                    pad_or_truncate(text, col_widths[col_idx]),
                    Style::default().fg(fg).bg(row_bg),
                ));
            }
            lines.push(Line::from(spans));
        }
    }
    lines.push(Line::from(""));
}

/// Pad string to width or truncate with ellipsis
fn pad_or_truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let truncated: String = s.chars().take(width.saturating_sub(1)).collect();
        format!("{truncated}…")
    } else {
        format!("{s:width$}")
    }
}

/// Wrap cell text to fit within a given width
fn wrap_cell_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let options = textwrap::Options::new(width).break_words(true);
    let wrapped: Vec<String> = textwrap::wrap(text, options).into_iter().map(|c| c.into_owned()).collect();
    if wrapped.is_empty() { vec![String::new()] } else { wrapped }
}

/// Draw a flow diagram: node chips in order joined by arrows, then every
/// conditional transition on its own line
fn render_graph(lines: &mut Vec<Line<'static>>, graph: &GraphDiagram, theme: &Theme, width: usize) {
    let arrow = Style::default().fg(theme.fg_muted);
    let mut row: Vec<Span<'static>> = vec![Span::raw("  ")];
    let mut row_width = 2;

    for (i, node) in graph.nodes.iter().enumerate() {
        let chip = format!(" {} ", node.label);
        let chip_width = chip.chars().count();
        let joiner = match i.checked_sub(1).map(|p| &graph.nodes[p]) {
            Some(prev) if graph.edges.iter().any(|e| e.from == prev.id && e.to == node.id) => " → ",
            Some(_) => "   ",
            None => "",
        };

        if row_width + joiner.chars().count() + chip_width > width && row_width > 2 {
            lines.push(Line::from(std::mem::take(&mut row)));
            row.push(Span::raw("  "));
            row_width = 2;
        }
        if !joiner.is_empty() {
            row.push(Span::styled(joiner, arrow));
            row_width += joiner.chars().count();
        }
        row.push(Span::styled(
            chip,
            Style::default()
                .fg(theme.bg_primary)
                .bg(theme.node_color(node.kind))
                .add_modifier(Modifier::BOLD),
        ));
        row_width += chip_width;
    }
    lines.push(Line::from(row));

    for edge in graph.edges.iter().filter(|e| e.condition.is_some()) {
        let (Some(from), Some(to), Some(condition)) =
            (graph.node(&edge.from), graph.node(&edge.to), edge.condition.as_deref())
        else {
            continue;
        };
        lines.push(Line::from(vec![
            Span::styled("  ↳ ", arrow),
            Span::styled(from.label.clone(), Style::default().fg(theme.node_color(from.kind))),
            Span::styled(" ──", arrow),
            Span::styled(condition.to_string(), Style::default().fg(theme.warning)),
            Span::styled("──▶ ", arrow),
            Span::styled(to.label.clone(), Style::default().fg(theme.node_color(to.kind))),
        ]));
    }
    lines.push(Line::from(""));
}
