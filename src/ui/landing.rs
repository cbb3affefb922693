//! Landing screen: portal overview, module cards, and learning goals

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::AppState;
use crate::curriculum::{AUDIENCE, CATALOG, FEATURE_TAGS, LEARNING_GOALS, Module, TAGLINE, TITLE};
use crate::theme::Theme;

const COMING_SOON: &str = "Coming soon";
const AUDIENCE_HEIGHT: u16 = 6;

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    frame.render_widget(Block::default().style(Style::default().bg(theme.bg_primary)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Length(AUDIENCE_HEIGHT),
            Constraint::Min(6),
            Constraint::Length(LEARNING_GOALS.len() as u16 + 2),
        ])
        .split(area);

    draw_hero(frame, chunks[0], theme);
    draw_audience(frame, chunks[1], theme);
    draw_modules(frame, chunks[2], state.landing.selected, theme);
    draw_goals(frame, chunks[3], theme);
}

fn draw_hero(frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut tags = Vec::new();
    for (i, tag) in FEATURE_TAGS.iter().enumerate() {
        if i > 0 {
            tags.push(Span::raw("  "));
        }
        tags.push(Span::styled(
            format!(" {tag} "),
            Style::default().fg(theme.fg_secondary).bg(theme.bg_tertiary),
        ));
    }

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            TITLE,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(theme.fg_muted))),
        Line::from(""),
        Line::from(tags),
    ];
    let hero = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
    frame.render_widget(hero, area);
}

fn draw_audience(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(" Who is this portal for? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    for (&(title, description), column) in AUDIENCE.iter().zip(columns.iter()) {
        let card =
            Paragraph::new(audience_card(title, description, theme)).wrap(Wrap { trim: true });
        frame.render_widget(card, column.inner(Margin::new(1, 0)));
    }
}

fn audience_card(
    title: &'static str,
    description: &'static str,
    theme: &Theme,
) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title,
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(description, Style::default().fg(theme.fg_muted))),
    ]
}

fn draw_modules(frame: &mut Frame, area: Rect, selected: usize, theme: &Theme) {
    let block = Block::default()
        .title(" Curriculum ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.bg_primary));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = CATALOG
        .modules()
        .iter()
        .enumerate()
        .flat_map(|(i, module)| module_card(module, i == selected, theme))
        .collect();

    // Keep the selected card on screen
    let per_card = 2;
    let visible_cards = (inner.height as usize / per_card).max(1);
    let skip = selected.saturating_sub(visible_cards - 1) * per_card;
    let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
    frame.render_widget(Paragraph::new(visible), inner);
}

fn module_card(module: &Module, selected: bool, theme: &Theme) -> [Line<'static>; 2] {
    let marker = if selected { "▶ " } else { "  " };
    let title_style = if selected {
        Style::default().fg(theme.bg_primary).bg(theme.accent_primary).add_modifier(Modifier::BOLD)
    } else if module.is_available() {
        Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_muted)
    };

    let mut title = vec![
        Span::styled(marker, Style::default().fg(theme.accent_primary)),
        Span::styled(format!("{}: {}", module.id.label(), module.title), title_style),
        Span::styled(format!("  [{}]", module.tag), Style::default().fg(theme.accent_secondary)),
    ];
    if module.is_available() {
        title.push(Span::styled(
            format!("  {} lessons", module.lessons.len()),
            Style::default().fg(theme.fg_muted),
        ));
    } else {
        title.push(Span::styled(
            format!("  {COMING_SOON}"),
            Style::default().fg(theme.warning).add_modifier(Modifier::ITALIC),
        ));
    }

    [
        Line::from(title),
        Line::from(Span::styled(format!("    {}", module.summary), Style::default().fg(theme.fg_muted))),
    ]
}

fn draw_goals(frame: &mut Frame, area: Rect, theme: &Theme) {
    let block = Block::default()
        .title(" Learning goals ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_primary));

    let lines: Vec<Line> = LEARNING_GOALS
        .iter()
        .map(|goal| {
            Line::from(vec![
                Span::styled(
                    format!(" {:>5}  ", goal.metric),
                    Style::default().fg(theme.success).add_modifier(Modifier::BOLD),
                ),
                Span::styled(goal.description, Style::default().fg(theme.fg_primary)),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::ModuleId;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn available_module_card_counts_lessons() {
        let module = CATALOG.module(ModuleId::A).unwrap();
        let [title, summary] = module_card(module, true, &Theme::default());
        assert_eq!(text(&title), "▶ Module A: Agents in LangGraph  [LangGraph]  6 lessons");
        assert!(text(&summary).contains("plan/exec/critic"));
    }

    #[test]
    fn audience_card_leads_with_its_title() {
        let (title, description) = AUDIENCE[0];
        let lines = audience_card(title, description, &Theme::default());
        assert_eq!(text(&lines[0]), "Mid-level developers");
        assert!(text(&lines[1]).contains("Portal 1"));
    }

    #[test]
    fn upcoming_module_card_is_marked_coming_soon() {
        let module = CATALOG.module(ModuleId::D).unwrap();
        let [title, _] = module_card(module, false, &Theme::default());
        assert!(text(&title).ends_with(COMING_SOON));
    }
}
