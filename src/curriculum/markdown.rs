//! Markdown parser for lesson content
//!
//! Turns an embedded markdown lesson into content blocks. Fenced code becomes
//! a [`ClipboardCodePanel`]; ```` ```graph ```` fences become flow diagrams.

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use regex::Regex;

use super::model::{ContentBlock, GraphDiagram, GraphEdge, GraphNode, NodeKind, Table};
use crate::clipboard::ClipboardCodePanel;

/// `node <id> "<label>" [kind]`
static NODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^node\s+([\w-]+)\s+"([^"]+)"(?:\s+(\w+))?$"#).expect("node pattern is valid")
});

/// `edge <from> <to> [condition]`
static EDGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^edge\s+([\w-]+)\s+([\w-]+)(?:\s+(.+))?$").expect("edge pattern is valid")
});

/// Language tag of a fenced block that holds a flow diagram
const GRAPH_LANGUAGE: &str = "graph";

/// Parse a markdown string into content blocks
#[allow(clippy::cognitive_complexity)]
pub fn parse_markdown_content(markdown: &str) -> Vec<ContentBlock> {
    let options = Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);

    let mut blocks = Vec::new();
    let mut current_text = String::new();

    let mut code: Option<(FenceInfo, String)> = None;

    let mut list_depth = 0usize;
    let mut list_ordered = false;
    let mut list_items: Vec<String> = Vec::new();
    let mut current_item = String::new();

    let mut in_blockquote = false;
    let mut quote = String::new();

    let mut table: Option<Table> = None;
    let mut current_row: Vec<String> = Vec::new();
    let mut current_cell = String::new();

    let mut heading_level: Option<u8> = None;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush_text(&mut current_text, &mut blocks);
                heading_level = Some(heading_level_to_u8(level));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(level) = heading_level.take() {
                    let text = std::mem::take(&mut current_text).trim().to_string();
                    if !text.is_empty() {
                        blocks.push(ContentBlock::Heading { level, text });
                    }
                }
            }

            Event::End(TagEnd::Paragraph) => {
                if in_blockquote {
                    if !quote.is_empty() {
                        quote.push('\n');
                    }
                    quote.push_str(current_text.trim());
                    current_text.clear();
                } else if list_depth > 0 {
                    current_item.push_str(&current_text);
                    current_text.clear();
                } else {
                    flush_text(&mut current_text, &mut blocks);
                }
            }

            Event::Start(Tag::CodeBlock(kind)) => {
                flush_text(&mut current_text, &mut blocks);
                let info = match kind {
                    CodeBlockKind::Fenced(info) => FenceInfo::parse(&info),
                    CodeBlockKind::Indented => FenceInfo::default(),
                };
                code = Some((info, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, body)) = code.take() {
                    blocks.push(code_block(info, &body));
                }
            }

            Event::Start(Tag::List(first_number)) => {
                if list_depth == 0 {
                    flush_text(&mut current_text, &mut blocks);
                    list_ordered = first_number.is_some();
                    list_items.clear();
                }
                list_depth += 1;
            }
            Event::End(TagEnd::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    let items = std::mem::take(&mut list_items);
                    if !items.is_empty() {
                        blocks.push(if list_ordered {
                            ContentBlock::OrderedList(items)
                        } else {
                            ContentBlock::UnorderedList(items)
                        });
                    }
                }
            }
            Event::Start(Tag::Item) => {
                // Nested items are flattened into their parent
                if list_depth <= 1 {
                    current_item.clear();
                } else {
                    current_item.push_str(current_text.trim_end());
                    current_text.clear();
                    current_item.push_str(" / ");
                }
            }
            Event::End(TagEnd::Item) => {
                if list_depth <= 1 {
                    current_item.push_str(&current_text);
                    current_text.clear();
                    let item = std::mem::take(&mut current_item).trim().to_string();
                    if !item.is_empty() {
                        list_items.push(item);
                    }
                }
            }
            Event::TaskListMarker(checked) => {
                current_item.push_str(if checked { "☑ " } else { "☐ " });
            }

            Event::Start(Tag::BlockQuote(_)) => {
                flush_text(&mut current_text, &mut blocks);
                in_blockquote = true;
                quote.clear();
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                in_blockquote = false;
                let text = std::mem::take(&mut quote).trim().to_string();
                if !text.is_empty() {
                    blocks.push(ContentBlock::Blockquote(text));
                }
            }

            Event::Start(Tag::Table(_)) => {
                flush_text(&mut current_text, &mut blocks);
                table = Some(Table::default());
            }
            Event::End(TagEnd::Table) => {
                if let Some(table) = table.take() {
                    blocks.push(ContentBlock::Table(table));
                }
            }
            Event::Start(Tag::TableHead) | Event::Start(Tag::TableRow) => {
                current_row.clear();
            }
            Event::End(TagEnd::TableHead) => {
                // Header cells arrive directly inside TableHead, without a TableRow
                if let Some(table) = table.as_mut() {
                    table.headers = std::mem::take(&mut current_row);
                }
            }
            Event::End(TagEnd::TableRow) => {
                if let Some(table) = table.as_mut() {
                    if !current_row.is_empty() {
                        table.rows.push(std::mem::take(&mut current_row));
                    }
                }
            }
            Event::Start(Tag::TableCell) => current_cell.clear(),
            Event::End(TagEnd::TableCell) => {
                current_row.push(std::mem::take(&mut current_cell).trim().to_string());
            }

            Event::Rule => {
                flush_text(&mut current_text, &mut blocks);
                blocks.push(ContentBlock::HorizontalRule);
            }

            Event::Text(text) => {
                if let Some((_, body)) = code.as_mut() {
                    body.push_str(&text);
                } else if table.is_some() {
                    current_cell.push_str(&text);
                } else {
                    current_text.push_str(&text);
                }
            }
            Event::Code(inline) => {
                let target = if table.is_some() { &mut current_cell } else { &mut current_text };
                target.push('`');
                target.push_str(&inline);
                target.push('`');
            }
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => {
                let target = if table.is_some() { &mut current_cell } else { &mut current_text };
                target.push_str("**");
            }
            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => {
                let target = if table.is_some() { &mut current_cell } else { &mut current_text };
                target.push('*');
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_blockquote {
                    current_text.push('\n');
                } else {
                    current_text.push(' ');
                }
            }

            _ => {}
        }
    }

    flush_text(&mut current_text, &mut blocks);
    blocks
}

/// Language and title carried in a fence's info string, e.g. `python title=agent.py`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct FenceInfo {
    language: Option<String>,
    title: Option<String>,
}

impl FenceInfo {
    fn parse(info: &str) -> Self {
        let mut parsed = Self::default();
        for token in info.split_whitespace() {
            if let Some(title) = token.strip_prefix("title=") {
                let title = title.trim_matches('"');
                if !title.is_empty() {
                    parsed.title = Some(title.to_string());
                }
            } else if parsed.language.is_none() {
                parsed.language = Some(token.to_string());
            }
        }
        parsed
    }
}

fn code_block(info: FenceInfo, body: &str) -> ContentBlock {
    if info.language.as_deref() == Some(GRAPH_LANGUAGE) {
        return ContentBlock::Graph(parse_graph(body));
    }

    // The fence's closing newline is markup, not part of the sample
    let mut panel = ClipboardCodePanel::new(body.trim_end());
    if let Some(language) = info.language {
        panel = panel.with_language(language);
    }
    if let Some(title) = info.title {
        panel = panel.with_title(title);
    }
    ContentBlock::Code(panel)
}

/// Parse the body of a graph fence; malformed lines and dangling edges are skipped
pub fn parse_graph(body: &str) -> GraphDiagram {
    let mut graph = GraphDiagram::default();

    for line in body.lines().map(str::trim).filter(|l| !l.is_empty() && !l.starts_with('#')) {
        if let Some(caps) = NODE_RE.captures(line) {
            let kind = caps.get(3).map_or(Ok(NodeKind::Step), |m| m.as_str().parse());
            let Ok(kind) = kind else {
                tracing::warn!(line, "unknown node kind in graph");
                continue;
            };
            graph.nodes.push(GraphNode { id: caps[1].to_string(), label: caps[2].to_string(), kind });
        } else if let Some(caps) = EDGE_RE.captures(line) {
            graph.edges.push(GraphEdge {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
                condition: caps.get(3).map(|m| m.as_str().trim().to_string()),
            });
        } else {
            tracing::warn!(line, "skipping malformed graph line");
        }
    }

    let nodes = graph.nodes.clone();
    graph.edges.retain(|edge| {
        let known = |id: &str| nodes.iter().any(|n| n.id == id);
        let keep = known(&edge.from) && known(&edge.to);
        if !keep {
            tracing::warn!(from = %edge.from, to = %edge.to, "edge references an unknown node");
        }
        keep
    });

    graph
}

fn flush_text(text: &mut String, blocks: &mut Vec<ContentBlock>) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        blocks.push(ContentBlock::Paragraph(trimmed.to_string()));
    }
    text.clear();
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_heading_and_paragraph() {
        let blocks = parse_markdown_content("# Title\n\nSome text here.");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(&blocks[0], ContentBlock::Heading { level: 1, text } if text == "Title"));
        assert!(matches!(&blocks[1], ContentBlock::Paragraph(text) if text == "Some text here."));
    }

    #[test]
    fn inline_markers_survive_in_paragraphs() {
        let blocks = parse_markdown_content("Use **explicit** flow with `add_edge` and *care*.");
        let ContentBlock::Paragraph(text) = &blocks[0] else { panic!("expected paragraph") };
        assert_eq!(text, "Use **explicit** flow with `add_edge` and *care*.");
    }

    #[test]
    fn fenced_code_becomes_code_panel_with_title() {
        let md = "```python title=simple_agent.py\nprint('hi')\n```";
        let blocks = parse_markdown_content(md);
        let ContentBlock::Code(panel) = &blocks[0] else { panic!("expected code panel") };
        assert_eq!(panel.code(), "print('hi')");
        assert_eq!(panel.language(), Some("python"));
        assert_eq!(panel.title(), Some("simple_agent.py"));
    }

    #[test]
    fn code_without_language() {
        let blocks = parse_markdown_content("```\nplain\n```");
        let ContentBlock::Code(panel) = &blocks[0] else { panic!("expected code panel") };
        assert_eq!(panel.language(), None);
        assert_eq!(panel.title(), None);
    }

    #[test]
    fn fence_info_parsing() {
        assert_eq!(
            FenceInfo::parse("yaml title=\"safety.yaml\""),
            FenceInfo { language: Some("yaml".into()), title: Some("safety.yaml".into()) }
        );
        assert_eq!(FenceInfo::parse(""), FenceInfo::default());
    }

    #[test]
    fn unordered_and_task_lists() {
        let blocks = parse_markdown_content("- one\n- two\n\n- [ ] todo\n- [x] done");
        let items: Vec<String> = blocks
            .iter()
            .filter_map(|b| match b {
                ContentBlock::UnorderedList(items) => Some(items.clone()),
                _ => None,
            })
            .flatten()
            .collect();
        assert!(items.contains(&"one".to_string()));
        assert!(items.contains(&"☐ todo".to_string()));
        assert!(items.contains(&"☑ done".to_string()));
    }

    #[test]
    fn ordered_list() {
        let blocks = parse_markdown_content("1. first\n2. second");
        assert!(
            matches!(&blocks[0], ContentBlock::OrderedList(items) if items == &["first", "second"])
        );
    }

    #[test]
    fn blockquote() {
        let blocks = parse_markdown_content("> Tip: keep nodes small");
        assert!(
            matches!(&blocks[0], ContentBlock::Blockquote(text) if text == "Tip: keep nodes small")
        );
    }

    #[test]
    fn table_headers_and_rows() {
        let md = "| Aspect | Simple | Graph |\n|---|---|---|\n| Flow | Linear | Explicit |";
        let blocks = parse_markdown_content(md);
        let ContentBlock::Table(table) = &blocks[0] else { panic!("expected table") };
        assert_eq!(table.headers, vec!["Aspect", "Simple", "Graph"]);
        assert_eq!(table.rows, vec![vec!["Flow", "Linear", "Explicit"]]);
    }

    #[test]
    fn horizontal_rule() {
        let blocks = parse_markdown_content("before\n\n---\n\nafter");
        assert!(blocks.iter().any(|b| matches!(b, ContentBlock::HorizontalRule)));
    }

    #[test]
    fn graph_fence_becomes_diagram() {
        let md = "```graph\nnode start \"Start\" start\nnode plan \"Planner\"\nedge start plan\nedge plan start retry\n```";
        let blocks = parse_markdown_content(md);
        let ContentBlock::Graph(graph) = &blocks[0] else { panic!("expected graph") };
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.nodes[0].kind, NodeKind::Start);
        assert_eq!(graph.nodes[1].kind, NodeKind::Step);
        assert_eq!(graph.edges[1].condition.as_deref(), Some("retry"));
    }

    #[test]
    fn graph_skips_malformed_lines_and_dangling_edges() {
        let graph = parse_graph("node a \"A\"\nnonsense here\nedge a ghost\nnode b \"B\" wobbly");
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn empty_markdown() {
        assert!(parse_markdown_content("").is_empty());
    }
}
