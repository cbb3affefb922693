//! Content model for the curriculum
//!
//! Modules and lessons are static, authored data. Lesson bodies are produced
//! by a [`LessonSource`] and parsed into [`ContentBlock`]s when a module page
//! is mounted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::markdown::parse_markdown_content;
use crate::clipboard::ClipboardCodePanel;

/// Identifier of a lesson within a module. Ids define display and navigation order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LessonId(pub u32);

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What kind of activity a lesson is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LessonKind {
    Concept,
    HandsOn,
    Lab,
}

impl LessonKind {
    /// Label shown next to the duration in the sidebar
    pub fn label(self) -> &'static str {
        match self {
            LessonKind::Concept => "Concept",
            LessonKind::HandsOn => "Hands-on",
            LessonKind::Lab => "Lab",
        }
    }
}

/// Where a lesson's body comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonSource {
    /// Embedded markdown document
    Markdown(&'static str),
    /// Lesson not yet written; a one-paragraph summary stands in for it
    Placeholder(&'static str),
}

impl LessonSource {
    /// Produce the content blocks for this lesson
    pub fn render(&self) -> Vec<ContentBlock> {
        match self {
            LessonSource::Markdown(markdown) => parse_markdown_content(markdown),
            LessonSource::Placeholder(summary) => {
                vec![ContentBlock::Paragraph((*summary).to_string())]
            }
        }
    }
}

/// A single lesson in a module
#[derive(Debug, Clone, Serialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    /// Display-only duration label, e.g. "15 min"
    pub duration: String,
    pub kind: LessonKind,
    #[serde(skip)]
    pub source: LessonSource,
}

impl Lesson {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        duration: impl Into<String>,
        kind: LessonKind,
        source: LessonSource,
    ) -> Self {
        Self { id: LessonId(id), title: title.into(), duration: duration.into(), kind, source }
    }
}

/// Top-level curriculum units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleId {
    A,
    B,
    C,
    D,
    E,
    Capstone,
}

impl ModuleId {
    /// All modules in curriculum order
    pub const ALL: [ModuleId; 6] =
        [ModuleId::A, ModuleId::B, ModuleId::C, ModuleId::D, ModuleId::E, ModuleId::Capstone];

    /// Short label used on cards and in breadcrumbs
    pub fn label(self) -> &'static str {
        match self {
            ModuleId::A => "Module A",
            ModuleId::B => "Module B",
            ModuleId::C => "Module C",
            ModuleId::D => "Module D",
            ModuleId::E => "Module E",
            ModuleId::Capstone => "Capstone",
        }
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a module name cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown module '{0}' (expected a, b, c, d, e or capstone)")]
pub struct UnknownModule(pub String);

impl FromStr for ModuleId {
    type Err = UnknownModule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let name = normalized
            .strip_prefix("module-")
            .or_else(|| normalized.strip_prefix("module "))
            .unwrap_or(&normalized);

        match name {
            "a" => Ok(ModuleId::A),
            "b" => Ok(ModuleId::B),
            "c" => Ok(ModuleId::C),
            "d" => Ok(ModuleId::D),
            "e" => Ok(ModuleId::E),
            "capstone" => Ok(ModuleId::Capstone),
            _ => Err(UnknownModule(s.to_string())),
        }
    }
}

/// A curriculum module and its ordered lessons
#[derive(Debug, Clone, Serialize)]
pub struct Module {
    pub id: ModuleId,
    /// Full title, e.g. "Agents in LangGraph"
    pub title: String,
    /// Topic tag shown on the landing card
    pub tag: String,
    /// One-line summary for the landing card
    pub summary: String,
    /// Longer description shown in the module header
    pub description: String,
    pub lessons: Vec<Lesson>,
}

impl Module {
    /// A module can be opened only once it has lessons
    pub fn is_available(&self) -> bool {
        !self.lessons.is_empty()
    }

    pub fn lesson(&self, id: LessonId) -> Option<&Lesson> {
        self.lessons.iter().find(|lesson| lesson.id == id)
    }

    /// Heading used on the module screen, e.g. "Module A: Agents in LangGraph"
    pub fn heading(&self) -> String {
        format!("{}: {}", self.id.label(), self.title)
    }
}

/// A block of lesson content
#[derive(Debug, Clone)]
pub enum ContentBlock {
    /// A heading (level 1-6)
    Heading { level: u8, text: String },
    /// A paragraph with inline markdown (`code`, **bold**, *italic*)
    Paragraph(String),
    /// A code sample with copy-to-clipboard
    Code(ClipboardCodePanel),
    /// An unordered list; task list items keep their checkbox glyph
    UnorderedList(Vec<String>),
    OrderedList(Vec<String>),
    Blockquote(String),
    HorizontalRule,
    Table(Table),
    /// A node/edge flow diagram
    Graph(GraphDiagram),
}

impl ContentBlock {
    /// Plain text representation, if the block has any
    pub fn plain_text(&self) -> Option<String> {
        match self {
            ContentBlock::Heading { text, .. } | ContentBlock::Paragraph(text) => {
                Some(text.clone())
            }
            ContentBlock::Code(panel) => Some(panel.code().to_string()),
            ContentBlock::UnorderedList(items) => {
                Some(items.iter().map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n"))
            }
            ContentBlock::OrderedList(items) => Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{}. {item}", i + 1))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            ContentBlock::Blockquote(text) => Some(format!("> {text}")),
            ContentBlock::HorizontalRule => None,
            ContentBlock::Table(table) => Some(table.plain_text()),
            ContentBlock::Graph(graph) => Some(graph.plain_text()),
        }
    }
}

/// A simple table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).chain(std::iter::once(self.headers.len())).max().unwrap_or(0)
    }

    /// Width of each column in characters, taking headers and cells into account
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths = vec![0; self.column_count()];
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    pub fn plain_text(&self) -> String {
        std::iter::once(&self.headers)
            .chain(self.rows.iter())
            .map(|row| row.join(" | "))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Role of a node in a flow diagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeKind {
    Start,
    End,
    #[default]
    Step,
    Conditional,
}

impl FromStr for NodeKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(NodeKind::Start),
            "end" => Ok(NodeKind::End),
            "step" | "node" => Ok(NodeKind::Step),
            "conditional" => Ok(NodeKind::Conditional),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    /// Label on a conditional transition, e.g. "retry"
    pub condition: Option<String>,
}

/// A LangGraph-style flow: nodes in display order plus directed edges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphDiagram {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphDiagram {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn plain_text(&self) -> String {
        self.edges
            .iter()
            .filter_map(|edge| {
                let from = self.node(&edge.from)?;
                let to = self.node(&edge.to)?;
                Some(match &edge.condition {
                    Some(condition) => format!("{} --{}--> {}", from.label, condition, to.label),
                    None => format!("{} --> {}", from.label, to.label),
                })
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
