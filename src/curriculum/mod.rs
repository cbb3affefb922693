//! Curriculum: modules, lessons, and their content

mod catalog;
mod markdown;
mod model;

pub use catalog::{AUDIENCE, CATALOG, Catalog, FEATURE_TAGS, LEARNING_GOALS, LearningGoal, TAGLINE, TITLE};
pub use markdown::{parse_graph, parse_markdown_content};
pub use model::{
    ContentBlock, GraphDiagram, GraphEdge, GraphNode, Lesson, LessonId, LessonKind, LessonSource,
    Module, ModuleId, NodeKind, Table, UnknownModule,
};
