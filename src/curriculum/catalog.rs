//! Built-in curriculum
//!
//! Lesson bodies are embedded at compile time from `content/`.

use once_cell::sync::Lazy;

use super::model::{Lesson, LessonId, LessonKind, LessonSource, Module, ModuleId};

pub const TITLE: &str = "Portal 2: Agents & RAG hands-on";

pub const TAGLINE: &str = "The next step after the fundamentals. Learn to design and ship complete \
                           agents with LangGraph, hybrid RAG, and memory.";

pub const FEATURE_TAGS: [&str; 4] = ["LangGraph", "Hybrid RAG", "Memory", "Secure Tools"];

/// Who the portal is for: (title, description)
pub const AUDIENCE: [(&str, &str); 3] = [
    ("Mid-level developers", "You finished Portal 1 or can already build basic agents and simple RAG"),
    ("Looking for architecture", "You want to structure complex agents with production practices"),
    ("Professional portfolio", "You need projects that stand out for AI Engineer roles"),
];

/// A headline outcome of the curriculum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LearningGoal {
    pub metric: &'static str,
    pub description: &'static str,
}

pub const LEARNING_GOALS: [LearningGoal; 4] = [
    LearningGoal {
        metric: "3+",
        description: "Nodes in your LangGraph agent (planner, executor, critic)",
    },
    LearningGoal { metric: "70%", description: "Average precision@k expected in the capstone" },
    LearningGoal { metric: "100%", description: "Safe tool calling with allowlists and validation" },
    LearningGoal { metric: "∞", description: "Persistent memory across queries" },
];

/// The set of modules offered by the portal
#[derive(Debug)]
pub struct Catalog {
    modules: Vec<Module>,
}

impl Catalog {
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|module| module.id == id)
    }

    /// Look up a lesson by module and id
    pub fn lesson(&self, module: ModuleId, lesson: LessonId) -> Option<&Lesson> {
        self.module(module)?.lesson(lesson)
    }
}

pub static CATALOG: Lazy<Catalog> = Lazy::new(|| Catalog {
    modules: vec![module_a(), module_b(), module_c(), module_d(), module_e(), capstone()],
});

macro_rules! lesson_file {
    ($path:literal) => {
        LessonSource::Markdown(include_str!(concat!("../../content/", $path)))
    };
}

fn module_a() -> Module {
    use LessonKind::*;

    Module {
        id: ModuleId::A,
        title: "Agents in LangGraph".into(),
        tag: "LangGraph".into(),
        summary: "Graph concepts, plan/exec/critic nodes, explicit transitions".into(),
        description: "Learn to design agents as explicit graphs of nodes and transitions. \
                      Build a complete agent with planner, executor, and critic."
            .into(),
        lessons: vec![
            Lesson::new(1, "Intro to LangGraph", "15 min", Concept, lesson_file!("module-a/01-introduction.md")),
            Lesson::new(2, "Graph & Node Concepts", "20 min", Concept, lesson_file!("module-a/02-graph-concepts.md")),
            Lesson::new(3, "Your First LangGraph Agent", "30 min", HandsOn, lesson_file!("module-a/03-first-agent.md")),
            Lesson::new(
                4,
                "Nodes: Plan, Exec, Critic",
                "25 min",
                HandsOn,
                LessonSource::Placeholder(
                    "This lesson covers implementing the planner, executor, and critic nodes in detail. \
                     Full content is on the way.",
                ),
            ),
            Lesson::new(
                5,
                "Transitions & Control Flow",
                "20 min",
                Concept,
                LessonSource::Placeholder(
                    "Learn to design conditional transitions and complex control flows. \
                     Full content is on the way.",
                ),
            ),
            Lesson::new(
                6,
                "Lab: Complete Agent",
                "45 min",
                Lab,
                LessonSource::Placeholder(
                    "A hands-on lab building a complete agent with every component. \
                     Full content is on the way.",
                ),
            ),
        ],
    }
}

fn module_b() -> Module {
    use LessonKind::*;

    Module {
        id: ModuleId::B,
        title: "Secure Tools".into(),
        tag: "Security".into(),
        summary: "Contracts, input validation, a basic safety.yaml".into(),
        description: "Implement safe tool calling with contracts, input validation, and \
                      declarative security configuration."
            .into(),
        lessons: vec![
            Lesson::new(1, "Why Secure Tools?", "15 min", Concept, lesson_file!("module-b/01-why-secure-tools.md")),
            Lesson::new(2, "Tool Contracts", "25 min", Concept, lesson_file!("module-b/02-tool-contracts.md")),
            Lesson::new(3, "Input Validation", "30 min", HandsOn, lesson_file!("module-b/03-input-validation.md")),
            Lesson::new(4, "Allowlists & Restrictions", "20 min", HandsOn, lesson_file!("module-b/04-allowlist.md")),
            Lesson::new(5, "safety.yaml Configuration", "25 min", Concept, lesson_file!("module-b/05-safety-yaml.md")),
            Lesson::new(6, "Lab: Secure Tool Manager", "45 min", Lab, lesson_file!("module-b/06-lab.md")),
        ],
    }
}

fn module_c() -> Module {
    use LessonKind::*;

    Module {
        id: ModuleId::C,
        title: "Agent Memory".into(),
        tag: "Memory".into(),
        summary: "Short-term (summaries), long-term (indexed chunks)".into(),
        description: "Give agents short-term and long-term memory so they remember context \
                      and improve across conversations."
            .into(),
        lessons: vec![
            Lesson::new(1, "Why Memory in Agents?", "15 min", Concept, lesson_file!("module-c/01-memory-intro.md")),
            Lesson::new(2, "Short-Term Memory", "25 min", HandsOn, lesson_file!("module-c/02-short-term-memory.md")),
            Lesson::new(
                3,
                "Long-Term Memory",
                "30 min",
                HandsOn,
                LessonSource::Placeholder(
                    "Store conversation chunks in an index and retrieve them by similarity. \
                     Full content is on the way.",
                ),
            ),
            Lesson::new(
                4,
                "Intelligent Summaries",
                "20 min",
                Concept,
                LessonSource::Placeholder(
                    "Compress old turns into rolling summaries without losing key facts. \
                     Full content is on the way.",
                ),
            ),
            Lesson::new(
                5,
                "Context Retrieval",
                "25 min",
                Concept,
                LessonSource::Placeholder(
                    "Pick the memories that matter for the current query. \
                     Full content is on the way.",
                ),
            ),
            Lesson::new(
                6,
                "Lab: Memory System",
                "45 min",
                Lab,
                LessonSource::Placeholder(
                    "Combine short-term, long-term, and summary memory into one system. \
                     Full content is on the way.",
                ),
            ),
        ],
    }
}

fn coming_soon(id: ModuleId, title: &str, tag: &str, summary: &str) -> Module {
    Module {
        id,
        title: title.into(),
        tag: tag.into(),
        summary: summary.into(),
        description: summary.into(),
        lessons: Vec::new(),
    }
}

fn module_d() -> Module {
    coming_soon(ModuleId::D, "Hybrid RAG", "RAG", "BM25, vectors, MMR, adaptive re-ranking")
}

fn module_e() -> Module {
    coming_soon(ModuleId::E, "Local EvalOps", "Evaluation", "Automatic quick evals, precision/cost gates")
}

fn capstone() -> Module {
    coming_soon(
        ModuleId::Capstone,
        "Complete Agent",
        "Final Project",
        "LangGraph + hybrid RAG that answers questions about code repositories",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::ContentBlock;

    #[test]
    fn catalog_lists_every_module_in_order() {
        let ids: Vec<ModuleId> = CATALOG.modules().iter().map(|m| m.id).collect();
        assert_eq!(ids, ModuleId::ALL.to_vec());
    }

    #[test]
    fn open_modules_have_six_ordered_lessons() {
        for id in [ModuleId::A, ModuleId::B, ModuleId::C] {
            let module = CATALOG.module(id).unwrap();
            assert!(module.is_available());
            let ids: Vec<u32> = module.lessons.iter().map(|l| l.id.0).collect();
            assert_eq!(ids, vec![1, 2, 3, 4, 5, 6], "{id}");
        }
    }

    #[test]
    fn upcoming_modules_cannot_be_opened() {
        for id in [ModuleId::D, ModuleId::E, ModuleId::Capstone] {
            assert!(!CATALOG.module(id).unwrap().is_available());
        }
    }

    #[test]
    fn lesson_metadata_for_module_a() {
        let lesson = CATALOG.lesson(ModuleId::A, LessonId(3)).unwrap();
        assert_eq!(lesson.title, "Your First LangGraph Agent");
        assert_eq!(lesson.duration, "30 min");
        assert_eq!(lesson.kind, LessonKind::HandsOn);
    }

    #[test]
    fn every_lesson_renders_content() {
        for module in CATALOG.modules() {
            for lesson in &module.lessons {
                assert!(!lesson.source.render().is_empty(), "{} lesson {}", module.id, lesson.id);
            }
        }
    }

    #[test]
    fn graph_lesson_has_retry_loop() {
        let blocks = CATALOG.lesson(ModuleId::A, LessonId(2)).unwrap().source.render();
        let graph = blocks
            .iter()
            .find_map(|b| match b {
                ContentBlock::Graph(graph) => Some(graph),
                _ => None,
            })
            .unwrap();
        assert_eq!(graph.nodes.len(), 5);
        assert!(graph.edges.iter().any(|e| e.from == "critic"
            && e.to == "plan"
            && e.condition.as_deref() == Some("retry")));
    }

    #[test]
    fn first_agent_lesson_has_titled_python_panel() {
        let blocks = CATALOG.lesson(ModuleId::A, LessonId(3)).unwrap().source.render();
        let panel = blocks
            .iter()
            .find_map(|b| match b {
                ContentBlock::Code(panel) => Some(panel),
                _ => None,
            })
            .unwrap();
        assert_eq!(panel.language(), Some("python"));
        assert_eq!(panel.title(), Some("simple_agent.py"));
        assert!(panel.code().starts_with("from langgraph.graph import Graph"));
    }
}
