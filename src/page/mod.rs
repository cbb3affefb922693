//! A mounted module page
//!
//! Mounting a module builds a fresh progress tracker and renders every lesson
//! once. The page lives for as long as the module is on screen; dropping it
//! discards the session's progress.

use std::collections::BTreeMap;

use crate::clipboard::ClipboardCodePanel;
use crate::curriculum::{ContentBlock, Lesson, LessonId, Module};
use crate::progress::LessonProgressTracker;

/// Rendered blocks of one lesson
#[derive(Debug, Clone, Default)]
pub struct LessonContent {
    pub blocks: Vec<ContentBlock>,
}

impl LessonContent {
    /// Code panels in document order
    pub fn code_panels(&self) -> impl Iterator<Item = &ClipboardCodePanel> {
        self.blocks.iter().filter_map(|block| match block {
            ContentBlock::Code(panel) => Some(panel),
            _ => None,
        })
    }
}

/// One row of the lesson sidebar
#[derive(Debug, Clone, Copy)]
pub struct SidebarEntry<'a> {
    pub lesson: &'a Lesson,
    pub is_current: bool,
    pub is_completed: bool,
}

#[derive(Debug)]
pub struct ModulePage {
    module: &'static Module,
    tracker: LessonProgressTracker,
    contents: BTreeMap<LessonId, LessonContent>,
}

impl ModulePage {
    pub fn mount(module: &'static Module) -> Self {
        let tracker = LessonProgressTracker::new(module.lessons.iter().map(|lesson| lesson.id));
        let contents = module
            .lessons
            .iter()
            .map(|lesson| (lesson.id, LessonContent { blocks: lesson.source.render() }))
            .collect();
        tracing::info!(module = %module.id, lessons = module.lessons.len(), "mounted module page");
        Self { module, tracker, contents }
    }

    pub fn module(&self) -> &'static Module {
        self.module
    }

    pub fn tracker(&self) -> &LessonProgressTracker {
        &self.tracker
    }

    pub fn current_lesson(&self) -> Option<&'static Lesson> {
        self.module.lesson(self.tracker.current_lesson()?)
    }

    pub fn current_content(&self) -> Option<&LessonContent> {
        self.content(self.tracker.current_lesson()?)
    }

    fn content(&self, id: LessonId) -> Option<&LessonContent> {
        self.contents.get(&id)
    }

    pub fn sidebar_entries(&self) -> Vec<SidebarEntry<'static>> {
        let current = self.tracker.current_lesson();
        self.module
            .lessons
            .iter()
            .map(|lesson| SidebarEntry {
                lesson,
                is_current: Some(lesson.id) == current,
                is_completed: self.tracker.is_completed(lesson.id),
            })
            .collect()
    }

    /// e.g. "2 of 6 lessons completed"
    pub fn progress_label(&self) -> String {
        format!(
            "{} of {} lessons completed",
            self.tracker.completed_count(),
            self.tracker.total_lessons()
        )
    }

    pub fn progress_fraction(&self) -> f64 {
        self.tracker.progress_fraction()
    }

    pub fn select_lesson(&mut self, id: LessonId) -> bool {
        self.tracker.select_lesson(id)
    }

    pub fn mark_complete(&mut self, id: LessonId) -> bool {
        self.tracker.mark_complete(id)
    }

    pub fn mark_current_complete(&mut self) -> bool {
        self.tracker.current_lesson().is_some_and(|id| self.tracker.mark_complete(id))
    }

    pub fn complete_and_advance(&mut self) -> Option<LessonId> {
        self.tracker.complete_and_advance()
    }

    pub fn next_lesson(&mut self) -> bool {
        self.tracker.next_lesson().is_some_and(|id| self.tracker.select_lesson(id))
    }

    pub fn previous_lesson(&mut self) -> bool {
        self.tracker.previous_lesson().is_some_and(|id| self.tracker.select_lesson(id))
    }
}
