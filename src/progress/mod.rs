//! Lesson progress for a mounted module
//!
//! [`ProgressState`] is a plain value with pure transitions. The
//! [`LessonProgressTracker`] owns one, together with the module's lesson ids,
//! and only applies transitions for lessons the module actually has.

use std::collections::BTreeSet;

use crate::curriculum::LessonId;

/// Current lesson plus the set of completed lessons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    pub current: Option<LessonId>,
    pub completed: BTreeSet<LessonId>,
}

impl ProgressState {
    /// State with `id` as the current lesson
    pub fn with_current(&self, id: LessonId) -> Self {
        Self { current: Some(id), completed: self.completed.clone() }
    }

    /// State with `id` added to the completed set
    pub fn with_completed(&self, id: LessonId) -> Self {
        let mut completed = self.completed.clone();
        completed.insert(id);
        Self { current: self.current, completed }
    }
}

/// Tracks progress through the lessons of one module
#[derive(Debug, Clone)]
pub struct LessonProgressTracker {
    lessons: BTreeSet<LessonId>,
    state: ProgressState,
}

impl LessonProgressTracker {
    /// Start at the first lesson with nothing completed
    pub fn new(ids: impl IntoIterator<Item = LessonId>) -> Self {
        let lessons: BTreeSet<LessonId> = ids.into_iter().collect();
        let state = ProgressState { current: lessons.first().copied(), ..Default::default() };
        Self { lessons, state }
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn current_lesson(&self) -> Option<LessonId> {
        self.state.current
    }

    pub fn contains(&self, id: LessonId) -> bool {
        self.lessons.contains(&id)
    }

    /// Make `id` the current lesson. Unknown ids leave the state alone.
    pub fn select_lesson(&mut self, id: LessonId) -> bool {
        if !self.contains(id) {
            tracing::warn!(lesson = %id, "ignoring selection of unknown lesson");
            return false;
        }
        self.state = self.state.with_current(id);
        true
    }

    /// Record `id` as completed. Marking twice is harmless.
    pub fn mark_complete(&mut self, id: LessonId) -> bool {
        if !self.contains(id) {
            tracing::warn!(lesson = %id, "ignoring completion of unknown lesson");
            return false;
        }
        if !self.state.completed.contains(&id) {
            self.state = self.state.with_completed(id);
            tracing::info!(lesson = %id, completed = self.completed_count(), "lesson completed");
        }
        true
    }

    pub fn is_completed(&self, id: LessonId) -> bool {
        self.state.completed.contains(&id)
    }

    pub fn completed_count(&self) -> usize {
        self.state.completed.len()
    }

    pub fn total_lessons(&self) -> usize {
        self.lessons.len()
    }

    pub fn all_complete(&self) -> bool {
        !self.lessons.is_empty() && self.completed_count() == self.total_lessons()
    }

    /// Completed fraction in `[0, 1]`; zero for a module without lessons
    pub fn progress_fraction(&self) -> f64 {
        if self.lessons.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.total_lessons() as f64
    }

    pub fn next_lesson(&self) -> Option<LessonId> {
        let current = self.state.current?;
        self.lessons.range(current..).nth(1).copied()
    }

    pub fn previous_lesson(&self) -> Option<LessonId> {
        let current = self.state.current?;
        self.lessons.range(..current).next_back().copied()
    }

    /// Complete the current lesson and move on to the next one, if any
    pub fn complete_and_advance(&mut self) -> Option<LessonId> {
        let current = self.state.current?;
        self.mark_complete(current);
        let next = self.next_lesson()?;
        self.select_lesson(next);
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;

    fn six_lessons() -> LessonProgressTracker {
        LessonProgressTracker::new((1..=6).map(LessonId))
    }

    #[test]
    fn starts_at_first_lesson_with_nothing_completed() {
        let tracker = LessonProgressTracker::new([3, 1, 2].map(LessonId));
        assert_eq!(tracker.current_lesson(), Some(LessonId(1)));
        assert_eq!(tracker.completed_count(), 0);
        assert_eq!(tracker.progress_fraction(), 0.0);
    }

    #[test]
    fn empty_module_has_no_current_lesson_and_zero_progress() {
        let tracker = LessonProgressTracker::new([]);
        assert_eq!(tracker.current_lesson(), None);
        assert_eq!(tracker.progress_fraction(), 0.0);
        assert!(!tracker.all_complete());
    }

    #[test]
    fn mixed_selection_and_completion() {
        let mut tracker = six_lessons();
        tracker.mark_complete(LessonId(3));
        tracker.mark_complete(LessonId(1));
        tracker.select_lesson(LessonId(6));

        assert_eq!(tracker.state().completed, BTreeSet::from([LessonId(1), LessonId(3)]));
        assert_eq!(tracker.current_lesson(), Some(LessonId(6)));
        assert_eq!(tracker.progress_fraction(), 2.0 / 6.0);
    }

    #[test]
    fn unknown_lesson_selection_is_ignored() {
        let mut tracker = six_lessons();
        tracker.select_lesson(LessonId(4));
        assert!(!tracker.select_lesson(LessonId(99)));
        assert_eq!(tracker.current_lesson(), Some(LessonId(4)));
    }

    #[test]
    fn unknown_lesson_completion_is_ignored() {
        let mut tracker = six_lessons();
        assert!(!tracker.mark_complete(LessonId(0)));
        assert_eq!(tracker.completed_count(), 0);
    }

    #[test]
    fn next_and_previous_follow_id_order() {
        let mut tracker = LessonProgressTracker::new([1, 2, 5].map(LessonId));
        assert_eq!(tracker.previous_lesson(), None);
        assert_eq!(tracker.next_lesson(), Some(LessonId(2)));
        tracker.select_lesson(LessonId(2));
        assert_eq!(tracker.next_lesson(), Some(LessonId(5)));
        tracker.select_lesson(LessonId(5));
        assert_eq!(tracker.next_lesson(), None);
        assert_eq!(tracker.previous_lesson(), Some(LessonId(2)));
    }

    #[test]
    fn complete_and_advance_moves_forward_until_the_end() {
        let mut tracker = LessonProgressTracker::new([1, 2].map(LessonId));
        assert_eq!(tracker.complete_and_advance(), Some(LessonId(2)));
        assert_eq!(tracker.complete_and_advance(), None);
        assert_eq!(tracker.current_lesson(), Some(LessonId(2)));
        assert!(tracker.all_complete());
    }

    #[test]
    fn transitions_do_not_touch_the_original_state() {
        let state = ProgressState::default();
        let next = state.with_completed(LessonId(2)).with_current(LessonId(2));
        assert_eq!(state, ProgressState::default());
        assert_eq!(next.current, Some(LessonId(2)));
        assert!(next.completed.contains(&LessonId(2)));
    }

    proptest! {
        #[test]
        fn marking_one_lesson_once_or_twice_gives_one_over_n(n in 1u32..20, pick in 0u32..20, twice: bool) {
            let mut tracker = LessonProgressTracker::new((1..=n).map(LessonId));
            let id = LessonId(pick % n + 1);
            tracker.mark_complete(id);
            if twice {
                tracker.mark_complete(id);
            }
            prop_assert_eq!(tracker.progress_fraction(), 1.0 / n as f64);
        }

        #[test]
        fn selected_lesson_becomes_current(n in 1u32..20, picks in prop::collection::vec(0u32..20, 1..10)) {
            let mut tracker = LessonProgressTracker::new((1..=n).map(LessonId));
            for pick in picks {
                let id = LessonId(pick % n + 1);
                prop_assert!(tracker.select_lesson(id));
                prop_assert_eq!(tracker.current_lesson(), Some(id));
            }
        }

        #[test]
        fn marking_every_lesson_in_any_order_completes_the_module(
            order in Just((1u32..=8).collect::<Vec<_>>()).prop_shuffle(),
            repeats in prop::collection::vec(1u32..=8, 0..8),
        ) {
            let mut tracker = LessonProgressTracker::new((1..=8).map(LessonId));
            for id in order.into_iter().chain(repeats) {
                tracker.mark_complete(LessonId(id));
            }
            prop_assert_eq!(tracker.progress_fraction(), 1.0);
            prop_assert!(tracker.all_complete());
        }

        #[test]
        fn progress_stays_within_unit_interval(ids in prop::collection::vec(0u32..12, 0..30)) {
            let mut tracker = LessonProgressTracker::new((1..=6).map(LessonId));
            for id in ids {
                tracker.mark_complete(LessonId(id));
                let fraction = tracker.progress_fraction();
                prop_assert!((0.0..=1.0).contains(&fraction));
                prop_assert!(tracker.state().completed.iter().all(|id| tracker.contains(*id)));
            }
        }
    }
}
