//! Application state definitions

use super::input::Action;
use crate::clipboard::ClipboardCodePanel;
use crate::config::Config;
use crate::curriculum::{CATALOG, LessonId, ModuleId};
use crate::page::ModulePage;

/// Which screen is currently displayed
#[derive(Debug, Default)]
pub enum Screen {
    #[default]
    Landing,
    /// A mounted module; leaving it drops the page and its progress
    Module(ModulePage),
}

/// Which panel of the module screen has focus
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Panel {
    Sidebar,
    #[default]
    Content,
}

/// Selection on the landing screen (index into the catalog)
#[derive(Debug, Clone, Default)]
pub struct LandingState {
    pub selected: usize,
}

/// State for the lesson sidebar
#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    /// Selected lesson index
    pub selected_index: usize,
    pub scroll_offset: usize,
    /// Visible height in entries (updated on render)
    pub visible_height: usize,
}

impl SidebarState {
    /// Ensure the selected item is visible by adjusting scroll offset
    pub fn ensure_selection_visible(&mut self) {
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        if self.visible_height > 0 && self.selected_index >= self.scroll_offset + self.visible_height
        {
            self.scroll_offset = self.selected_index + 1 - self.visible_height;
        }
    }
}

/// State for content rendering
#[derive(Debug, Clone, Default)]
pub struct ContentState {
    /// Current scroll position (lines from top)
    pub scroll_offset: usize,
    /// Total rendered lines (updated on render)
    pub total_lines: usize,
    /// Visible height in lines (updated on render)
    pub visible_height: usize,
    /// Line index of each code panel header (updated on render)
    pub code_anchors: Vec<usize>,
    /// Code panel targeted by copy
    pub focused_code: Option<usize>,
}

impl ContentState {
    /// Get the maximum allowed scroll offset
    pub fn max_scroll(&self) -> usize {
        self.total_lines.saturating_sub(self.visible_height / 2)
    }

    /// Clamp scroll offset to valid range
    pub fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta);
        self.clamp_scroll();
    }

    /// Back to the top of a freshly selected lesson
    pub fn reset(&mut self) {
        *self = Self { visible_height: self.visible_height, ..Self::default() };
    }

    pub fn focus_next_code(&mut self) -> Option<usize> {
        let next = match self.focused_code {
            Some(i) if i + 1 < self.code_anchors.len() => i + 1,
            Some(i) => i,
            None => self.first_panel_in_view()?,
        };
        self.focus_code(next)
    }

    pub fn focus_previous_code(&mut self) -> Option<usize> {
        let previous = match self.focused_code {
            Some(i) => i.saturating_sub(1),
            None => self.first_panel_in_view()?,
        };
        self.focus_code(previous)
    }

    fn focus_code(&mut self, index: usize) -> Option<usize> {
        let anchor = *self.code_anchors.get(index)?;
        self.focused_code = Some(index);
        self.scroll_offset = anchor;
        self.clamp_scroll();
        Some(index)
    }

    /// First panel at or below the scroll position, else the last one above it
    fn first_panel_in_view(&self) -> Option<usize> {
        self.code_anchors
            .iter()
            .position(|&anchor| anchor >= self.scroll_offset)
            .or_else(|| self.code_anchors.len().checked_sub(1))
    }
}

/// Message shown in the status line
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    pub message: Option<String>,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.is_error = false;
    }
}

/// Side effects the event loop must carry out
#[derive(Debug)]
pub enum Effect {
    Quit,
    /// Copy this panel's code to the clipboard in the background
    Copy(ClipboardCodePanel),
}

/// How a background copy ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyOutcome {
    /// File name of the copied panel, if it has one
    pub title: Option<String>,
    pub copied: bool,
}

#[derive(Debug, Default)]
pub struct AppState {
    pub screen: Screen,
    pub landing: LandingState,
    pub focused_panel: Panel,
    pub sidebar: SidebarState,
    pub content: ContentState,
    pub status: StatusMessage,
    pub show_help: bool,
}

impl AppState {
    pub fn page(&self) -> Option<&ModulePage> {
        match &self.screen {
            Screen::Module(page) => Some(page),
            Screen::Landing => None,
        }
    }

    pub fn page_mut(&mut self) -> Option<&mut ModulePage> {
        match &mut self.screen {
            Screen::Module(page) => Some(page),
            Screen::Landing => None,
        }
    }

    /// Mount a fresh page for `id`. Modules without lessons stay closed.
    pub fn open_module(&mut self, id: ModuleId) -> bool {
        let Some(module) = CATALOG.module(id) else { return false };
        if !module.is_available() {
            self.status.set_error(format!("{} is coming soon", module.id.label()));
            return false;
        }

        if let Some(index) = CATALOG.modules().iter().position(|m| m.id == id) {
            self.landing.selected = index;
        }
        self.screen = Screen::Module(ModulePage::mount(module));
        self.focused_panel = Panel::Content;
        self.sidebar = SidebarState::default();
        self.content.reset();
        self.status.clear();
        true
    }

    /// Unmount the current module and return to the landing screen
    pub fn close_module(&mut self) {
        if let Screen::Module(page) = std::mem::take(&mut self.screen) {
            tracing::info!(
                module = %page.module().id,
                completed = page.tracker().completed_count(),
                "left module, discarding progress"
            );
        }
        self.content.reset();
        self.status.clear();
    }

    pub fn handle_action(&mut self, action: Action, config: &Config) -> Option<Effect> {
        match action {
            Action::Quit => return Some(Effect::Quit),
            Action::Help => {
                self.show_help = !self.show_help;
                return None;
            }
            Action::Back if self.show_help => {
                self.show_help = false;
                return None;
            }
            _ if self.show_help => return None,
            _ => {}
        }

        if matches!(self.screen, Screen::Landing) {
            self.handle_landing_action(action);
            None
        } else {
            self.handle_module_action(action, config)
        }
    }

    fn handle_landing_action(&mut self, action: Action) {
        let count = CATALOG.modules().len();
        let selected = &mut self.landing.selected;
        match action {
            Action::Down => *selected = (*selected + 1).min(count.saturating_sub(1)),
            Action::Up => *selected = selected.saturating_sub(1),
            Action::Top => *selected = 0,
            Action::Bottom => *selected = count.saturating_sub(1),
            Action::Select | Action::Right => {
                if let Some(module) = CATALOG.modules().get(*selected) {
                    self.open_module(module.id);
                }
            }
            _ => {}
        }
    }

    fn handle_module_action(&mut self, action: Action, config: &Config) -> Option<Effect> {
        let half_page = (self.content.visible_height / 2).max(1) as isize;
        let page = self.content.visible_height.max(1) as isize;

        match action {
            Action::Back => self.close_module(),
            Action::SwitchPanel => {
                self.focused_panel = match self.focused_panel {
                    Panel::Sidebar => Panel::Content,
                    Panel::Content => Panel::Sidebar,
                };
            }
            Action::Left => self.focused_panel = Panel::Sidebar,
            Action::Right => self.focused_panel = Panel::Content,
            Action::NextLesson => {
                if self.page_mut().is_some_and(ModulePage::next_lesson) {
                    self.lesson_changed();
                }
            }
            Action::PreviousLesson => {
                if self.page_mut().is_some_and(ModulePage::previous_lesson) {
                    self.lesson_changed();
                }
            }
            Action::MarkComplete => self.mark_complete(config),
            Action::NextCodePanel => {
                self.content.focus_next_code();
            }
            Action::PreviousCodePanel => {
                self.content.focus_previous_code();
            }
            Action::Copy => return self.copy_focused_code(),
            _ if self.focused_panel == Panel::Sidebar => self.handle_sidebar_action(action),
            Action::Down => self.content.scroll_by(1),
            Action::Up => self.content.scroll_by(-1),
            Action::PageDown => self.content.scroll_by(page),
            Action::PageUp => self.content.scroll_by(-page),
            Action::HalfPageDown => self.content.scroll_by(half_page),
            Action::HalfPageUp => self.content.scroll_by(-half_page),
            Action::Top => self.content.scroll_offset = 0,
            Action::Bottom => self.content.scroll_offset = self.content.max_scroll(),
            _ => {}
        }
        None
    }

    fn handle_sidebar_action(&mut self, action: Action) {
        let count = self.page().map_or(0, |page| page.module().lessons.len());
        let last = count.saturating_sub(1);
        let selected = &mut self.sidebar.selected_index;
        match action {
            Action::Down => *selected = (*selected + 1).min(last),
            Action::Up => *selected = selected.saturating_sub(1),
            Action::Top | Action::PageUp | Action::HalfPageUp => *selected = 0,
            Action::Bottom | Action::PageDown | Action::HalfPageDown => *selected = last,
            Action::Select => {
                let index = *selected;
                let id = self.page().and_then(|page| page.module().lessons.get(index)).map(|l| l.id);
                if let Some(id) = id {
                    self.select_lesson(id);
                    self.focused_panel = Panel::Content;
                }
            }
            _ => {}
        }
        self.sidebar.ensure_selection_visible();
    }

    /// Select a lesson through the page and reset the content view
    pub fn select_lesson(&mut self, id: LessonId) -> bool {
        let selected = self.page_mut().is_some_and(|page| page.select_lesson(id));
        if selected {
            self.lesson_changed();
        }
        selected
    }

    fn lesson_changed(&mut self) {
        self.content.reset();
        let current = self.page().and_then(|page| {
            let id = page.tracker().current_lesson()?;
            page.module().lessons.iter().position(|l| l.id == id)
        });
        if let Some(index) = current {
            self.sidebar.selected_index = index;
            self.sidebar.ensure_selection_visible();
        }
    }

    fn mark_complete(&mut self, config: &Config) {
        let Some(page) = self.page_mut() else { return };
        let Some(current) = page.current_lesson() else { return };

        if config.advance_on_complete {
            let advanced = page.complete_and_advance();
            let label = page.progress_label();
            self.status.set_message(format!("Lesson {} completed · {label}", current.id));
            if advanced.is_some() {
                self.lesson_changed();
            }
        } else {
            page.mark_current_complete();
            let label = page.progress_label();
            self.status.set_message(format!("Lesson {} completed · {label}", current.id));
        }
    }

    /// Report a finished copy in the status line
    pub fn copy_finished(&mut self, outcome: CopyOutcome) {
        let name = outcome.title.unwrap_or_else(|| "code".to_owned());
        if outcome.copied {
            self.status.set_message(format!("Copied {name} to clipboard"));
        } else {
            self.status.set_error(format!("Could not copy {name} to clipboard"));
        }
    }

    /// The panel to copy: the focused one, or the first one in view
    fn copy_focused_code(&mut self) -> Option<Effect> {
        let index = match self.content.focused_code {
            Some(index) => index,
            None => self.content.first_panel_in_view().unwrap_or(0),
        };
        let panel = self
            .page()
            .and_then(|page| page.current_content())
            .and_then(|content| content.code_panels().nth(index))
            .cloned();

        match panel {
            Some(panel) => {
                self.content.focused_code = Some(index);
                self.status.clear();
                Some(Effect::Copy(panel))
            }
            None => {
                self.status.set_error("No code panel in this lesson");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn in_module(id: ModuleId) -> AppState {
        let mut state = AppState::default();
        assert!(state.open_module(id));
        state
    }

    fn current(state: &AppState) -> Option<u32> {
        state.page()?.tracker().current_lesson().map(|id| id.0)
    }

    #[test]
    fn landing_selection_is_bounded() {
        let mut state = AppState::default();
        let config = Config::default();
        state.handle_action(Action::Up, &config);
        assert_eq!(state.landing.selected, 0);
        for _ in 0..20 {
            state.handle_action(Action::Down, &config);
        }
        assert_eq!(state.landing.selected, CATALOG.modules().len() - 1);
    }

    #[test]
    fn enter_on_landing_opens_selected_module() {
        let mut state = AppState::default();
        let config = Config::default();
        state.handle_action(Action::Down, &config);
        state.handle_action(Action::Select, &config);
        assert_eq!(state.page().map(|p| p.module().id), Some(ModuleId::B));
        assert_eq!(current(&state), Some(1));
    }

    #[test]
    fn upcoming_modules_do_not_open() {
        let mut state = AppState::default();
        assert!(!state.open_module(ModuleId::Capstone));
        assert!(state.page().is_none());
        assert!(state.status.is_error);
    }

    #[test]
    fn leaving_a_module_discards_progress() {
        let mut state = in_module(ModuleId::A);
        let config = Config::default();
        state.handle_action(Action::MarkComplete, &config);
        assert_eq!(state.page().unwrap().tracker().completed_count(), 1);

        state.handle_action(Action::Back, &config);
        assert!(matches!(state.screen, Screen::Landing));

        state.handle_action(Action::Select, &config);
        assert_eq!(state.page().unwrap().tracker().completed_count(), 0);
    }

    #[test]
    fn mark_complete_stays_on_lesson_by_default() {
        let mut state = in_module(ModuleId::B);
        state.handle_action(Action::MarkComplete, &Config::default());
        assert_eq!(current(&state), Some(1));
        assert_eq!(
            state.status.message.as_deref(),
            Some("Lesson 1 completed · 1 of 6 lessons completed")
        );
    }

    #[test]
    fn mark_complete_advances_when_configured() {
        let mut state = in_module(ModuleId::C);
        let config = Config { advance_on_complete: true, ..Config::default() };
        state.content.scroll_offset = 7;
        state.handle_action(Action::MarkComplete, &config);
        assert_eq!(current(&state), Some(2));
        assert_eq!(state.sidebar.selected_index, 1);
        assert_eq!(state.content.scroll_offset, 0);
    }

    #[test]
    fn next_and_previous_lesson_keep_sidebar_in_sync() {
        let mut state = in_module(ModuleId::A);
        let config = Config::default();
        state.handle_action(Action::NextLesson, &config);
        state.handle_action(Action::NextLesson, &config);
        assert_eq!(current(&state), Some(3));
        assert_eq!(state.sidebar.selected_index, 2);
        state.handle_action(Action::PreviousLesson, &config);
        assert_eq!(current(&state), Some(2));
    }

    #[test]
    fn sidebar_enter_selects_lesson_and_focuses_content() {
        let mut state = in_module(ModuleId::A);
        let config = Config::default();
        state.handle_action(Action::Left, &config);
        assert_eq!(state.focused_panel, Panel::Sidebar);
        for _ in 0..5 {
            state.handle_action(Action::Down, &config);
        }
        state.handle_action(Action::Select, &config);
        assert_eq!(current(&state), Some(6));
        assert_eq!(state.focused_panel, Panel::Content);
    }

    #[test]
    fn content_scrolling_is_clamped() {
        let mut state = in_module(ModuleId::A);
        let config = Config::default();
        state.content.total_lines = 30;
        state.content.visible_height = 10;
        state.handle_action(Action::Up, &config);
        assert_eq!(state.content.scroll_offset, 0);
        state.handle_action(Action::Bottom, &config);
        assert_eq!(state.content.scroll_offset, 25);
        state.handle_action(Action::PageDown, &config);
        assert_eq!(state.content.scroll_offset, 25);
        state.handle_action(Action::HalfPageUp, &config);
        assert_eq!(state.content.scroll_offset, 20);
    }

    #[test]
    fn code_panel_focus_moves_between_anchors() {
        let mut content = ContentState {
            total_lines: 100,
            visible_height: 20,
            code_anchors: vec![10, 40, 70],
            ..ContentState::default()
        };
        assert_eq!(content.focus_next_code(), Some(0));
        assert_eq!(content.scroll_offset, 10);
        assert_eq!(content.focus_next_code(), Some(1));
        assert_eq!(content.focus_next_code(), Some(2));
        assert_eq!(content.focus_next_code(), Some(2));
        assert_eq!(content.focus_previous_code(), Some(1));
        assert_eq!(content.scroll_offset, 40);
    }

    #[test]
    fn code_focus_starts_from_scroll_position() {
        let mut content = ContentState {
            total_lines: 100,
            visible_height: 20,
            scroll_offset: 30,
            code_anchors: vec![10, 40],
            ..ContentState::default()
        };
        assert_eq!(content.focus_next_code(), Some(1));
    }

    #[test]
    fn lessons_without_code_have_nothing_to_focus() {
        let mut content = ContentState::default();
        assert_eq!(content.focus_next_code(), None);
        assert_eq!(content.focused_code, None);
    }

    #[test]
    fn copy_targets_focused_panel() {
        let mut state = in_module(ModuleId::B);
        state.select_lesson(LessonId(4));
        state.content.focused_code = Some(1);

        let Some(Effect::Copy(panel)) = state.handle_action(Action::Copy, &Config::default())
        else {
            panic!("expected a copy effect");
        };
        assert_eq!(panel.title(), Some("allowlist_manager.py"));
    }

    #[test]
    fn copy_without_code_reports_error() {
        let mut state = in_module(ModuleId::A);
        assert!(state.handle_action(Action::Copy, &Config::default()).is_none());
        assert!(state.status.is_error);
    }

    #[test]
    fn finished_copy_names_the_file() {
        let mut state = AppState::default();
        state.copy_finished(CopyOutcome { title: Some("tool_contracts.py".into()), copied: true });
        assert_eq!(state.status.message.as_deref(), Some("Copied tool_contracts.py to clipboard"));
        assert!(!state.status.is_error);
    }

    #[test]
    fn failed_copy_is_reported_as_error() {
        let mut state = AppState::default();
        state.copy_finished(CopyOutcome { title: None, copied: false });
        assert_eq!(state.status.message.as_deref(), Some("Could not copy code to clipboard"));
        assert!(state.status.is_error);
    }

    #[test]
    fn help_swallows_other_actions_until_closed() {
        let mut state = AppState::default();
        let config = Config::default();
        state.handle_action(Action::Help, &config);
        state.handle_action(Action::Down, &config);
        assert_eq!(state.landing.selected, 0);
        state.handle_action(Action::Back, &config);
        assert!(!state.show_help);
    }

    #[test]
    fn quit_is_always_available() {
        let mut state = in_module(ModuleId::A);
        state.show_help = true;
        assert!(matches!(state.handle_action(Action::Quit, &Config::default()), Some(Effect::Quit)));
    }

    #[test]
    fn sidebar_scrolls_to_keep_selection_visible() {
        let mut sidebar = SidebarState { selected_index: 5, visible_height: 3, ..Default::default() };
        sidebar.ensure_selection_visible();
        assert_eq!(sidebar.scroll_offset, 3);
        sidebar.selected_index = 1;
        sidebar.ensure_selection_visible();
        assert_eq!(sidebar.scroll_offset, 1);
    }
}
