//! Key mapping

use crossterm::event::{KeyCode, KeyModifiers};

/// Map a key press to an action
pub fn key_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match key {
            KeyCode::Char('d') => Some(Action::HalfPageDown),
            KeyCode::Char('u') => Some(Action::HalfPageUp),
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Left),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Right),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::Top),
        KeyCode::Char('G') | KeyCode::End => Some(Action::Bottom),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Tab | KeyCode::BackTab => Some(Action::SwitchPanel),
        KeyCode::Enter => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('n') => Some(Action::NextLesson),
        KeyCode::Char('p') => Some(Action::PreviousLesson),
        KeyCode::Char('m') => Some(Action::MarkComplete),
        KeyCode::Char(']') => Some(Action::NextCodePanel),
        KeyCode::Char('[') => Some(Action::PreviousCodePanel),
        KeyCode::Char('y') => Some(Action::Copy),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    PageUp,
    PageDown,
    HalfPageUp,
    HalfPageDown,
    SwitchPanel,

    // Selection
    Select,
    Back,

    // Lessons
    NextLesson,
    PreviousLesson,
    MarkComplete,

    // Code panels
    NextCodePanel,
    PreviousCodePanel,
    Copy,

    Help,
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(key: KeyCode) -> Option<Action> {
        key_to_action(key, KeyModifiers::NONE)
    }

    #[test]
    fn vim_keys_and_arrows_navigate() {
        assert_eq!(plain(KeyCode::Char('j')), Some(Action::Down));
        assert_eq!(plain(KeyCode::Up), Some(Action::Up));
        assert_eq!(plain(KeyCode::Char('G')), Some(Action::Bottom));
    }

    #[test]
    fn lesson_and_code_keys() {
        assert_eq!(plain(KeyCode::Char('m')), Some(Action::MarkComplete));
        assert_eq!(plain(KeyCode::Char('n')), Some(Action::NextLesson));
        assert_eq!(plain(KeyCode::Char(']')), Some(Action::NextCodePanel));
        assert_eq!(plain(KeyCode::Char('y')), Some(Action::Copy));
    }

    #[test]
    fn ctrl_d_and_u_move_half_pages() {
        assert_eq!(
            key_to_action(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(Action::HalfPageDown)
        );
        assert_eq!(
            key_to_action(KeyCode::Char('u'), KeyModifiers::CONTROL),
            Some(Action::HalfPageUp)
        );
    }

    #[test]
    fn plain_d_is_not_bound() {
        assert_eq!(plain(KeyCode::Char('d')), None);
    }

    #[test]
    fn quit_keys() {
        assert_eq!(plain(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(key_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Action::Quit));
    }
}
