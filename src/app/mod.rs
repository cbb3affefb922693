//! Application state and event handling

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::clipboard::{ClipboardBackend, ClipboardCodePanel, SystemClipboard};
use crate::config::Config;
use crate::curriculum::ModuleId;
use crate::theme::Theme;
use crate::ui;
use state::{AppState, CopyOutcome, Effect};

/// The main application
pub struct App {
    config: Config,
    theme: Theme,
    state: AppState,
    clipboard: Arc<SystemClipboard>,
    copy_results: (mpsc::UnboundedSender<CopyOutcome>, mpsc::UnboundedReceiver<CopyOutcome>),
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance, optionally opening `start_module`
    pub fn new(config: Config, start_module: Option<ModuleId>) -> Result<Self> {
        let theme = config.active_theme();
        let mut state = AppState::default();
        if let Some(id) = start_module.or(config.start_module) {
            state.open_module(id);
        }

        let terminal = Self::setup_terminal().context("failed to set up terminal")?;
        Ok(Self {
            config,
            theme,
            state,
            clipboard: Arc::new(SystemClipboard::new()),
            copy_results: mpsc::unbounded_channel(),
            terminal,
        })
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Ok(Terminal::new(backend)?)
    }

    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
            original_hook(panic_info);
        }));

        loop {
            let theme = &self.theme;
            let state = &mut self.state;
            self.terminal.draw(|frame| ui::draw(frame, state, theme))?;

            while let Ok(outcome) = self.copy_results.1.try_recv() {
                self.state.copy_finished(outcome);
            }

            if event::poll(std::time::Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    let Some(action) = input::key_to_action(key.code, key.modifiers) else {
                        continue;
                    };
                    match self.state.handle_action(action, &self.config) {
                        Some(Effect::Quit) => break,
                        Some(Effect::Copy(panel)) => {
                            let results = self.copy_results.0.clone();
                            spawn_copy(panel, Arc::clone(&self.clipboard), results);
                        }
                        None => {}
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }
}

/// Copy in the background; the panel's own flag drives the feedback and the
/// outcome is sent to `results` for the status line
fn spawn_copy<B: ClipboardBackend>(
    panel: ClipboardCodePanel,
    backend: Arc<B>,
    results: mpsc::UnboundedSender<CopyOutcome>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let copied = panel.copy(backend.as_ref()).await;
        let _ = results.send(CopyOutcome { title: panel.title().map(str::to_owned), copied });
    })
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::app::input::Action;
    use crate::clipboard::testing::{RecordingClipboard, RejectingClipboard};
    use crate::curriculum::{LessonId, ModuleId};

    fn copy_effect(state: &mut AppState) -> ClipboardCodePanel {
        match state.handle_action(Action::Copy, &Config::default()) {
            Some(Effect::Copy(panel)) => panel,
            other => panic!("expected a copy effect, got {other:?}"),
        }
    }

    fn state_on_lesson(module: ModuleId, lesson: u32) -> AppState {
        let mut state = AppState::default();
        assert!(state.open_module(module));
        assert!(state.select_lesson(LessonId(lesson)));
        state
    }

    #[tokio::test]
    async fn successful_copy_reaches_clipboard_and_status_line() {
        let mut state = state_on_lesson(ModuleId::B, 2);
        let panel = copy_effect(&mut state);
        let backend = Arc::new(RecordingClipboard::default());
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_copy(panel.clone(), Arc::clone(&backend), tx).await.unwrap();
        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome, CopyOutcome { title: Some("tool_contracts.py".into()), copied: true });
        assert_eq!(backend.writes(), vec![panel.code().to_string()]);
        assert!(panel.is_copied());

        state.copy_finished(outcome);
        assert!(!state.status.is_error);
        assert_eq!(state.status.message.as_deref(), Some("Copied tool_contracts.py to clipboard"));
    }

    #[tokio::test]
    async fn rejected_copy_shows_error_in_status_line() {
        let mut state = state_on_lesson(ModuleId::A, 3);
        let panel = copy_effect(&mut state);
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_copy(panel.clone(), Arc::new(RejectingClipboard), tx).await.unwrap();
        let outcome = rx.recv().await.unwrap();
        assert!(!outcome.copied);
        assert!(!panel.is_copied());

        state.copy_finished(outcome);
        assert!(state.status.is_error);
        assert_eq!(
            state.status.message.as_deref(),
            Some("Could not copy simple_agent.py to clipboard")
        );
    }
}
