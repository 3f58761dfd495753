use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;

use crate::app::model::Mode;
use crate::app::prompt::PromptKind;
use crate::app::{App, Message, Session};
use crate::layout::{Direction, Orientation};

impl App {
    pub(super) fn handle_event(event: &Event, session: &Session) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                Self::handle_key(*key, session)
            }
            Event::Resize(w, h) => {
                crate::perf::log_event("event.resize", format!("width={w} height={h}"));
                Some(Message::Resize(*w, *h))
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, session: &Session) -> Option<Message> {
        if session.help_visible {
            return Some(Message::HideHelp);
        }

        match &session.mode {
            Mode::Prompt(_) => Self::handle_prompt_key(key),
            Mode::GotoWindow => Some(match key.code {
                KeyCode::Char(c) => Message::GotoWindow(c),
                _ => Message::LeaveMode,
            }),
            Mode::Window => Self::handle_window_key(key),
            Mode::Normal => Self::handle_normal_key(key),
        }
    }

    fn handle_prompt_key(key: KeyEvent) -> Option<Message> {
        match key.code {
            KeyCode::Esc => Some(Message::PromptCancel),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::PromptCancel)
            }
            KeyCode::Enter => Some(Message::PromptSubmit),
            KeyCode::Backspace => Some(Message::PromptDeleteBack),
            KeyCode::Delete => Some(Message::PromptDeleteForward),
            KeyCode::Left => Some(Message::PromptLeft),
            KeyCode::Right => Some(Message::PromptRight),
            KeyCode::Home => Some(Message::PromptHome),
            KeyCode::End => Some(Message::PromptEnd),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                Some(Message::PromptInsert(c))
            }
            _ => None,
        }
    }

    fn handle_window_key(key: KeyEvent) -> Option<Message> {
        if let Some(direction) = arrow(key.code) {
            return Some(Message::FocusMove(direction));
        }
        match key.code {
            KeyCode::Char('v') => Some(Message::Split(Orientation::Vertical)),
            KeyCode::Char('h') => Some(Message::Split(Orientation::Horizontal)),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('c') => Some(Message::ClosePane),
            KeyCode::Char('t') => Some(Message::ToggleOrientation),
            KeyCode::Char('f') => Some(Message::FixFocus),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Message::LeaveMode),
            _ => None,
        }
    }

    fn handle_normal_key(key: KeyEvent) -> Option<Message> {
        if let Some(direction) = arrow(key.code) {
            return Some(if key.modifiers.contains(KeyModifiers::SHIFT) {
                Message::ResizeExtent(direction)
            } else {
                Message::MoveCursor(direction)
            });
        }
        match key.code {
            // Count
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Message::CountDigit(c)),

            // Prompts
            KeyCode::Char(':') => Some(Message::OpenPrompt(PromptKind::Command)),
            KeyCode::Char('r') => Some(Message::OpenPrompt(PromptKind::Read)),

            // Windows
            KeyCode::Char('g') => Some(Message::StartGoto),
            KeyCode::Char('w') => Some(Message::EnterWindowMode),

            KeyCode::Tab => Some(Message::ToggleAxis),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            // Quit
            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            _ => None,
        }
    }

    pub(super) fn view(session: &mut Session, frame: &mut Frame) {
        crate::ui::render(session, frame);
    }
}

fn arrow(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}
