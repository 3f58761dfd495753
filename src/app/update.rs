use crate::app::Session;
use crate::app::command::Command;
use crate::app::model::{IoRequest, Mode, StatusLevel};
use crate::app::prompt::{PromptKind, PromptLine};
use crate::layout::{Direction, Orientation};

/// All possible events and actions in the viewer.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Cursor
    /// Move the cursor one byte (left/right) or one row (up/down), times the count
    MoveCursor(Direction),
    /// Grow or shrink the selection the same way
    ResizeExtent(Direction),
    /// Append a digit to the repeat count
    CountDigit(char),
    /// Switch the selection between the hex and char columns
    ToggleAxis,

    // Prompt
    /// Open an input line
    OpenPrompt(PromptKind),
    /// Insert a character at the prompt cursor
    PromptInsert(char),
    /// Delete character before cursor (Backspace)
    PromptDeleteBack,
    /// Delete character at cursor (Delete)
    PromptDeleteForward,
    PromptLeft,
    PromptRight,
    PromptHome,
    PromptEnd,
    /// Run the prompt line
    PromptSubmit,
    /// Leave the prompt without doing anything
    PromptCancel,

    // Windows
    /// Wait for a window letter
    StartGoto,
    /// Jump to the window with this letter
    GotoWindow(char),
    /// Enter split-management mode
    EnterWindowMode,
    /// Back to the normal keymap (window mode, goto)
    LeaveMode,
    /// Split the focused pane
    Split(Orientation),
    /// Close the focused pane
    ClosePane,
    /// Move focus to the neighbouring pane
    FocusMove(Direction),
    /// Flip the orientation of the focused pane's split
    ToggleOrientation,
    /// Put focus back on a pane
    FixFocus,

    // Help
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,

    // Terminal
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,

    // Application
    /// Quit the application
    Quit,
}

/// Pure function that updates the session based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Disk access requested by commands is queued and run by the event loop.
pub fn update(mut session: Session, msg: Message) -> Session {
    if !matches!(msg, Message::Resize(..) | Message::Redraw) {
        session.clear_status();
    }

    match msg {
        // Cursor
        Message::MoveCursor(direction) => {
            let delta = step(&session, direction).saturating_mul(signed(session.take_count()));
            session.move_cursor(delta);
        }
        Message::ResizeExtent(direction) => {
            let delta = step(&session, direction).saturating_mul(signed(session.take_count()));
            session.resize_extent(delta);
        }
        Message::CountDigit(digit) => session.push_count_digit(digit),
        Message::ToggleAxis => session.tree.focused_view_mut().toggle_axis(),

        // Prompt
        Message::OpenPrompt(kind) => {
            session.mode = Mode::Prompt(PromptLine::new(kind));
        }
        Message::PromptInsert(ch) => edit_prompt(&mut session, |line| line.insert_char(ch)),
        Message::PromptDeleteBack => edit_prompt(&mut session, |line| {
            line.delete_back();
        }),
        Message::PromptDeleteForward => edit_prompt(&mut session, |line| {
            line.delete_forward();
        }),
        Message::PromptLeft => edit_prompt(&mut session, PromptLine::move_left),
        Message::PromptRight => edit_prompt(&mut session, PromptLine::move_right),
        Message::PromptHome => edit_prompt(&mut session, PromptLine::move_home),
        Message::PromptEnd => edit_prompt(&mut session, PromptLine::move_end),
        Message::PromptSubmit => {
            if let Mode::Prompt(line) = std::mem::take(&mut session.mode) {
                submit_prompt(&mut session, &line);
            }
        }
        Message::PromptCancel => {
            session.mode = Mode::Normal;
        }

        // Windows
        Message::StartGoto => session.mode = Mode::GotoWindow,
        Message::GotoWindow(letter) => {
            session.mode = Mode::Normal;
            session.goto_window(letter);
        }
        Message::EnterWindowMode => session.mode = Mode::Window,
        Message::LeaveMode => session.mode = Mode::Normal,
        Message::Split(orientation) => session.split_focused(orientation),
        Message::ClosePane => session.close_focused(),
        Message::FocusMove(direction) => {
            session.tree.move_focus(direction);
        }
        Message::ToggleOrientation => {
            let focus = session.tree.focus();
            session.tree.toggle_orientation(focus);
        }
        Message::FixFocus => session.tree.fix_focus(),

        // Help
        Message::ToggleHelp => {
            session.help_visible = !session.help_visible;
        }
        Message::HideHelp => {
            session.help_visible = false;
        }

        // Resize/Redraw: the next frame lays everything out again
        Message::Resize(..) | Message::Redraw => {}

        Message::Quit => {
            session.should_quit = true;
        }
    }

    session
}

fn step(session: &Session, direction: Direction) -> isize {
    let columns = isize::try_from(session.tree.focused_view().columns()).unwrap_or(isize::MAX);
    match direction {
        Direction::Left => -1,
        Direction::Right => 1,
        Direction::Up => -columns,
        Direction::Down => columns,
    }
}

fn signed(count: usize) -> isize {
    isize::try_from(count).unwrap_or(isize::MAX)
}

fn edit_prompt(session: &mut Session, edit: impl FnOnce(&mut PromptLine)) {
    if let Mode::Prompt(line) = &mut session.mode {
        edit(line);
    }
}

fn submit_prompt(session: &mut Session, line: &PromptLine) {
    let tokens = line.tokens();
    if tokens.is_empty() {
        return;
    }
    match line.kind() {
        PromptKind::Command => run_command(session, &tokens),
        PromptKind::Read => {
            let repeat = session.take_count();
            session.read_values(&tokens, repeat);
        }
    }
}

fn run_command(session: &mut Session, tokens: &[String]) {
    let command = match Command::parse(tokens) {
        Ok(command) => command,
        Err(err) => {
            tracing::debug!(?tokens, %err, "command rejected");
            session.show_status(StatusLevel::Error, err.to_string());
            return;
        }
    };
    let count = session.take_count();
    let repeat = if command.repeats() { count } else { 1 };
    for _ in 0..repeat {
        match &command {
            Command::Quit => session.should_quit = true,
            Command::Columns(columns) => session.tree.focused_view_mut().set_columns(*columns),
            Command::HSplit => session.split_focused(Orientation::Horizontal),
            Command::VSplit => session.split_focused(Orientation::Vertical),
            Command::WClose => session.close_focused(),
            Command::Reload => session.io_request = Some(IoRequest::Reload),
            Command::Open(path) => session.io_request = Some(IoRequest::Open(path.clone())),
        }
        if session.should_quit {
            break;
        }
    }
}
