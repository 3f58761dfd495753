use std::path::PathBuf;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tempfile::tempdir;

use crate::buffer::ByteBuffer;
use crate::layout::{Direction, Node, Orientation};
use crate::pane::FocusAxis;

use super::{App, IoRequest, Message, Mode, PromptKind, Session, Settings, StatusLevel, update};

fn create_test_session(bytes: Vec<u8>) -> Session {
    Session::new(
        vec![ByteBuffer::from_bytes("data.bin", bytes)],
        Settings::default(),
    )
}

fn create_multi_session(count: usize) -> Session {
    let buffers = (0..count)
        .map(|i| ByteBuffer::from_bytes(format!("file{i}.bin"), vec![0; 64]))
        .collect();
    Session::new(buffers, Settings::default())
}

fn send(session: Session, msgs: impl IntoIterator<Item = Message>) -> Session {
    msgs.into_iter().fold(session, update)
}

fn with_count(session: Session, digits: &str) -> Session {
    send(session, digits.chars().map(Message::CountDigit))
}

fn submit(session: Session, kind: PromptKind, text: &str) -> Session {
    let session = update(session, Message::OpenPrompt(kind));
    let session = send(session, text.chars().map(Message::PromptInsert));
    update(session, Message::PromptSubmit)
}

fn status_text(session: &Session) -> Option<&str> {
    session.status().map(|status| status.text.as_str())
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_new_session_without_files_has_scratch_pane() {
    let session = Session::new(Vec::new(), Settings::default());
    assert_eq!(session.buffers.len(), 1);
    assert!(session.buffers[0].is_empty());
    assert_eq!(session.tree.len(), 1);
    assert_eq!(session.focused_buffer().name(), "[scratch]");
}

#[test]
fn test_new_session_tiles_multiple_files() {
    let session = create_multi_session(3);
    assert_eq!(session.tree.pane_indices().len(), 3);
    assert_eq!(session.tree.focused_view().buffer(), 0);
}

#[test]
fn test_move_cursor_uses_repeat_count() {
    let session = create_test_session(vec![0; 256]);
    let session = with_count(session, "3");
    let session = update(session, Message::MoveCursor(Direction::Right));
    assert_eq!(session.tree.focused_view().cursor(), 3);
    assert_eq!(session.pending_count(), "");
}

#[test]
fn test_vertical_moves_step_by_columns() {
    let session = create_test_session(vec![0; 256]);
    let session = update(session, Message::MoveCursor(Direction::Down));
    assert_eq!(session.tree.focused_view().cursor(), 16);

    let session = with_count(session, "2");
    let session = update(session, Message::MoveCursor(Direction::Down));
    assert_eq!(session.tree.focused_view().cursor(), 48);

    let session = update(session, Message::MoveCursor(Direction::Up));
    assert_eq!(session.tree.focused_view().cursor(), 32);
}

#[test]
fn test_cursor_clamps_at_both_ends() {
    let session = create_test_session(vec![0; 20]);
    let session = update(session, Message::MoveCursor(Direction::Up));
    assert_eq!(session.tree.focused_view().cursor(), 0);

    let session = with_count(session, "99");
    let session = update(session, Message::MoveCursor(Direction::Right));
    assert_eq!(session.tree.focused_view().cursor(), 19);
}

#[test]
fn test_resize_extent_with_shift_arrows() {
    let session = create_test_session(vec![0; 256]);
    let session = with_count(session, "4");
    let session = update(session, Message::ResizeExtent(Direction::Right));
    assert_eq!(session.tree.focused_view().extent(), 5);

    let session = update(session, Message::ResizeExtent(Direction::Down));
    assert_eq!(session.tree.focused_view().extent(), 21);

    let session = update(session, Message::ResizeExtent(Direction::Left));
    assert_eq!(session.tree.focused_view().extent(), 20);
}

#[test]
fn test_take_count_defaults_to_one() {
    let mut session = create_test_session(vec![0; 8]);
    assert_eq!(session.take_count(), 1);

    session.push_count_digit('0');
    assert_eq!(session.take_count(), 1);

    session.push_count_digit('0');
    session.push_count_digit('7');
    assert_eq!(session.take_count(), 7);
    assert_eq!(session.pending_count(), "");
}

#[test]
fn test_status_is_cleared_by_next_key() {
    let session = create_test_session(vec![0; 8]);
    let session = send(session, [Message::StartGoto, Message::GotoWindow('z')]);
    assert_eq!(status_text(&session), Some("Window z does not exist"));

    let session = update(session, Message::MoveCursor(Direction::Right));
    assert_eq!(session.status(), None);
}

#[test]
fn test_status_survives_resize() {
    let session = create_test_session(vec![0; 8]);
    let session = send(session, [Message::StartGoto, Message::GotoWindow('z')]);
    let session = update(session, Message::Resize(100, 40));
    assert!(session.status().is_some());
}

#[test]
fn test_goto_window_with_two_panes() {
    let session = create_multi_session(2);
    let panes = session.tree.pane_indices();

    let session = send(session, [Message::StartGoto, Message::GotoWindow('b')]);
    assert_eq!(session.tree.focus(), panes[1]);
    assert_eq!(status_text(&session), Some("Switching to window b"));
    assert_eq!(session.status().map(|s| s.level), Some(StatusLevel::Info));
    assert_eq!(session.mode, Mode::Normal);

    let session = send(session, [Message::StartGoto, Message::GotoWindow('c')]);
    assert_eq!(session.tree.focus(), panes[1]);
    assert_eq!(status_text(&session), Some("Window c does not exist"));
    assert_eq!(session.status().map(|s| s.level), Some(StatusLevel::Error));
}

#[test]
fn test_goto_window_ignores_non_letters() {
    let session = create_multi_session(2);
    let focus = session.tree.focus();
    let session = send(session, [Message::StartGoto, Message::GotoWindow('1')]);
    assert_eq!(session.tree.focus(), focus);
    assert_eq!(session.status(), None);
    assert_eq!(session.mode, Mode::Normal);
}

#[test]
fn test_read_prompt_decodes_with_count() {
    let session = create_test_session(vec![1, 2, 3, 4]);
    let session = with_count(session, "3");
    let session = submit(session, PromptKind::Read, "u8");
    assert_eq!(status_text(&session), Some("1; 2; 3"));
    assert_eq!(session.tree.focused_view().cursor(), 3);
    assert_eq!(session.tree.focused_view().extent(), 1);
    assert_eq!(session.pending_count(), "");
}

#[test]
fn test_read_prompt_reports_unknown_type_without_moving() {
    let session = create_test_session(vec![1, 2, 3, 4]);
    let session = submit(session, PromptKind::Read, "u8 q32");
    assert_eq!(status_text(&session), Some("No such data type: q32"));
    assert_eq!(session.tree.focused_view().cursor(), 0);
}

#[test]
fn test_read_prompt_reports_eof() {
    let session = create_test_session(vec![1, 2, 3, 4]);
    let session = with_count(session, "3");
    let session = update(session, Message::MoveCursor(Direction::Right));
    assert_eq!(session.tree.focused_view().cursor(), 3);
    let session = submit(session, PromptKind::Read, "u16");
    assert_eq!(status_text(&session), Some("EOF"));
    assert_eq!(session.tree.focused_view().cursor(), 3);
}

#[test]
fn test_unknown_command_reports_status() {
    let session = create_test_session(vec![0; 8]);
    let session = submit(session, PromptKind::Command, "frob");
    assert_eq!(status_text(&session), Some("Command does not exist"));
    assert_eq!(session.mode, Mode::Normal);
}

#[test]
fn test_columns_command() {
    let session = create_test_session(vec![0; 64]);
    let session = submit(session, PromptKind::Command, "c 8");
    assert_eq!(session.tree.focused_view().columns(), 8);

    let session = submit(session, PromptKind::Command, "columns 0");
    assert_eq!(status_text(&session), Some("Invalid argument"));
    assert_eq!(session.tree.focused_view().columns(), 8);

    let session = submit(session, PromptKind::Command, "columns");
    assert_eq!(status_text(&session), Some("Expected 1 argument, got 0"));
}

#[test]
fn test_hsplit_repeats_with_count() {
    let session = create_test_session(vec![0; 64]);
    let session = with_count(session, "3");
    let session = submit(session, PromptKind::Command, "hs");
    assert_eq!(session.tree.pane_indices().len(), 4);
    assert_eq!(session.tree.len(), 7);
    assert!(session.tree.nodes()[0] == Node::Split(Orientation::Horizontal));
    assert_eq!(session.pending_count(), "");
}

#[test]
fn test_columns_consumes_count_without_repeating() {
    let session = create_test_session(vec![0; 64]);
    let session = with_count(session, "5");
    let session = submit(session, PromptKind::Command, "c 4");
    assert_eq!(session.tree.focused_view().columns(), 4);
    assert_eq!(session.pending_count(), "");
}

#[test]
fn test_wclose_on_last_pane_quits() {
    let session = create_test_session(vec![0; 8]);
    let session = submit(session, PromptKind::Command, "wc");
    assert!(session.should_quit);
}

#[test]
fn test_wclose_repeats_with_count() {
    let session = create_multi_session(3);
    let session = with_count(session, "2");
    let session = submit(session, PromptKind::Command, "wclose");
    assert!(!session.should_quit);
    assert_eq!(session.tree.len(), 1);
    assert_eq!(session.tree.focused_view().buffer(), 2);
}

#[test]
fn test_quit_command_sets_should_quit() {
    let session = create_test_session(vec![0; 8]);
    let session = submit(session, PromptKind::Command, "quit");
    assert!(session.should_quit);
}

#[test]
fn test_quit_sets_should_quit() {
    let session = create_test_session(vec![0; 8]);
    let session = update(session, Message::Quit);
    assert!(session.should_quit);
}

#[test]
fn test_prompt_cancel_has_no_effect() {
    let session = create_test_session(vec![0; 8]);
    let session = with_count(session, "5");
    let session = update(session, Message::OpenPrompt(PromptKind::Command));
    let session = update(session, Message::PromptInsert('q'));
    let session = update(session, Message::PromptCancel);
    assert!(!session.should_quit);
    assert_eq!(session.mode, Mode::Normal);
    assert_eq!(session.pending_count(), "5");
}

#[test]
fn test_empty_prompt_submission_is_a_cancel() {
    let session = create_test_session(vec![0; 8]);
    let session = submit(session, PromptKind::Command, "   ");
    assert_eq!(session.mode, Mode::Normal);
    assert_eq!(session.status(), None);
}

#[test]
fn test_prompt_line_editing() {
    let session = create_test_session(vec![0; 8]);
    let session = update(session, Message::OpenPrompt(PromptKind::Command));
    let session = send(
        session,
        [
            Message::PromptInsert('q'),
            Message::PromptInsert('x'),
            Message::PromptLeft,
            Message::PromptDeleteForward,
        ],
    );
    let Mode::Prompt(line) = &session.mode else {
        panic!("expected prompt mode");
    };
    assert_eq!(line.text(), "q");
    assert_eq!(line.kind(), PromptKind::Command);
}

#[test]
fn test_open_command_queues_and_runs_io() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("other.bin");
    std::fs::write(&path, [9, 8, 7]).unwrap();

    let session = create_test_session(vec![0; 64]);
    let session = update(session, Message::MoveCursor(Direction::Right));
    let mut session = submit(session, PromptKind::Command, &format!("o {}", path.display()));
    assert_eq!(session.io_request, Some(IoRequest::Open(path.clone())));
    assert_eq!(session.buffers.len(), 1, "update must not touch the disk");

    App::handle_message_side_effects(&mut session, &Message::PromptSubmit);
    assert_eq!(session.io_request, None);
    assert_eq!(session.buffers.len(), 2);
    assert_eq!(session.tree.focused_view().buffer(), 1);
    assert_eq!(session.tree.focused_view().cursor(), 0);
    assert_eq!(session.focused_buffer().bytes(), &[9, 8, 7]);
}

#[test]
fn test_open_reuses_loaded_buffer() {
    let mut session = create_multi_session(2);
    session.open(&PathBuf::from("file1.bin"));
    assert_eq!(session.buffers.len(), 2);
    assert_eq!(session.tree.focused_view().buffer(), 1);
}

#[test]
fn test_open_missing_file_warns_and_opens_empty() {
    let dir = tempdir().unwrap();
    let mut session = create_test_session(vec![0; 8]);
    session.open(&dir.path().join("missing.bin"));
    assert_eq!(session.buffers.len(), 2);
    assert!(session.focused_buffer().is_empty());
    assert_eq!(
        session.status().map(|s| s.level),
        Some(StatusLevel::Warning)
    );
}

#[test]
fn test_reload_reclamps_every_pane_on_the_buffer() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data.bin");
    std::fs::write(&path, [1, 2, 3, 4, 5, 6]).unwrap();

    let buffer = ByteBuffer::load(&path).unwrap();
    let session = Session::new(vec![buffer], Settings::default());
    let session = with_count(session, "5");
    let session = update(session, Message::MoveCursor(Direction::Right));
    let session = update(session, Message::Split(Orientation::Vertical));
    let session = with_count(session, "4");
    let session = update(session, Message::MoveCursor(Direction::Right));

    std::fs::write(&path, [1, 2]).unwrap();
    let mut session = submit(session, PromptKind::Command, "rl");
    App::handle_message_side_effects(&mut session, &Message::PromptSubmit);

    assert_eq!(status_text(&session), Some("Reloaded"));
    assert_eq!(session.focused_buffer().len(), 2);
    for index in session.tree.pane_indices() {
        let view = session.tree.view(index).unwrap();
        assert_eq!(view.cursor(), 1);
        assert_eq!(view.extent(), 1);
    }
}

#[test]
fn test_window_mode_flow() {
    let session = create_test_session(vec![0; 64]);
    let session = send(
        session,
        [
            Message::EnterWindowMode,
            Message::Split(Orientation::Vertical),
            Message::FocusMove(Direction::Left),
        ],
    );
    assert_eq!(session.mode, Mode::Window);
    assert_eq!(session.tree.focus(), 1);

    let session = update(session, Message::ToggleOrientation);
    assert!(session.tree.nodes()[0] == Node::Split(Orientation::Horizontal));

    let session = send(session, [Message::ClosePane, Message::LeaveMode]);
    assert_eq!(session.tree.len(), 1);
    assert_eq!(session.mode, Mode::Normal);
    assert!(!session.should_quit);
}

#[test]
fn test_toggle_axis() {
    let session = create_test_session(vec![0; 8]);
    let session = update(session, Message::ToggleAxis);
    assert_eq!(session.tree.focused_view().axis(), FocusAxis::Char);
    let session = update(session, Message::ToggleAxis);
    assert_eq!(session.tree.focused_view().axis(), FocusAxis::Hex);
}

#[test]
fn test_toggle_help_changes_visibility() {
    let session = create_test_session(vec![0; 8]);
    let session = update(session, Message::ToggleHelp);
    assert!(session.help_visible);
    let session = update(session, Message::HideHelp);
    assert!(!session.help_visible);
}

#[test]
fn test_normal_keymap() {
    let session = create_test_session(vec![0; 8]);
    assert_eq!(
        App::handle_key(key(KeyCode::Right), &session),
        Some(Message::MoveCursor(Direction::Right))
    );
    assert_eq!(
        App::handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::SHIFT), &session),
        Some(Message::ResizeExtent(Direction::Left))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('7')), &session),
        Some(Message::CountDigit('7'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char(':')), &session),
        Some(Message::OpenPrompt(PromptKind::Command))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('r')), &session),
        Some(Message::OpenPrompt(PromptKind::Read))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('g')), &session),
        Some(Message::StartGoto)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('w')), &session),
        Some(Message::EnterWindowMode)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Tab), &session),
        Some(Message::ToggleAxis)
    );
    assert_eq!(
        App::handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &session),
        Some(Message::Quit)
    );
    assert_eq!(App::handle_key(key(KeyCode::Char('x')), &session), None);
}

#[test]
fn test_window_keymap() {
    let session = update(create_test_session(vec![0; 8]), Message::EnterWindowMode);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('v')), &session),
        Some(Message::Split(Orientation::Vertical))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('h')), &session),
        Some(Message::Split(Orientation::Horizontal))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('c')), &session),
        Some(Message::ClosePane)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Down), &session),
        Some(Message::FocusMove(Direction::Down))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('t')), &session),
        Some(Message::ToggleOrientation)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('f')), &session),
        Some(Message::FixFocus)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &session),
        Some(Message::LeaveMode)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &session),
        Some(Message::LeaveMode)
    );
}

#[test]
fn test_prompt_and_goto_keymaps() {
    let session = update(
        create_test_session(vec![0; 8]),
        Message::OpenPrompt(PromptKind::Read),
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &session),
        Some(Message::PromptInsert('q'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &session),
        Some(Message::PromptCancel)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &session),
        Some(Message::PromptSubmit)
    );

    let session = update(create_test_session(vec![0; 8]), Message::StartGoto);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('b')), &session),
        Some(Message::GotoWindow('b'))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &session),
        Some(Message::LeaveMode)
    );
}

#[test]
fn test_any_key_hides_help() {
    let session = update(create_test_session(vec![0; 8]), Message::ToggleHelp);
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &session),
        Some(Message::HideHelp)
    );
}

#[test]
fn test_key_release_events_are_ignored() {
    let session = create_test_session(vec![0; 8]);
    let release = KeyEvent::new_with_kind(KeyCode::Right, KeyModifiers::NONE, KeyEventKind::Release);
    assert_eq!(App::handle_event(&Event::Key(release), &session), None);
    assert_eq!(
        App::handle_event(&Event::Resize(120, 40), &session),
        Some(Message::Resize(120, 40))
    );
}
