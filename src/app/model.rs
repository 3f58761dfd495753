use std::path::{Path, PathBuf};

use crate::buffer::ByteBuffer;
use crate::catalog::{self, Endian};
use crate::config::DEFAULT_SCROLL_PADDING;
use crate::layout::{CloseOutcome, LayoutTree, Orientation};
use crate::pane::{DEFAULT_COLUMNS, PaneView};

use super::prompt::PromptLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Transient message on the bottom line, cleared by the next key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub text: String,
}

/// Which keymap is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Editing a `:` or `read:` line.
    Prompt(PromptLine),
    /// `g` was pressed; the next letter picks a window.
    GotoWindow,
    /// Split management (`w`).
    Window,
}

/// User-tunable knobs that apply to every pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub scroll_padding: u16,
    pub columns: u16,
    pub endian: Endian,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scroll_padding: DEFAULT_SCROLL_PADDING,
            columns: DEFAULT_COLUMNS,
            endian: Endian::Little,
        }
    }
}

/// Disk work requested by a command, carried out after `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IoRequest {
    Open(PathBuf),
    Reload,
}

/// The complete viewer state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Session {
    /// Pane layout and focus
    pub tree: LayoutTree,
    /// Every loaded buffer; panes refer to them by index
    pub buffers: Vec<ByteBuffer>,
    /// Repeat-count digits typed so far
    pub(super) count: String,
    status: Option<Status>,
    /// Active keymap
    pub mode: Mode,
    /// Whether help overlay is visible
    pub help_visible: bool,
    pub settings: Settings,
    /// Global config path shown in help
    pub config_global_path: Option<PathBuf>,
    /// Local override path shown in help
    pub config_local_path: Option<PathBuf>,
    pub(super) io_request: Option<IoRequest>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl Session {
    /// Build a session over `buffers`. No buffers means one empty scratch
    /// buffer; several buffers are tiled one pane each.
    pub fn new(mut buffers: Vec<ByteBuffer>, settings: Settings) -> Self {
        if buffers.is_empty() {
            buffers.push(ByteBuffer::scratch());
        }
        let tree = LayoutTree::tiled(buffers.len(), settings.columns);
        Self {
            tree,
            buffers,
            count: String::new(),
            status: None,
            mode: Mode::Normal,
            help_visible: false,
            settings,
            config_global_path: None,
            config_local_path: None,
            io_request: None,
            should_quit: false,
        }
    }

    /// Pending repeat count as typed, for the buffer bar.
    pub fn pending_count(&self) -> &str {
        &self.count
    }

    pub(super) fn push_count_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() {
            self.count.push(digit);
        }
    }

    /// Consume the pending repeat count. Empty, zero or unparsable counts
    /// mean 1.
    pub fn take_count(&mut self) -> usize {
        let count = self.count.parse::<usize>().ok().filter(|&n| n > 0);
        self.count.clear();
        count.unwrap_or(1)
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub(super) fn show_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(Status {
            level,
            text: text.into(),
        });
    }

    pub(super) fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn focused_buffer(&self) -> &ByteBuffer {
        &self.buffers[self.tree.focused_view().buffer()]
    }

    pub fn buffer_of(&self, view: &PaneView) -> &ByteBuffer {
        &self.buffers[view.buffer()]
    }

    /// Move the focused cursor by `delta` bytes.
    pub(super) fn move_cursor(&mut self, delta: isize) {
        let len = self.focused_buffer().len();
        self.tree.focused_view_mut().move_cursor(delta, len);
    }

    /// Grow or shrink the focused selection by `delta` bytes.
    pub(super) fn resize_extent(&mut self, delta: isize) {
        let len = self.focused_buffer().len();
        self.tree.focused_view_mut().resize_extent(delta, len);
    }

    /// Split the focused pane. The new pane views buffer 0.
    pub(super) fn split_focused(&mut self, orientation: Orientation) {
        let focus = self.tree.focus();
        let created = self.tree.split(focus, orientation, self.settings.columns);
        tracing::debug!(?orientation, at = focus, created, "split pane");
    }

    /// Close the focused pane, quitting when it is the last one.
    pub(super) fn close_focused(&mut self) {
        let focus = self.tree.focus();
        match self.tree.close(focus) {
            CloseOutcome::Closed => tracing::debug!(at = focus, "closed pane"),
            CloseOutcome::LastPane => {
                tracing::debug!("closed last pane");
                self.should_quit = true;
            }
        }
    }

    /// Focus the window named by `letter` (`a` is the first pane in
    /// preorder). Anything but a lowercase letter is ignored.
    pub fn goto_window(&mut self, letter: char) {
        if !letter.is_ascii_lowercase() {
            return;
        }
        let ordinal = usize::from(letter as u8 - b'a');
        if self.tree.focus_pane(ordinal) {
            self.show_status(StatusLevel::Info, format!("Switching to window {letter}"));
        } else {
            self.show_status(
                StatusLevel::Error,
                format!("Window {letter} does not exist"),
            );
        }
    }

    /// Decode `names` at the focused cursor, `repeat` times.
    pub(super) fn read_values(&mut self, names: &[String], repeat: usize) {
        let view = self.tree.focused_view_mut();
        let bytes = self.buffers[view.buffer()].bytes();
        match catalog::read(view, bytes, names, repeat, self.settings.endian) {
            Ok(report) => self.show_status(StatusLevel::Info, report.to_string()),
            Err(err) => {
                tracing::debug!(%err, "read rejected");
                self.show_status(StatusLevel::Error, err.to_string());
            }
        }
    }

    /// Bind the focused pane to the buffer at `path`, loading it unless a
    /// buffer with the same path is already open. The pane starts over at
    /// offset 0.
    pub fn open(&mut self, path: &Path) {
        let index = if let Some(index) = self.buffers.iter().position(|b| b.path() == path) {
            index
        } else {
            let (buffer, err) = ByteBuffer::load_lossy(path);
            if let Some(err) = err {
                crate::perf::log_event("open.error", format!("path={} err={err:#}", path.display()));
                self.show_status(StatusLevel::Warning, format!("{err:#}"));
            }
            self.buffers.push(buffer);
            self.buffers.len() - 1
        };
        tracing::debug!(path = %path.display(), buffer = index, "opened buffer");
        *self.tree.focused_view_mut() = PaneView::new(index, self.settings.columns);
    }

    /// Re-read the focused pane's buffer from disk and re-clamp every pane
    /// that shows it.
    pub fn reload(&mut self) {
        let index = self.tree.focused_view().buffer();
        let buffer = &mut self.buffers[index];
        let result = buffer.reload();
        let len = buffer.len();
        match result {
            Ok(()) => {
                tracing::debug!(path = %buffer.path().display(), len, "reloaded buffer");
                self.show_status(StatusLevel::Info, "Reloaded");
            }
            Err(err) => {
                crate::perf::log_event("reload.error", format!("buffer={index} err={err:#}"));
                self.show_status(StatusLevel::Warning, format!("{err:#}"));
            }
        }
        for view in self.tree.views_mut().filter(|v| v.buffer() == index) {
            view.clamp_to(len);
        }
    }

    /// Carry out the disk work queued by the last command, if any.
    pub fn run_io_request(&mut self) {
        match self.io_request.take() {
            Some(IoRequest::Open(path)) => self.open(&path),
            Some(IoRequest::Reload) => self.reload(),
            None => {}
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Vec::new(), Settings::default())
    }
}
