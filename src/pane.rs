//! Per-pane view state.
//!
//! A [`PaneView`] tracks where the user is inside one byte buffer: the
//! cursor, the length of the selected run, the first visible row and the
//! number of bytes per row.
//!
//! # Example
//!
//! ```
//! use hexpane::pane::PaneView;
//!
//! let mut view = PaneView::new(0, 16);
//! view.move_cursor(40, 64);
//! assert_eq!(view.cursor(), 40);
//! assert_eq!(view.row_of(view.cursor()), 2);
//!
//! view.move_cursor(1000, 64);
//! assert_eq!(view.cursor(), 63);
//! ```

/// Bytes per row for panes created without an explicit width.
pub const DEFAULT_COLUMNS: u16 = 16;

/// Which half of the pane the selection is driven from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusAxis {
    #[default]
    Hex,
    Char,
}

/// Cursor, selection and scroll state of one pane.
///
/// Invariants, for a buffer of length `len > 0`:
/// - `cursor < len`
/// - `cursor + extent <= len`
/// - `extent >= 1`
/// - `columns >= 1`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneView {
    buffer: usize,
    cursor: usize,
    extent: usize,
    scroll: usize,
    columns: u16,
    axis: FocusAxis,
}

impl PaneView {
    /// Create a view of buffer `buffer` with the cursor at the start.
    pub fn new(buffer: usize, columns: u16) -> Self {
        Self {
            buffer,
            cursor: 0,
            extent: 1,
            scroll: 0,
            columns: columns.max(1),
            axis: FocusAxis::Hex,
        }
    }

    /// Index of the buffer this view reads from.
    pub const fn buffer(&self) -> usize {
        self.buffer
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the selected run starting at the cursor.
    pub const fn extent(&self) -> usize {
        self.extent
    }

    /// First visible row.
    pub const fn scroll(&self) -> usize {
        self.scroll
    }

    pub const fn columns(&self) -> u16 {
        self.columns
    }

    pub const fn axis(&self) -> FocusAxis {
        self.axis
    }

    /// Row that byte `offset` lives on.
    pub const fn row_of(&self, offset: usize) -> usize {
        offset / self.columns as usize
    }

    /// Whether `offset` is inside the selection.
    pub const fn is_selected(&self, offset: usize) -> bool {
        offset >= self.cursor && offset < self.cursor + self.extent
    }

    /// Minimum pane width able to show one full row.
    ///
    /// Offset gutter (7) + `xx ` groups + ` | ` + one character per byte.
    pub const fn required_width(&self) -> u16 {
        self.columns.saturating_mul(4).saturating_add(9)
    }

    /// Move the cursor by `delta` bytes, clamped to `[0, len - extent]`.
    pub fn move_cursor(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(self.extent);
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    /// Grow or shrink the selection, clamped to `[1, len - cursor]`.
    pub fn resize_extent(&mut self, delta: isize, len: usize) {
        let max = len.saturating_sub(self.cursor).max(1);
        self.extent = self.extent.saturating_add_signed(delta).clamp(1, max);
    }

    /// Place the cursor and selection directly, then clamp.
    pub fn select(&mut self, cursor: usize, extent: usize, len: usize) {
        self.cursor = cursor;
        self.extent = extent.max(1);
        self.clamp_to(len);
    }

    /// Re-establish the invariants after the buffer changed length.
    pub fn clamp_to(&mut self, len: usize) {
        self.extent = self.extent.clamp(1, len.max(1));
        self.cursor = self.cursor.min(len.saturating_sub(self.extent));
    }

    /// Change the row width. Zero is ignored.
    pub fn set_columns(&mut self, columns: u16) {
        if columns > 0 {
            self.columns = columns;
        }
    }

    pub fn toggle_axis(&mut self) {
        self.axis = match self.axis {
            FocusAxis::Hex => FocusAxis::Char,
            FocusAxis::Char => FocusAxis::Hex,
        };
    }

    /// Scroll by the smallest amount that keeps the cursor row inside the
    /// window, leaving `padding` rows of context where the height allows.
    ///
    /// The window covers rows `scroll ..= scroll + viewport_height - 2`; the
    /// row below that belongs to the column header of the pane.
    pub fn scroll_to_keep_cursor_visible(&mut self, viewport_height: u16, padding: u16) {
        if viewport_height == 0 {
            return;
        }
        let height = i64::from(viewport_height);
        let padding = i64::from(padding.min((viewport_height - 1) / 2));
        let row = i64::try_from(self.row_of(self.cursor)).unwrap_or(i64::MAX);
        let mut scroll = i64::try_from(self.scroll).unwrap_or(i64::MAX);

        let below = height - 2 - padding;
        if row > scroll + below {
            scroll = row - below;
        }
        if row < scroll + padding && scroll > 0 {
            scroll = (row - padding).max(0);
        }
        self.scroll = usize::try_from(scroll.max(0)).unwrap_or(0);
    }
}
