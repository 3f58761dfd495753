//! Text rows of a hex pane.
//!
//! A data row is laid out as
//!
//! ```text
//! 000010 48 65 6c 6c 6f 00 ff 20 | Hello..
//! ```
//!
//! (offset, one hex group per column, then one char per column)
//!
//! which is `4 * columns + 9` cells wide; see [`PaneView::required_width`].

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::buffer::ByteBuffer;
use crate::pane::{FocusAxis, PaneView};

use super::style::Theme;

const SEPARATOR: &str = " | ";
const PLACEHOLDER: char = '.';

/// Column indices above the data rows.
pub fn header_line(columns: u16, theme: &Theme) -> Line<'static> {
    let mut text = String::from("      ");
    for column in 0..columns {
        text.push_str(&format!(" {:02x}", column % 256));
    }
    text.push_str(SEPARATOR);
    for column in 0..columns {
        text.push_str(&format!("{:x}", column % 16));
    }
    Line::styled(text, theme.dim)
}

/// Data row `row` of `buffer` as seen through `view`. Rows past the end of
/// the buffer are blank.
pub fn data_line(
    buffer: &ByteBuffer,
    view: &PaneView,
    row: usize,
    focused: bool,
    theme: &Theme,
) -> Line<'static> {
    let columns = usize::from(view.columns());
    let offset = row.saturating_mul(columns);
    if offset >= buffer.len() {
        return Line::default();
    }
    let bytes = buffer.slice(offset, columns);
    let hex_active = focused && view.axis() == FocusAxis::Hex;
    let char_active = focused && view.axis() == FocusAxis::Char;

    let mut spans = Vec::with_capacity(columns * 3 + 3);
    spans.push(Span::styled(format!("{offset:06x}"), theme.dim));
    for i in 0..columns {
        spans.push(Span::raw(" "));
        let Some(&byte) = bytes.get(i) else {
            spans.push(Span::raw("  "));
            continue;
        };
        let base = if byte == 0 {
            theme.dim
        } else {
            Style::default()
        };
        let style = if view.is_selected(offset + i) {
            base.patch(theme.selection(hex_active))
        } else {
            base
        };
        spans.push(Span::styled(format!("{byte:02x}"), style));
    }
    spans.push(Span::styled(SEPARATOR, theme.dim));
    for (i, &byte) in bytes.iter().enumerate() {
        let (glyph, base) = if (32..=126).contains(&byte) {
            (char::from(byte), Style::default())
        } else {
            (PLACEHOLDER, theme.dim)
        };
        let style = if view.is_selected(offset + i) {
            base.patch(theme.selection(char_active))
        } else {
            base
        };
        spans.push(Span::styled(glyph.to_string(), style));
    }
    Line::from(spans)
}

/// Shown instead of the rows when the pane cannot fit one full row.
pub fn too_narrow_lines(required: u16, available: u16) -> Vec<Line<'static>> {
    vec![
        Line::raw("Window isn't wide enough"),
        Line::raw(format!("Needs {required}, but has {available}")),
    ]
}
