use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use crate::app::{Mode, Session};

use super::style::Theme;
use super::{hex, overlays, status};

/// Letter naming the `n`th pane in preorder, as used by goto-window.
pub fn window_letter(n: usize) -> char {
    u8::try_from(n)
        .ok()
        .filter(|&n| n < 26)
        .map_or('?', |n| char::from(b'a' + n))
}

/// Render the complete UI.
///
/// Scroll positions are settled here, once each pane's height is known.
pub fn render(session: &mut Session, frame: &mut Frame) {
    let _scope = crate::perf::scope("ui.render");
    let theme = Theme::default();
    let area = frame.area();

    let [main_area, buffer_bar, message_line] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let panes_area = if session.mode == Mode::Window {
        let outline_height = overlays::outline_height(&session.tree, main_area.height);
        let [panes_area, outline_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(outline_height),
        ])
        .areas(main_area);
        overlays::render_window_outline(session, frame, outline_area, &theme);
        panes_area
    } else {
        main_area
    };

    render_panes(session, frame, panes_area, &theme);
    status::render_buffer_bar(session, frame, buffer_bar, &theme);
    status::render_message_line(session, frame, message_line, &theme);

    if session.help_visible {
        overlays::render_help_overlay(session, frame, area);
    }
}

fn render_panes(session: &mut Session, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focus = session.tree.focus();
    let padding = session.settings.scroll_padding;
    let rects = session.tree.layout(area);
    crate::perf::log_event(
        "render.panes",
        format!("panes={} area={}x{}", rects.len(), area.width, area.height),
    );

    for (ordinal, (index, rect)) in rects.into_iter().enumerate() {
        let focused = index == focus;
        let Some(view) = session.tree.view_mut(index) else {
            continue;
        };
        let buffer = &session.buffers[view.buffer()];

        let block = Block::bordered()
            .title(format!(" id: {} ", window_letter(ordinal)))
            .title_bottom(Line::from(format!(" {} ", buffer.name())).right_aligned())
            .border_style(theme.border(focused));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        if inner.width < view.required_width() {
            let message = hex::too_narrow_lines(view.required_width(), inner.width);
            frame.render_widget(Paragraph::new(message), inner);
            continue;
        }

        view.scroll_to_keep_cursor_visible(inner.height, padding);

        let data_rows = usize::from(inner.height.saturating_sub(1));
        let mut lines = Vec::with_capacity(data_rows + 1);
        lines.push(hex::header_line(view.columns(), theme));
        lines.extend(
            (view.scroll()..view.scroll() + data_rows)
                .map(|row| hex::data_line(buffer, view, row, focused, theme)),
        );
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

