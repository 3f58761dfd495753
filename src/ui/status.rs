use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::app::{Mode, Session, StatusLevel};

use super::style::Theme;

/// Open buffers, the focused pane's one highlighted, and the pending count.
pub fn render_buffer_bar(session: &Session, frame: &mut Frame, area: Rect, theme: &Theme) {
    let current = session.tree.focused_view().buffer();
    let bar_style = theme.status_bar();

    let mut spans: Vec<Span> = session
        .buffers
        .iter()
        .enumerate()
        .map(|(i, buffer)| {
            let label = format!(" {} ", buffer.name());
            if i == current {
                Span::styled(label, bar_style.add_modifier(Modifier::REVERSED | Modifier::BOLD))
            } else {
                Span::styled(label, bar_style)
            }
        })
        .collect();

    let view = session.tree.focused_view();
    let right = format!(
        "{}  0x{:x}+{}  ?:help ",
        session.pending_count(),
        view.cursor(),
        view.extent()
    );
    let used: usize = spans.iter().map(Span::width).sum();
    let gap = usize::from(area.width).saturating_sub(used + right.width());
    spans.push(Span::styled(" ".repeat(gap), bar_style));
    spans.push(Span::styled(right, bar_style));

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bar_style), area);
}

/// Bottom line: the prompt being edited, the mode hint, or the last status.
pub fn render_message_line(session: &Session, frame: &mut Frame, area: Rect, theme: &Theme) {
    match &session.mode {
        Mode::Prompt(line) => {
            let label = line.kind().label();
            frame.render_widget(Paragraph::new(format!("{label}{}", line.text())), area);
            let column = label.width() + line.cursor_column();
            let x = area
                .x
                .saturating_add(u16::try_from(column).unwrap_or(u16::MAX))
                .min(area.right().saturating_sub(1));
            frame.set_cursor_position((x, area.y));
        }
        Mode::GotoWindow => {
            frame.render_widget(Paragraph::new("Switching to window:"), area);
        }
        Mode::Window => {
            let hint = "-- WINDOW --  v/h split  c close  arrows focus  t toggle  f fix  q leave";
            frame.render_widget(Paragraph::new(Line::styled(hint, theme.dim)), area);
        }
        Mode::Normal => render_status(session, frame, area),
    }
}

fn render_status(session: &Session, frame: &mut Frame, area: Rect) {
    let Some(status) = session.status() else {
        return;
    };
    let (prefix, style) = match status.level {
        StatusLevel::Info => ("[info]", Style::default()),
        StatusLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        StatusLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let text = Paragraph::new(format!("{} {}", prefix, status.text)).style(style);
    frame.render_widget(text, area);
}
