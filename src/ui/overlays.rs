use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Session;
use crate::layout::{LayoutTree, Node};

use super::render::window_letter;
use super::style::Theme;

/// Rows taken by the window-mode outline: one per node plus borders, but
/// never more than half of `available`.
pub fn outline_height(tree: &LayoutTree, available: u16) -> u16 {
    let wanted = u16::try_from(tree.len()).unwrap_or(u16::MAX).saturating_add(2);
    wanted.min(available / 2)
}

/// Indented listing of the layout tree, one node per line.
pub fn outline_lines(session: &Session) -> Vec<String> {
    let tree = &session.tree;
    let mut ordinal = 0;
    tree.nodes()
        .iter()
        .zip(tree.depths())
        .enumerate()
        .map(|(i, (node, depth))| {
            let marker = if i == tree.focus() { ">" } else { " " };
            let indent = "  ".repeat(depth);
            let label = match node {
                Node::Split(orientation) => orientation.label().to_string(),
                Node::Pane(view) => {
                    let letter = window_letter(ordinal);
                    ordinal += 1;
                    format!("{letter}: {}", session.buffer_of(view).name())
                }
            };
            format!("{marker}{i:>3} {indent}{label}")
        })
        .collect()
}

pub fn render_window_outline(session: &Session, frame: &mut Frame, area: Rect, theme: &Theme) {
    if area.height == 0 {
        return;
    }
    let focus = session.tree.focus();
    let lines: Vec<Line> = outline_lines(session)
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            if i == focus {
                Line::styled(text, theme.selection_active)
            } else {
                Line::raw(text)
            }
        })
        .collect();
    let visible_rows = usize::from(area.height.saturating_sub(2));
    let scroll = (focus + 1).saturating_sub(visible_rows);
    let block = Block::default()
        .title("Windows")
        .borders(Borders::ALL)
        .border_style(theme.border_focused);
    let outline = Paragraph::new(lines)
        .block(block)
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(outline, area);
}

pub fn render_help_overlay(session: &Session, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let global_cfg = session
        .config_global_path
        .as_ref()
        .map_or_else(|| "<unknown>".to_string(), |p| p.display().to_string());
    let local_cfg = session
        .config_local_path
        .as_ref()
        .map_or_else(|| "<none>".to_string(), |p| p.display().to_string());

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut all_lines: Vec<Line> = Vec::new();

    // Movement
    all_lines.push(Line::styled("Movement", section_style));
    all_lines.push(Line::raw("  Arrows              Move cursor (byte / row)"));
    all_lines.push(Line::raw("  Shift+Arrows        Grow / shrink selection"));
    all_lines.push(Line::raw("  0-9                 Repeat count for next action"));
    all_lines.push(Line::raw("  Tab                 Switch hex / char column"));
    all_lines.push(Line::raw(""));

    // Commands
    all_lines.push(Line::styled("Commands", section_style));
    all_lines.push(Line::raw("  :                   Command prompt"));
    all_lines.push(Line::raw("  r                   Read typed values"));
    all_lines.push(Line::raw(format!(
        "                      types: {}",
        crate::catalog::names()
    )));
    all_lines.push(Line::raw("  :c / :columns N     Bytes per row"));
    all_lines.push(Line::raw("  :hs / :vs           Split pane"));
    all_lines.push(Line::raw("  :wc                 Close pane"));
    all_lines.push(Line::raw("  :o / :open PATH     Open file in pane"));
    all_lines.push(Line::raw("  :rl / :reload       Reload file"));
    all_lines.push(Line::raw("  :q / :quit          Quit"));
    all_lines.push(Line::raw(""));

    // Windows
    all_lines.push(Line::styled("Windows", section_style));
    all_lines.push(Line::raw("  g + letter          Go to window"));
    all_lines.push(Line::raw("  w                   Window mode"));
    all_lines.push(Line::raw("    v / h             Split left-right / top-bottom"));
    all_lines.push(Line::raw("    c                 Close"));
    all_lines.push(Line::raw("    Arrows            Move focus"));
    all_lines.push(Line::raw("    t / f             Toggle orientation / fix focus"));
    all_lines.push(Line::raw("    q / Esc           Leave"));
    all_lines.push(Line::raw(""));

    // Other
    all_lines.push(Line::styled("Other", section_style));
    all_lines.push(Line::raw("  q / Ctrl-c          Quit"));
    all_lines.push(Line::raw("  ? / F1              Toggle help"));
    all_lines.push(Line::raw(""));

    // Config
    all_lines.push(Line::styled("Config", section_style));
    all_lines.push(Line::raw(format!("  Global: {global_cfg}")));
    all_lines.push(Line::raw(format!("  Local override: {local_cfg}")));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

pub fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
