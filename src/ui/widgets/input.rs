//! Input bar: prompt, multi-line buffer, cursor. Dimmed while a reply is pending.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::InputState;
use crate::ui::theme::colors;

const PROMPT: &str = " ▸ ";
const CONTINUATION: &str = "   ";
const PLACEHOLDER: &str = "Ask about your finances…";
const WAITING: &str = "Waiting for reply…";

/// Row and column (in chars) of the cursor within the buffer.
fn cursor_cell(input: &InputState) -> (usize, usize) {
    let before = input.buffer.get(..input.cursor).unwrap_or(&input.buffer);
    let row = before.matches('\n').count();
    let col = before.rsplit('\n').next().map_or(0, |s| s.chars().count());
    (row, col)
}

pub fn render(f: &mut Frame, input: &InputState, area: Rect) {
    let (prompt_style, text_style) = if input.enabled {
        (
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
            Style::default().fg(colors::TEXT),
        )
    } else {
        (
            Style::default().fg(colors::MUTED),
            Style::default().fg(colors::TEXT_DIM),
        )
    };

    let lines: Vec<Line> = if input.is_empty() {
        let hint = if input.enabled { PLACEHOLDER } else { WAITING };
        vec![Line::from(vec![
            Span::styled(PROMPT, prompt_style),
            Span::styled(hint, Style::default().fg(colors::MUTED)),
        ])]
    } else {
        input
            .buffer
            .split('\n')
            .enumerate()
            .map(|(i, l)| {
                let lead = if i == 0 { PROMPT } else { CONTINUATION };
                Line::from(vec![Span::styled(lead, prompt_style), Span::styled(l, text_style)])
            })
            .collect()
    };

    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Keep the cursor row visible when the buffer is taller than the bar.
    let (row, col) = cursor_cell(input);
    let skip = (row + 1).saturating_sub(inner.height as usize);
    f.render_widget(Paragraph::new(lines).scroll((skip as u16, 0)), inner);

    if input.enabled && input.focused && inner.height > 0 {
        f.set_cursor_position(cursor_position(inner, row - skip, col));
    }
}

/// Screen cell for the cursor, kept on the last column for over-long lines.
fn cursor_position(inner: Rect, row: usize, col: usize) -> Position {
    let last_x = inner.x.saturating_add(inner.width.saturating_sub(1));
    let offset = PROMPT.chars().count().saturating_add(col);
    let x = inner
        .x
        .saturating_add(offset.min(inner.width as usize) as u16)
        .min(last_x);
    let y = inner.y.saturating_add(row.min(inner.height as usize) as u16);
    Position { x, y }
}
