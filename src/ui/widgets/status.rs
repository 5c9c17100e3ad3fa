//! Status bar: minimal, state + shortcuts.

use ratatui::{layout::Rect, style::Style, text::Span, widgets::Paragraph, Frame};

use crate::ui::theme::colors;

const HINTS: &str = " Enter send  ⇧/⌥+Enter newline  ^C cancel  ^L clear  Esc close ";

pub fn render(f: &mut Frame, area: Rect, processing: bool, spinner_char: char) {
    let left = if processing {
        format!(" {spinner_char} Thinking…")
    } else {
        " Ready".to_string()
    };
    let width = area.width as usize;
    let left_len = left.chars().count();
    // Drop the hints rather than wrap on narrow panels.
    let right = if left_len + HINTS.chars().count() <= width { HINTS } else { "" };
    let pad = width.saturating_sub(left_len + right.chars().count());
    let line = format!("{left}{}{right}", " ".repeat(pad));
    let span = Span::styled(line, Style::default().fg(colors::MUTED).bg(colors::ELEVATED));
    f.render_widget(Paragraph::new(span), area);
}
