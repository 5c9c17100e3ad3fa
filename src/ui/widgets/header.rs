//! Panel title bar: name on the left, server on the right.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::colors;

const TITLE: &str = " 💬 Finance Assistant";
/// The emoji renders two cells wide.
const EMOJI_WIDTH_SLOP: usize = 1;

/// Truncate to `max_chars` from the end with ellipsis. Single pass over chars.
fn truncate_end(s: &str, max_chars: usize) -> String {
    let count = s.chars().count();
    if count <= max_chars {
        return s.to_string();
    }
    let take = max_chars.saturating_sub(1);
    let skip = count.saturating_sub(take);
    format!("…{}", s.chars().skip(skip).collect::<String>())
}

pub fn render(f: &mut Frame, area: Rect, server: &str) {
    let width = area.width as usize;
    let title_len = TITLE.chars().count() + EMOJI_WIDTH_SLOP;
    let room = width.saturating_sub(title_len + 2);
    let server = if room == 0 {
        String::new()
    } else {
        truncate_end(server, room)
    };
    let pad = width.saturating_sub(title_len + server.chars().count() + 1);

    let line = Line::from(vec![
        Span::styled(
            TITLE,
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(server, Style::default().fg(colors::MUTED)),
        Span::raw(" "),
    ]);
    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(colors::ELEVATED)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_from_the_front() {
        assert_eq!(truncate_end("http://127.0.0.1:8000", 100), "http://127.0.0.1:8000");
        assert_eq!(truncate_end("https://books.example.com", 8), "…ple.com");
    }
}
