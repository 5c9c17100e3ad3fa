//! Closed state: a chat button in the corner and a one-line hint.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::ui::layout;
use crate::ui::theme::{colors, LAUNCHER_LABEL};

const HINT: &str = " Enter/o open chat  q quit";

pub fn render(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(HINT, Style::default().fg(colors::MUTED)))),
        area,
    );

    let button = layout::launcher(area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::ACCENT));
    f.render_widget(
        Paragraph::new(Span::styled(
            LAUNCHER_LABEL,
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        ))
        .block(block),
        button,
    );
}
