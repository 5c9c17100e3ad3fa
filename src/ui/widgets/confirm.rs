//! Yes/no modal drawn over the panel.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout;
use crate::ui::theme::colors;

const WIDTH: u16 = 44;
const HEIGHT: u16 = 6;

pub fn render(f: &mut Frame, panel: Rect, prompt: &str) {
    let area = layout::centered(panel, WIDTH, HEIGHT);
    let key = Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled(prompt, Style::default().fg(colors::TEXT))),
        Line::default(),
        Line::from(vec![
            Span::styled("[y]", key),
            Span::styled(" Yes    ", Style::default().fg(colors::TEXT_DIM)),
            Span::styled("[n]", key),
            Span::styled(" No", Style::default().fg(colors::TEXT_DIM)),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::ACCENT))
        .style(Style::default().bg(colors::ELEVATED));
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}
