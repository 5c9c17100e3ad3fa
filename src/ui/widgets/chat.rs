//! Message list: welcome banner, labelled messages, errors, notices and the
//! typing indicator (white text on dark bg).

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::state::{Body, ChatView, MessageNode, Role};
use crate::ui::markdown;
use crate::ui::theme::{colors, MESSAGE_GAP};

/// Use pure white for chat body so it's visible in any terminal.
const CHAT_TEXT: Color = Color::White;
const USER_LABEL: &str = "You";
const ASSISTANT_LABEL: &str = "Assistant";

fn label_for(role: Role) -> (&'static str, Style) {
    match role {
        Role::User => (
            USER_LABEL,
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        ),
        Role::Assistant => (
            ASSISTANT_LABEL,
            Style::default().fg(colors::ACCENT_SOFT).add_modifier(Modifier::BOLD),
        ),
        Role::System => ("", Style::default().fg(colors::TEXT_DIM)),
    }
}

fn plain_lines(text: &str, style: Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|s| Line::from(Span::styled(s.to_string(), style)))
        .collect()
}

/// Put `label` in front of the first line and indent the rest under it.
fn labelled(
    label: &str,
    label_style: Style,
    content: Vec<Line<'static>>,
    out: &mut Vec<Line<'static>>,
) {
    let indent = " ".repeat(label.chars().count() + 1);
    for (i, line) in content.into_iter().enumerate() {
        let lead = match (label.is_empty(), i) {
            (true, _) => Span::raw(""),
            (false, 0) => Span::styled(format!("{label} "), label_style),
            (false, _) => Span::raw(indent.clone()),
        };
        let mut spans = vec![lead];
        spans.extend(line.spans);
        out.push(Line::from(spans));
    }
}

fn node_lines(node: &MessageNode, out: &mut Vec<Line<'static>>) {
    let text = node.plain_text().unwrap_or_default();
    match node {
        MessageNode::Welcome(_) => out.extend(plain_lines(
            &text,
            Style::default().fg(colors::TEXT_DIM).add_modifier(Modifier::ITALIC),
        )),
        MessageNode::Error(_) => out.extend(plain_lines(&text, Style::default().fg(colors::ERROR))),
        MessageNode::Notice { .. } => {
            out.extend(plain_lines(&text, Style::default().fg(colors::SUCCESS)))
        }
        MessageNode::Message(m) => {
            let (label, label_style) = label_for(m.message.role);
            let content = match &m.body {
                Body::Markdown { document, .. } => markdown::to_lines(document),
                Body::Plain(t) => {
                    let style = match m.message.role {
                        Role::System => Style::default().fg(colors::TEXT_DIM),
                        _ => Style::default().fg(CHAT_TEXT),
                    };
                    plain_lines(t, style)
                }
            };
            labelled(label, label_style, content, out);
        }
    }
}

pub fn build_lines(view: &ChatView, spinner_char: char) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    for node in view.messages.nodes() {
        if !lines.is_empty() {
            lines.extend(std::iter::repeat_with(Line::default).take(MESSAGE_GAP));
        }
        node_lines(node, &mut lines);
    }

    if view.typing {
        if !lines.is_empty() {
            lines.extend(std::iter::repeat_with(Line::default).take(MESSAGE_GAP));
        }
        let (label, label_style) = label_for(Role::Assistant);
        lines.push(Line::from(vec![
            Span::styled(format!("{label} "), label_style),
            Span::styled(format!("{spinner_char} "), Style::default().fg(colors::ACCENT)),
            Span::styled("Thinking…", Style::default().fg(colors::TEXT_DIM)),
        ]));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Ask anything. Enter to send",
            Style::default().fg(colors::MUTED),
        )));
    }
    lines
}

/// Draw the list and return the scroll offset actually applied (lines up
/// from the bottom, clamped to the content).
pub fn render(f: &mut Frame, view: &ChatView, area: Rect, spinner_char: char) -> usize {
    let para = Paragraph::new(build_lines(view, spinner_char))
        .style(Style::default().fg(CHAT_TEXT).bg(colors::BG))
        .wrap(Wrap { trim: false });

    let total = para.line_count(area.width);
    let max_scroll = total.saturating_sub(area.height as usize);
    let from_bottom = view.messages.scroll.from_bottom.min(max_scroll);
    let top = (max_scroll - from_bottom).min(u16::MAX as usize) as u16;
    f.render_widget(para.scroll((top, 0)), area);
    from_bottom
}
