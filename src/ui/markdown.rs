//! Parsed markdown to ratatui Line/Spans: headings, bold, italic, inline code, links.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::colors;
use crate::markdown::{is_safe_href, Block, Document, Inline};

/// Body text in markdown: white for maximum visibility.
const MD_TEXT: Color = Color::White;

/// Convert a parsed document to a list of Lines (owned, no lifetime).
pub fn to_lines(doc: &Document) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::with_capacity(doc.blocks.len());
    for block in &doc.blocks {
        let mut spans: Vec<Span<'static>> = Vec::new();
        match block {
            Block::Heading { level, content } => {
                let base = Style::default()
                    .fg(colors::HEADING)
                    .add_modifier(Modifier::BOLD);
                spans.push(Span::styled("#".repeat(*level as usize) + " ", base));
                push_inlines(content, base, &mut spans);
            }
            Block::Line(content) => {
                push_inlines(content, Style::default().fg(MD_TEXT), &mut spans);
            }
        }
        lines.push(Line::from(spans));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::raw("")));
    }
    lines
}

fn push_inlines(inlines: &[Inline], style: Style, out: &mut Vec<Span<'static>>) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push(Span::styled(t.clone(), style)),
            Inline::Strong(inner) => push_inlines(inner, style.add_modifier(Modifier::BOLD), out),
            Inline::Emphasis(inner) => {
                push_inlines(inner, style.add_modifier(Modifier::ITALIC), out)
            }
            Inline::Code(code) => out.push(Span::styled(
                format!(" {code} "),
                Style::default().fg(colors::ACCENT).bg(colors::CODE_BG),
            )),
            Inline::Link { href, content } => {
                if !is_safe_href(href) {
                    push_inlines(content, style, out);
                    continue;
                }
                let link = style
                    .fg(colors::ACCENT_SOFT)
                    .add_modifier(Modifier::UNDERLINED);
                push_inlines(content, link, out);
                out.push(Span::styled(
                    format!(" <{href}>"),
                    Style::default().fg(colors::MUTED),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::parse;
    use pretty_assertions::assert_eq;

    fn text(lines: &[Line<'_>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn one_line_per_source_line() {
        let lines = to_lines(&parse("# Title\nplain\n"));
        assert_eq!(text(&lines), vec!["# Title", "plain", ""]);
    }

    #[test]
    fn nested_styles_accumulate() {
        let lines = to_lines(&parse("**bold _both_**"));
        let both = lines[0]
            .spans
            .iter()
            .find(|s| s.content == "both")
            .expect("span for nested text");
        assert!(both.style.add_modifier.contains(Modifier::BOLD));
        assert!(both.style.add_modifier.contains(Modifier::ITALIC));
    }

    #[test]
    fn links_show_target_only_when_safe() {
        let safe = to_lines(&parse("[docs](https://example.com)"));
        assert_eq!(text(&safe), vec!["docs <https://example.com>"]);
        let blocked = to_lines(&parse("[click](javascript:alert)"));
        assert_eq!(text(&blocked), vec!["click"]);
    }

    #[test]
    fn markup_characters_are_shown_verbatim() {
        let lines = to_lines(&parse("<b>x</b> `a<b`"));
        assert_eq!(text(&lines), vec!["<b>x</b>  a<b "]);
    }
}
