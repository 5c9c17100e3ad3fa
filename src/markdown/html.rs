//! Document tree to HTML fragment.

use std::fmt::Write;

use super::parser::{Block, Document, Inline};

/// Link schemes that would execute or embed content instead of navigating.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

pub fn emit(doc: &Document) -> String {
    let mut out = String::new();
    for (idx, block) in doc.blocks.iter().enumerate() {
        if idx > 0 {
            out.push_str("<br>");
        }
        match block {
            Block::Heading { level, content } => {
                let _ = write!(out, "<h{level}>");
                emit_inlines(&mut out, content);
                let _ = write!(out, "</h{level}>");
            }
            Block::Line(content) => emit_inlines(&mut out, content),
        }
    }
    out
}

fn emit_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(s) => push_escaped(out, s, false),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                emit_inlines(out, children);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                emit_inlines(out, children);
                out.push_str("</em>");
            }
            Inline::Code(s) => {
                out.push_str("<code>");
                push_escaped(out, s, false);
                out.push_str("</code>");
            }
            Inline::Link { href, content } if is_safe_href(href) => {
                out.push_str("<a href=\"");
                push_escaped(out, href, true);
                out.push_str("\" target=\"_blank\" rel=\"noopener noreferrer\">");
                emit_inlines(out, content);
                out.push_str("</a>");
            }
            Inline::Link { content, .. } => emit_inlines(out, content),
        }
    }
}

/// Escape `&`, `<`, `>`; inside attribute values also both quote kinds.
fn push_escaped(out: &mut String, s: &str, attribute: bool) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            '\'' if attribute => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

pub(crate) fn is_safe_href(href: &str) -> bool {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s))
}
