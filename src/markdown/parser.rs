//! Token stream to document tree.
//!
//! Precedence on a single line, left to right: code spans and links are
//! atomic (emphasis markers inside them never pair with markers outside),
//! then `**`/`__` strong spans, then single `*`/`_` emphasis. Matching is
//! non-greedy: an opener pairs with the nearest eligible closer. Markers that
//! never pair are emitted as literal text.

use super::lexer::{tokenize, LexedLine, Token};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// One source line. Lines are joined by explicit breaks when emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Line(Vec<Inline>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    Link { href: String, content: Vec<Inline> },
}

pub fn parse(text: &str) -> Document {
    Document {
        blocks: tokenize(text).into_iter().map(parse_line).collect(),
    }
}

fn parse_line(line: LexedLine<'_>) -> Block {
    let content = parse_inlines(&line.tokens);
    match line.heading {
        Some(level) => Block::Heading { level, content },
        None => Block::Line(content),
    }
}

/// Accumulates inlines, merging adjacent text runs.
#[derive(Default)]
struct InlineBuf {
    items: Vec<Inline>,
}

impl InlineBuf {
    fn push_text(&mut self, s: &str) {
        if let Some(Inline::Text(last)) = self.items.last_mut() {
            last.push_str(s);
        } else {
            self.items.push(Inline::Text(s.to_string()));
        }
    }

    fn push(&mut self, inline: Inline) {
        self.items.push(inline);
    }
}

fn parse_inlines(tokens: &[Token<'_>]) -> Vec<Inline> {
    let mut buf = InlineBuf::default();
    let mut i = 0;
    while i < tokens.len() {
        let next = match tokens[i] {
            Token::Backtick => code_span(tokens, i, &mut buf),
            Token::OpenBracket => link(tokens, i, &mut buf),
            Token::Star | Token::Underscore => emphasis(tokens, i, &mut buf),
            _ => None,
        };
        match next {
            Some(n) => i = n,
            None => {
                buf.push_text(tokens[i].as_str());
                i += 1;
            }
        }
    }
    buf.items
}

fn literal(tokens: &[Token<'_>]) -> String {
    tokens.iter().map(Token::as_str).collect()
}

/// End (exclusive) of a code span opening at `i`, if it closes on this line.
fn code_span_end(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    let close = (i + 2..tokens.len()).find(|&j| tokens[j] == Token::Backtick)?;
    Some(close + 1)
}

/// `(text_end, url_end)` of a `[text](url)` link opening at `i`.
fn link_bounds(tokens: &[Token<'_>], i: usize) -> Option<(usize, usize)> {
    let text_end = (i + 1..tokens.len()).find(|&j| tokens[j] == Token::CloseBracket)?;
    if text_end == i + 1 || tokens.get(text_end + 1) != Some(&Token::OpenParen) {
        return None;
    }
    let url_end = (text_end + 2..tokens.len()).find(|&j| tokens[j] == Token::CloseParen)?;
    if url_end == text_end + 2 {
        return None;
    }
    Some((text_end, url_end))
}

/// End of a code span or link starting at `i`; these never contain closers.
fn atomic_end(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    match tokens[i] {
        Token::Backtick => code_span_end(tokens, i),
        Token::OpenBracket => link_bounds(tokens, i).map(|(_, url_end)| url_end + 1),
        _ => None,
    }
}

fn code_span(tokens: &[Token<'_>], i: usize, buf: &mut InlineBuf) -> Option<usize> {
    let end = code_span_end(tokens, i)?;
    buf.push(Inline::Code(literal(&tokens[i + 1..end - 1])));
    Some(end)
}

fn link(tokens: &[Token<'_>], i: usize, buf: &mut InlineBuf) -> Option<usize> {
    let (text_end, url_end) = link_bounds(tokens, i)?;
    buf.push(Inline::Link {
        href: literal(&tokens[text_end + 2..url_end]),
        content: parse_inlines(&tokens[i + 1..text_end]),
    });
    Some(url_end + 1)
}

fn is_double(tokens: &[Token<'_>], i: usize) -> bool {
    tokens.get(i + 1) == Some(&tokens[i])
}

/// Index of the closing pair for a strong span opening at `i`.
fn strong_close(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    let marker = tokens[i];
    let mut j = i + 2;
    while j < tokens.len() {
        if let Some(end) = atomic_end(tokens, j) {
            j = end;
            continue;
        }
        if j >= i + 3 && tokens[j] == marker && is_double(tokens, j) {
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Index of the closing marker for single emphasis opening at `i`. Complete
/// strong spans of the same marker are stepped over, not split.
fn emphasis_close(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    let marker = tokens[i];
    let mut j = i + 1;
    while j < tokens.len() {
        if let Some(end) = atomic_end(tokens, j) {
            j = end;
            continue;
        }
        if tokens[j] == marker {
            if is_double(tokens, j) {
                if let Some(close) = strong_close(tokens, j) {
                    j = close + 2;
                    continue;
                }
            }
            if j >= i + 2 {
                return Some(j);
            }
        }
        j += 1;
    }
    None
}

fn emphasis(tokens: &[Token<'_>], i: usize, buf: &mut InlineBuf) -> Option<usize> {
    if is_double(tokens, i) {
        // An unmatched double marker never opens single emphasis.
        let close = strong_close(tokens, i)?;
        buf.push(Inline::Strong(parse_inlines(&tokens[i + 2..close])));
        return Some(close + 2);
    }
    let close = emphasis_close(tokens, i)?;
    buf.push(Inline::Emphasis(parse_inlines(&tokens[i + 1..close])));
    Some(close + 1)
}
