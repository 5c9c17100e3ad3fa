//! Scanner: splits text into lines and each line into marker / text tokens.

/// One inline token. Marker characters are kept as single tokens so the
/// parser can pair them; everything else is a borrowed text run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Star,
    Underscore,
    Backtick,
    OpenBracket,
    CloseBracket,
    OpenParen,
    CloseParen,
}

impl<'a> Token<'a> {
    /// Source text of the token, used when a marker ends up unmatched.
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Text(s) => s,
            Token::Star => "*",
            Token::Underscore => "_",
            Token::Backtick => "`",
            Token::OpenBracket => "[",
            Token::CloseBracket => "]",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
        }
    }

    fn marker(c: char) -> Option<Self> {
        match c {
            '*' => Some(Token::Star),
            '_' => Some(Token::Underscore),
            '`' => Some(Token::Backtick),
            '[' => Some(Token::OpenBracket),
            ']' => Some(Token::CloseBracket),
            '(' => Some(Token::OpenParen),
            ')' => Some(Token::CloseParen),
            _ => None,
        }
    }
}

/// A scanned source line: optional ATX heading level plus its inline tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexedLine<'a> {
    pub heading: Option<u8>,
    pub tokens: Vec<Token<'a>>,
}

/// Heading prefixes, longest first so `###` is never read as `#`.
const HEADING_PREFIXES: [(u8, &str); 3] = [(3, "### "), (2, "## "), (1, "# ")];

/// Scan `text` into lines. Always yields at least one (possibly empty) line;
/// `n` newlines yield `n + 1` lines.
pub fn tokenize(text: &str) -> Vec<LexedLine<'_>> {
    text.split('\n').map(scan_line).collect()
}

fn scan_line(line: &str) -> LexedLine<'_> {
    let (heading, body) = split_heading(line);
    LexedLine {
        heading,
        tokens: scan_inline(body),
    }
}

fn split_heading(line: &str) -> (Option<u8>, &str) {
    for (level, prefix) in HEADING_PREFIXES {
        if let Some(rest) = line.strip_prefix(prefix) {
            if !rest.is_empty() {
                return (Some(level), rest);
            }
        }
    }
    (None, line)
}

fn scan_inline(body: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    for (idx, c) in body.char_indices() {
        if let Some(token) = Token::marker(c) {
            if run_start < idx {
                tokens.push(Token::Text(&body[run_start..idx]));
            }
            tokens.push(token);
            run_start = idx + c.len_utf8();
        }
    }
    if run_start < body.len() {
        tokens.push(Token::Text(&body[run_start..]));
    }
    tokens
}
