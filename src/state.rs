//! View state: messages, the message list with its banner and transient
//! nodes, scroll position, and the input bar.

use std::time::{Duration, Instant};

use crate::markdown::{self, Document};

/// Delay between inserting a node and snapping the list to the bottom.
pub const AUTOSCROLL_DELAY: Duration = Duration::from_millis(100);
/// Prefix shown in front of every error node.
pub const ERROR_ICON: &str = "⚠️";

/// Chat message role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    /// Anything else the server stores; shown as inert text.
    System,
}

impl Role {
    pub fn from_wire(role: &str) -> Self {
        match role {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            _ => Role::System,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: String) -> Self {
        Self { role, content }
    }
    pub fn user(content: String) -> Self {
        Self::new(Role::User, content)
    }
    pub fn assistant(content: String) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// How a message body is displayed. Only assistant text is interpreted as
/// markdown; everything else stays plain.
#[derive(Clone, Debug)]
pub enum Body {
    Plain(String),
    Markdown { document: Document, html: String },
}

#[derive(Clone, Debug)]
pub struct RenderedMessage {
    pub message: Message,
    pub body: Body,
}

impl RenderedMessage {
    fn render(message: Message) -> Self {
        let body = match message.role {
            Role::Assistant => {
                let document = markdown::parse(&message.content);
                let html = markdown::emit(&document);
                Body::Markdown { document, html }
            }
            Role::User | Role::System => Body::Plain(message.content.clone()),
        };
        Self { message, body }
    }

    pub fn html(&self) -> Option<&str> {
        match &self.body {
            Body::Markdown { html, .. } => Some(html),
            Body::Plain(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub enum MessageNode {
    Welcome(String),
    Message(RenderedMessage),
    Error(String),
    /// Confirmation that removes itself once `expires_at` has passed.
    Notice { text: String, expires_at: Instant },
}

impl MessageNode {
    pub fn is_welcome(&self) -> bool {
        matches!(self, MessageNode::Welcome(_))
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            MessageNode::Message(m) => Some(m.message.role),
            _ => None,
        }
    }

    /// Display text for non-markdown nodes (errors carry the warning icon).
    pub fn plain_text(&self) -> Option<String> {
        match self {
            MessageNode::Welcome(t) | MessageNode::Notice { text: t, .. } => Some(t.clone()),
            MessageNode::Error(t) => Some(format!("{ERROR_ICON} {t}")),
            MessageNode::Message(m) => match &m.body {
                Body::Plain(t) => Some(t.clone()),
                Body::Markdown { .. } => None,
            },
        }
    }
}

/// Scroll position counted in lines up from the bottom; 0 follows the tail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scroll {
    pub from_bottom: usize,
}

#[derive(Clone, Debug, Default)]
pub struct MessageList {
    nodes: Vec<MessageNode>,
    pub scroll: Scroll,
    autoscroll_at: Option<Instant>,
}

impl MessageList {
    pub fn new(welcome: Option<String>) -> Self {
        Self {
            nodes: welcome.into_iter().map(MessageNode::Welcome).collect(),
            ..Self::default()
        }
    }

    pub fn nodes(&self) -> &[MessageNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn append(&mut self, message: Message, now: Instant) {
        self.push(MessageNode::Message(RenderedMessage::render(message)), now);
    }

    pub fn append_error(&mut self, text: impl Into<String>, now: Instant) {
        self.push(MessageNode::Error(text.into()), now);
    }

    pub fn append_notice(&mut self, text: impl Into<String>, ttl: Duration, now: Instant) {
        self.push(
            MessageNode::Notice {
                text: text.into(),
                expires_at: now + ttl,
            },
            now,
        );
    }

    /// Drop everything except the welcome banner.
    pub fn clear_keep_welcome(&mut self) {
        self.nodes.retain(MessageNode::is_welcome);
        self.scroll = Scroll::default();
    }

    pub fn request_autoscroll(&mut self, now: Instant) {
        self.autoscroll_at = Some(now + AUTOSCROLL_DELAY);
    }

    pub fn autoscroll_pending(&self) -> bool {
        self.autoscroll_at.is_some()
    }

    /// Apply due autoscroll and expire notices.
    pub fn tick(&mut self, now: Instant) {
        if self.autoscroll_at.is_some_and(|at| at <= now) {
            self.autoscroll_at = None;
            self.scroll = Scroll::default();
        }
        self.nodes.retain(|n| match n {
            MessageNode::Notice { expires_at, .. } => *expires_at > now,
            _ => true,
        });
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll.from_bottom = self.scroll.from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.from_bottom = self.scroll.from_bottom.saturating_sub(lines);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.from_bottom = usize::MAX;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = Scroll::default();
    }

    fn push(&mut self, node: MessageNode, now: Instant) {
        self.nodes.push(node);
        self.request_autoscroll(now);
    }
}

/// Input bar: text, cursor (byte offset), enabled/focused flags.
#[derive(Clone, Debug)]
pub struct InputState {
    pub buffer: String,
    pub cursor: usize,
    pub enabled: bool,
    pub focused: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            enabled: true,
            focused: false,
        }
    }
}

impl InputState {
    pub fn insert(&mut self, c: char) {
        if !self.enabled {
            return;
        }
        let pos = self.cursor.min(self.buffer.len());
        self.buffer.insert(pos, c);
        self.cursor = pos + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if !self.enabled || self.cursor == 0 {
            return;
        }
        let pos = self.cursor.min(self.buffer.len());
        if let Some((idx, _)) = self.buffer[..pos].char_indices().next_back() {
            self.buffer.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

/// Everything the panel shows.
#[derive(Clone, Debug)]
pub struct ChatView {
    pub messages: MessageList,
    pub input: InputState,
    pub typing: bool,
}

impl ChatView {
    pub fn new(welcome: Option<String>) -> Self {
        Self {
            messages: MessageList::new(welcome),
            input: InputState::default(),
            typing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn assistant_text_is_markdown_user_text_is_plain() {
        let now = Instant::now();
        let mut list = MessageList::new(None);
        list.append(Message::user("**hi** <b>".into()), now);
        list.append(Message::assistant("**hi**".into()), now);

        assert_eq!(list.nodes()[0].plain_text().as_deref(), Some("**hi** <b>"));
        match &list.nodes()[1] {
            MessageNode::Message(m) => assert_eq!(m.html(), Some("<strong>hi</strong>")),
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn assistant_html_comes_from_its_document() {
        let text = "# Totals\n**Debit** `100` [ledger](https://example.com)";
        let mut list = MessageList::new(None);
        list.append(Message::assistant(text.into()), Instant::now());
        match &list.nodes()[0] {
            MessageNode::Message(RenderedMessage {
                body: Body::Markdown { document, html },
                ..
            }) => {
                assert_eq!(document, &markdown::parse(text));
                assert_eq!(html, &markdown::render(text));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn errors_carry_warning_prefix() {
        let mut list = MessageList::new(None);
        list.append_error("boom", Instant::now());
        assert_eq!(list.nodes()[0].plain_text().as_deref(), Some("⚠️ boom"));
    }

    #[test]
    fn clear_keeps_only_the_banner() {
        let now = Instant::now();
        let mut list = MessageList::new(Some("Welcome".into()));
        list.append(Message::user("a".into()), now);
        list.append_error("b", now);
        list.clear_keep_welcome();
        assert_eq!(list.len(), 1);
        assert!(list.nodes()[0].is_welcome());
    }

    #[test]
    fn notices_expire_on_tick() {
        let now = Instant::now();
        let mut list = MessageList::new(None);
        list.append_notice("done", Duration::from_secs(3), now);
        list.tick(now + Duration::from_secs(2));
        assert_eq!(list.len(), 1);
        list.tick(now + Duration::from_secs(3));
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn autoscroll_is_deferred() {
        let now = Instant::now();
        let mut list = MessageList::new(None);
        list.scroll_up(5);
        list.append(Message::user("x".into()), now);
        list.tick(now);
        assert_eq!(list.scroll.from_bottom, 5);
        assert!(list.autoscroll_pending());
        list.tick(now + AUTOSCROLL_DELAY);
        assert_eq!(list.scroll.from_bottom, 0);
        assert!(!list.autoscroll_pending());
    }

    #[test]
    fn unknown_roles_render_plain() {
        assert_eq!(Role::from_wire("assistant"), Role::Assistant);
        assert_eq!(Role::from_wire("user"), Role::User);
        assert_eq!(Role::from_wire("system"), Role::System);
    }

    #[test]
    fn disabled_input_ignores_edits() {
        let mut input = InputState::default();
        input.insert('h');
        input.insert('é');
        input.backspace();
        assert_eq!(input.buffer, "h");
        input.enabled = false;
        input.insert('x');
        input.backspace();
        assert_eq!(input.buffer, "h");
    }
}
