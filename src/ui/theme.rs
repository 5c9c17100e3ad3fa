//! Theme: dark panel over a plain canvas, refined hierarchy.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Canvas behind the panel.
    pub const CANVAS: Color = Color::Rgb(0x10, 0x13, 0x17);
    /// Panel body (message list): dark gray so white text pops.
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, input bar, status, modal.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    /// Borders / separators: visible.
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Primary accent (prompt, You label, launcher).
    pub const ACCENT: Color = Color::Rgb(0x6b, 0xbc, 0xff);
    /// Assistant label, links.
    pub const ACCENT_SOFT: Color = Color::Rgb(0x99, 0xd4, 0xff);
    /// Markdown headings.
    pub const HEADING: Color = Color::Rgb(0xff, 0xc8, 0x6b);
    /// Body text: near white, maximum visibility.
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    /// Secondary text: clearly visible.
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints: visible.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    /// Inline code: lighter so text stands out.
    pub const CODE_BG: Color = Color::Rgb(0x1e, 0x24, 0x2e);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
    pub const SUCCESS: Color = Color::Rgb(0x7c, 0xd9, 0x92);
}

pub const HEADER_HEIGHT: u16 = 1;
pub const STATUS_HEIGHT: u16 = 1;
/// Input grows with its content up to this many rows.
pub const INPUT_MAX_LINES: u16 = 5;
pub const MIN_CHAT_LINES: u16 = 3;
pub const PANEL_MAX_WIDTH: u16 = 72;
pub const PANEL_MAX_HEIGHT: u16 = 36;
pub const LAUNCHER_LABEL: &str = " 💬 Chat ";
/// Blank line between messages.
pub const MESSAGE_GAP: usize = 1;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 1;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
