//! Keybindings. Launcher: Enter/o open, q quit. Panel: Enter send,
//! Shift/Alt+Enter newline, Ctrl+C cancel, Ctrl+L clear, PgUp/PgDn scroll,
//! Esc close. Ctrl+Q quits from anywhere.

use crate::actions::Action;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

/// What the keymap needs to know about the app.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyContext {
    pub panel_open: bool,
    pub confirm_pending: bool,
    pub input_empty: bool,
}

pub fn to_action(event: &Event, ctx: KeyContext) -> Option<Action> {
    match event {
        Event::Key(key) => key_to_action(key, ctx),
        Event::Mouse(mouse) => mouse_to_action(mouse),
        _ => None,
    }
}

pub fn key_to_action(event: &KeyEvent, ctx: KeyContext) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);
    let ctrl = mods.contains(KeyModifiers::CONTROL);

    if code == KeyCode::Char('q') && ctrl {
        return Some(Action::Quit);
    }

    if ctx.confirm_pending {
        return match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Action::Confirm(true)),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Confirm(false)),
            _ => None,
        };
    }

    if !ctx.panel_open {
        return match code {
            KeyCode::Enter | KeyCode::Char('o') => Some(Action::OpenPanel),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        };
    }

    if ctrl {
        return match code {
            KeyCode::Char('c') => Some(Action::CancelRequest),
            KeyCode::Char('l') => Some(Action::RequestClear),
            KeyCode::Char('u') => Some(Action::ClearInput),
            _ => None,
        };
    }

    match code {
        KeyCode::Esc => Some(Action::ClosePanel),
        KeyCode::Enter if mods.intersects(KeyModifiers::SHIFT | KeyModifiers::ALT) => {
            Some(Action::Newline)
        }
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Up => Some(Action::ScrollUp),
        KeyCode::Down => Some(Action::ScrollDown),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Home if ctx.input_empty => Some(Action::ScrollTop),
        KeyCode::End if ctx.input_empty => Some(Action::ScrollBottom),
        // Allow Alt for accented chars; only block Cmd.
        KeyCode::Char(c) if !mods.contains(KeyModifiers::SUPER) => Some(Action::Char(c)),
        _ => None,
    }
}

pub fn mouse_to_action(event: &MouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            column: event.column,
            row: event.row,
        }),
        MouseEventKind::ScrollUp => Some(Action::ScrollUp),
        MouseEventKind::ScrollDown => Some(Action::ScrollDown),
        _ => None,
    }
}
