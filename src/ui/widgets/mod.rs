//! TUI widgets: launcher, panel header, chat, input, status, confirm modal.

mod chat;
mod confirm;
mod header;
mod input;
mod launcher;
mod status;

pub use chat::render as render_chat;
pub use confirm::render as render_confirm;
pub use header::render as render_header;
pub use input::render as render_input;
pub use launcher::render as render_launcher;
pub use status::render as render_status;
