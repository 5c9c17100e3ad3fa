//! Finance assistant chat client: markdown-to-HTML renderer, conversation
//! controller over the chatbot HTTP endpoints, and the terminal panel.

pub mod actions;
pub mod app;
pub mod config;
pub mod events;
pub mod markdown;
pub mod panel;
pub mod session;
pub mod state;
#[cfg(test)]
mod testing;
pub mod transport;
pub mod ui;
