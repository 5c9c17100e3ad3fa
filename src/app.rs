//! Global state container and action dispatch.
//!
//! Requests started by an action are pushed onto `tasks` and driven by the
//! main loop; the app itself never blocks on the network.

use std::cell::Cell;
use std::time::Instant;

use crossterm::event::Event;
use futures_util::future::{FutureExt, LocalBoxFuture};
use futures_util::stream::{FuturesUnordered, StreamExt};
use ratatui::layout::Rect;
use tracing::debug;

use crate::actions::Action;
use crate::config::WidgetConfig;
use crate::events::{self, KeyContext};
use crate::panel::PanelController;
use crate::session::{ChatSession, Confirmation, CLEAR_PROMPT};
use crate::transport::ChatTransport;

/// Lines moved by PgUp/PgDn.
const PAGE: usize = 10;

/// A question the user must answer before anything else happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingConfirm {
    Clear,
}

impl PendingConfirm {
    pub fn prompt(self) -> &'static str {
        match self {
            PendingConfirm::Clear => CLEAR_PROMPT,
        }
    }
}

pub struct App<T: ChatTransport + 'static> {
    pub session: ChatSession<T>,
    pub panel: PanelController,
    pub confirm: Option<PendingConfirm>,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
    pub server_label: String,
    /// Where the panel was last drawn; set by the renderer.
    pub panel_area: Cell<Option<Rect>>,
    tasks: FuturesUnordered<LocalBoxFuture<'static, ()>>,
}

impl<T: ChatTransport + 'static> App<T> {
    pub fn new(transport: T, config: &WidgetConfig) -> Self {
        Self {
            session: ChatSession::new(transport, config.welcome_message.clone()),
            panel: PanelController::new(config.close_on_outside_click),
            confirm: None,
            should_quit: false,
            tick: 0,
            server_label: config.base_url.clone(),
            panel_area: Cell::new(None),
            tasks: FuturesUnordered::new(),
        }
    }

    pub fn key_context(&self) -> KeyContext {
        KeyContext {
            panel_open: self.panel.is_open(),
            confirm_pending: self.confirm.is_some(),
            input_empty: self.session.view().input.is_empty(),
        }
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(action) = events::to_action(event, self.key_context()) {
            self.dispatch(action);
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.tick = self.tick.wrapping_add(1);
        self.session.tick(now);
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,

            Action::OpenPanel => {
                if !self.panel.is_open() {
                    self.toggle_panel();
                }
            }
            Action::ClosePanel => {
                if self.panel.is_open() {
                    self.confirm = None;
                    self.toggle_panel();
                }
            }

            Action::Char(c) => self.session.view_mut().input.insert(c),
            Action::Newline => self.session.view_mut().input.insert('\n'),
            Action::Backspace => self.session.view_mut().input.backspace(),
            Action::ClearInput => {
                let mut view = self.session.view_mut();
                if view.input.enabled {
                    view.input.clear();
                }
            }
            Action::Submit => self.submit_input(),
            Action::CancelRequest => {
                if self.session.cancel() {
                    debug!("in-flight request cancelled by user");
                }
            }

            Action::RequestClear => {
                if self.panel.is_open() {
                    self.confirm = Some(PendingConfirm::Clear);
                }
            }
            Action::Confirm(answer) => {
                if let Some(PendingConfirm::Clear) = self.confirm.take() {
                    let session = self.session.clone();
                    self.spawn(async move {
                        session.clear(Confirmation::from(answer)).await;
                    });
                }
            }

            Action::ScrollUp => self.session.view_mut().messages.scroll_up(1),
            Action::ScrollDown => self.session.view_mut().messages.scroll_down(1),
            Action::PageUp => self.session.view_mut().messages.scroll_up(PAGE),
            Action::PageDown => self.session.view_mut().messages.scroll_down(PAGE),
            Action::ScrollTop => self.session.view_mut().messages.scroll_to_top(),
            Action::ScrollBottom => self.session.view_mut().messages.scroll_to_bottom(),

            Action::Click { column, row } => {
                let inside = self
                    .panel_area
                    .get()
                    .is_some_and(|area| contains(area, column, row));
                if !inside && self.panel.outside_click(&self.session) {
                    self.confirm = None;
                }
            }
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Drive outstanding requests until one finishes. Only poll while
    /// [`App::has_pending`] holds; an empty set resolves immediately.
    pub async fn next_task(&mut self) {
        self.tasks.next().await;
    }

    #[cfg(test)]
    pub async fn settle(&mut self) {
        while self.tasks.next().await.is_some() {}
    }

    fn spawn(&mut self, task: impl std::future::Future<Output = ()> + 'static) {
        self.tasks.push(task.boxed_local());
    }

    fn toggle_panel(&mut self) {
        if let Some(load) = self.panel.toggle(&self.session) {
            self.spawn(load.map(|_| ()));
        }
    }

    fn submit_input(&mut self) {
        let raw = self.session.view().input.buffer.trim().to_string();
        if raw.is_empty() {
            return;
        }
        let send = self.session.send(&raw);
        self.spawn(send.map(|_| ()));
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
