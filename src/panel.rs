//! Panel open/close state. Opening focuses the input and hands back the
//! history load to run; closing never touches the network.

use futures_util::future::{FutureExt, LocalBoxFuture};
use tracing::debug;

use crate::session::{ChatSession, HistoryOutcome};
use crate::transport::ChatTransport;

#[derive(Debug)]
pub struct PanelController {
    open: bool,
    close_on_outside_click: bool,
}

impl PanelController {
    pub fn new(close_on_outside_click: bool) -> Self {
        Self {
            open: false,
            close_on_outside_click,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip the panel. On open, returns the history load for the caller to
    /// drive.
    pub fn toggle<T: ChatTransport + 'static>(
        &mut self,
        session: &ChatSession<T>,
    ) -> Option<LocalBoxFuture<'static, HistoryOutcome>> {
        self.open = !self.open;
        session.set_input_focus(self.open);
        debug!(open = self.open, "panel toggled");
        if !self.open {
            return None;
        }
        let session = session.clone();
        Some(async move { session.load_history().await }.boxed_local())
    }

    /// A click landed outside the panel. Closes it only when enabled.
    pub fn outside_click<T: ChatTransport + 'static>(&mut self, session: &ChatSession<T>) -> bool {
        if !(self.open && self.close_on_outside_click) {
            return false;
        }
        // Closing never yields a task.
        let _ = self.toggle(session);
        true
    }
}
