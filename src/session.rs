//! Conversation controller: send / history / clear over a [`ChatTransport`].
//!
//! All state lives on one thread. The busy flag is checked synchronously in
//! [`ChatSession::send`] before any future is created, so a second send while
//! one is in flight is dropped, never queued.

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;
use std::time::{Duration, Instant};

use futures_util::future::{self, FutureExt, LocalBoxFuture};
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::state::{ChatView, Message, Role};
use crate::transport::{ChatTransport, SendResponse, TransportError};

pub const SEND_FAILED: &str = "Failed to get response. Please try again.";
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
pub const CANCELLED: &str = "Request cancelled.";
pub const CLEAR_FAILED: &str = "Failed to clear conversation.";
pub const CLEARED: &str = "✅ Conversation cleared successfully!";
pub const CLEAR_PROMPT: &str = "Are you sure you want to clear the conversation?";
/// Lifetime of the "cleared" confirmation.
pub const NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Empty text or a send already in flight; nothing happened.
    Ignored,
    Replied,
    ServerError,
    NetworkError,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryOutcome {
    Loaded(usize),
    /// `success: false` or an empty conversation; the view is untouched.
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Declined,
    Cleared,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Granted,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Granted
        } else {
            Confirmation::Declined
        }
    }
}

struct Shared {
    view: RefCell<ChatView>,
    processing: Cell<bool>,
    cancel: RefCell<Option<oneshot::Sender<()>>>,
}

/// Cheap to clone; clones share the same view and busy flag.
pub struct ChatSession<T> {
    shared: Rc<Shared>,
    transport: Rc<T>,
}

impl<T> Clone for ChatSession<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            transport: Rc::clone(&self.transport),
        }
    }
}

/// Holds the busy flag for one send. Dropping it, on any path including a
/// dropped future, restores an interactable input.
struct BusyGuard {
    shared: Rc<Shared>,
}

impl BusyGuard {
    fn engage(shared: &Rc<Shared>) -> Self {
        shared.processing.set(true);
        Self {
            shared: Rc::clone(shared),
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.shared.processing.set(false);
        self.shared.cancel.borrow_mut().take();
        if let Ok(mut view) = self.shared.view.try_borrow_mut() {
            view.typing = false;
            view.input.enabled = true;
            view.input.focused = true;
        }
    }
}

impl<T: ChatTransport + 'static> ChatSession<T> {
    pub fn new(transport: T, welcome: Option<String>) -> Self {
        Self {
            shared: Rc::new(Shared {
                view: RefCell::new(ChatView::new(welcome)),
                processing: Cell::new(false),
                cancel: RefCell::new(None),
            }),
            transport: Rc::new(transport),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the view. Never hold across an `.await`.
    pub fn view(&self) -> Ref<'_, ChatView> {
        self.shared.view.borrow()
    }

    pub fn view_mut(&self) -> RefMut<'_, ChatView> {
        self.shared.view.borrow_mut()
    }

    pub fn is_processing(&self) -> bool {
        self.shared.processing.get()
    }

    pub fn set_input_focus(&self, focused: bool) {
        self.view_mut().input.focused = focused;
    }

    pub fn tick(&self, now: Instant) {
        self.view_mut().messages.tick(now);
    }

    /// Start sending `text`. The guard check and the optimistic user node
    /// happen now; the returned future performs the request and always
    /// releases the busy flag when it finishes or is dropped.
    pub fn send(&self, text: &str) -> LocalBoxFuture<'static, SendOutcome> {
        if text.trim().is_empty() {
            return future::ready(SendOutcome::Ignored).boxed_local();
        }
        if self.is_processing() {
            debug!("send ignored: a request is already in flight");
            return future::ready(SendOutcome::Ignored).boxed_local();
        }

        let guard = BusyGuard::engage(&self.shared);
        {
            let now = Instant::now();
            let mut view = self.view_mut();
            view.input.enabled = false;
            view.messages.append(Message::user(text.to_string()), now);
            view.input.clear();
            view.typing = true;
        }
        let (cancel_tx, cancel_rx) = oneshot::channel();
        *self.shared.cancel.borrow_mut() = Some(cancel_tx);

        let transport = Rc::clone(&self.transport);
        let message = text.to_string();
        async move {
            let result = tokio::select! {
                r = transport.send(&message) => Some(r),
                _ = cancel_rx => None,
            };
            let outcome = record_reply(&guard.shared, result);
            drop(guard);
            outcome
        }
        .boxed_local()
    }

    /// Abort the in-flight send, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        match self.shared.cancel.borrow_mut().take() {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Replace the list with the server's stored conversation. Failures are
    /// logged only; the panel keeps whatever it already shows.
    pub async fn load_history(&self) -> HistoryOutcome {
        let resp = match self.transport.history().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(error = %err, "loading conversation history failed");
                return HistoryOutcome::Failed;
            }
        };
        let conversation = resp.conversation.unwrap_or_default();
        if !resp.success || conversation.is_empty() {
            debug!(success = resp.success, "no stored conversation");
            return HistoryOutcome::Empty;
        }

        let now = Instant::now();
        let count = conversation.len();
        let mut view = self.view_mut();
        view.messages.clear_keep_welcome();
        for entry in conversation {
            view.messages
                .append(Message::new(Role::from_wire(&entry.role), entry.content), now);
        }
        info!(count, "conversation history loaded");
        HistoryOutcome::Loaded(count)
    }

    /// Clear the server-side conversation. Does nothing unless confirmed.
    pub async fn clear(&self, confirmation: Confirmation) -> ClearOutcome {
        if confirmation != Confirmation::Granted {
            debug!("clear declined");
            return ClearOutcome::Declined;
        }
        let result = self.transport.clear().await;

        let now = Instant::now();
        let mut view = self.view_mut();
        match result {
            Ok(resp) if resp.success => {
                view.messages.clear_keep_welcome();
                view.messages.append_notice(CLEARED, NOTICE_TTL, now);
                info!("conversation cleared");
                ClearOutcome::Cleared
            }
            Ok(_) => {
                warn!("server refused to clear the conversation");
                view.messages.append_error(CLEAR_FAILED, now);
                ClearOutcome::Failed
            }
            Err(err) => {
                warn!(error = %err, "clearing conversation failed");
                view.messages.append_error(CLEAR_FAILED, now);
                ClearOutcome::Failed
            }
        }
    }
}

/// `None` means the request was cancelled.
fn record_reply(
    shared: &Shared,
    result: Option<Result<SendResponse, TransportError>>,
) -> SendOutcome {
    let now = Instant::now();
    let mut view = shared.view.borrow_mut();
    view.typing = false;
    match result {
        Some(Ok(resp)) if resp.success => {
            let reply = resp.response.unwrap_or_default();
            view.messages.append(Message::assistant(reply), now);
            SendOutcome::Replied
        }
        Some(Ok(resp)) => {
            let text = resp
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| SEND_FAILED.to_string());
            view.messages.append_error(text, now);
            SendOutcome::ServerError
        }
        Some(Err(err)) => {
            warn!(error = %err, "sending message failed");
            view.messages.append_error(NETWORK_ERROR, now);
            SendOutcome::NetworkError
        }
        None => {
            info!("send cancelled");
            view.messages.append_error(CANCELLED, now);
            SendOutcome::Cancelled
        }
    }
}
