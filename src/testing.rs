//! In-memory transport for controller and app tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use tokio::sync::oneshot;

use crate::transport::{
    ChatTransport, ClearResponse, HistoryEntry, HistoryResponse, SendResponse, TransportError,
};

type Reply<T> = Result<T, TransportError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send(String),
    History,
    Clear,
}

/// Replies are consumed in order; when a queue runs dry a successful empty
/// reply is returned.
#[derive(Default)]
pub struct FakeTransport {
    calls: RefCell<Vec<Call>>,
    send: RefCell<VecDeque<Reply<SendResponse>>>,
    history: RefCell<VecDeque<Reply<HistoryResponse>>>,
    clear: RefCell<VecDeque<Reply<ClearResponse>>>,
    hold: RefCell<Option<oneshot::Receiver<()>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_send(self, reply: Reply<SendResponse>) -> Self {
        self.send.borrow_mut().push_back(reply);
        self
    }

    pub fn reply_history(self, reply: Reply<HistoryResponse>) -> Self {
        self.history.borrow_mut().push_back(reply);
        self
    }

    pub fn reply_clear(self, reply: Reply<ClearResponse>) -> Self {
        self.clear.borrow_mut().push_back(reply);
        self
    }

    /// The next send blocks until the returned sender fires or is dropped.
    pub fn hold_send(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.hold.borrow_mut() = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ChatTransport for FakeTransport {
    async fn send(&self, message: &str) -> Result<SendResponse, TransportError> {
        self.calls.borrow_mut().push(Call::Send(message.to_string()));
        let hold = self.hold.borrow_mut().take();
        if let Some(rx) = hold {
            let _ = rx.await;
        }
        let reply = self.send.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Ok(sent("")))
    }

    async fn history(&self) -> Result<HistoryResponse, TransportError> {
        self.calls.borrow_mut().push(Call::History);
        let reply = self.history.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Ok(history(&[])))
    }

    async fn clear(&self) -> Result<ClearResponse, TransportError> {
        self.calls.borrow_mut().push(Call::Clear);
        let reply = self.clear.borrow_mut().pop_front();
        reply.unwrap_or(Ok(ClearResponse { success: true }))
    }
}

pub fn sent(response: &str) -> SendResponse {
    SendResponse {
        success: true,
        response: Some(response.to_string()),
        error: None,
    }
}

pub fn history(turns: &[(&str, &str)]) -> HistoryResponse {
    HistoryResponse {
        success: true,
        conversation: Some(
            turns
                .iter()
                .map(|(role, content)| HistoryEntry {
                    role: role.to_string(),
                    content: content.to_string(),
                })
                .collect(),
        ),
    }
}
