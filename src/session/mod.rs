//! Chat session controller.
//!
//! Owns the message history of one mounted chat view, hands out message ids
//! and keeps at most one question in flight. Every accepted submission ends
//! with exactly one bot message, whether the remote call succeeds or not.

use crate::api::chat::QuestionClient;
use crate::models::chat::{ Message, QuestionResponse, Sender };
use crate::api::ApiError;
use chrono::Utc;
use log::{ debug, warn };
use std::sync::{ Arc, Mutex, MutexGuard, PoisonError };
use tokio::sync::mpsc;

pub const NOT_UNDERSTOOD: &str = "Desculpe, não entendi.";
pub const SEND_FAILED: &str = "Erro ao mandar mensagem, tente novamente mais tarde.";

const FIRST_MESSAGE_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A message joined the history; the view should scroll to it.
    Appended(Message),
    PendingChanged(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Awaiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Blank,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Answered(Message),
    Failed(Message),
    Rejected(Rejection),
}

struct SessionState {
    history: Vec<Message>,
    pending: bool,
    next_id: u64,
    draft: String,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            history: Vec::new(),
            pending: false,
            next_id: FIRST_MESSAGE_ID,
            draft: String::new(),
            events: None,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn append(&mut self, text: String, sender: Sender) -> Message {
        let message = Message {
            id: self.allocate_id(),
            text,
            sender,
            timestamp: Utc::now().timestamp(),
        };
        self.history.push(message.clone());
        self.emit(SessionEvent::Appended(message.clone()));
        message
    }

    fn set_pending(&mut self, pending: bool) {
        self.pending = pending;
        self.emit(SessionEvent::PendingChanged(pending));
    }

    fn emit(&mut self, event: SessionEvent) {
        // The view may already be gone; the session keeps working without it.
        let closed = match &self.events {
            Some(tx) => tx.send(event).is_err(),
            None => false,
        };
        if closed {
            self.events = None;
        }
    }
}

/// A question the session took in and is now answering.
#[derive(Debug)]
pub struct Submission {
    question: String,
}

impl Submission {
    /// The trimmed text that goes over the wire.
    pub fn question(&self) -> &str {
        &self.question
    }
}

fn accept(state: &mut SessionState, text: &str) -> Result<Submission, Rejection> {
    let question = text.trim();
    if question.is_empty() {
        debug!("Submission rejected: blank input");
        return Err(Rejection::Blank);
    }
    if state.pending {
        debug!("Submission rejected: a question is still in flight");
        return Err(Rejection::Busy);
    }
    state.append(text.to_string(), Sender::User);
    state.draft.clear();
    state.set_pending(true);
    Ok(Submission { question: question.to_string() })
}

pub struct ChatSession {
    client: Arc<dyn QuestionClient>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(client: Arc<dyn QuestionClient>) -> Self {
        Self { client, state: Mutex::new(SessionState::new()) }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Routes future events to the returned receiver, replacing any earlier subscriber.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<SessionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().events = Some(tx);
        rx
    }

    pub fn history(&self) -> Vec<Message> {
        self.lock().history.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().pending
    }

    pub fn status(&self) -> SessionStatus {
        if self.is_pending() { SessionStatus::Awaiting } else { SessionStatus::Idle }
    }

    pub fn draft(&self) -> String {
        self.lock().draft.clone()
    }

    pub fn set_draft(&self, text: &str) {
        self.lock().draft = text.to_string();
    }

    /// Whether the send affordance is enabled.
    pub fn can_send(&self) -> bool {
        let state = self.lock();
        !state.pending && !state.draft.trim().is_empty()
    }

    pub async fn submit_draft(&self) -> SubmitOutcome {
        match self.begin_draft() {
            Ok(submission) => self.complete(submission).await,
            Err(reason) => SubmitOutcome::Rejected(reason),
        }
    }

    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        match self.begin(text) {
            Ok(submission) => self.complete(submission).await,
            Err(reason) => SubmitOutcome::Rejected(reason),
        }
    }

    /// Accepts `text` without waiting on the network: the user message is
    /// appended and the session turns busy before this returns.
    pub fn begin(&self, text: &str) -> Result<Submission, Rejection> {
        accept(&mut self.lock(), text)
    }

    /// Like [`ChatSession::begin`], reading the draft under the same lock.
    pub fn begin_draft(&self) -> Result<Submission, Rejection> {
        let mut state = self.lock();
        let draft = state.draft.clone();
        accept(&mut state, &draft)
    }

    /// Sends an accepted question and records its single reply.
    pub async fn complete(&self, submission: Submission) -> SubmitOutcome {
        let result = self.client.ask(&submission.question).await;
        self.settle(result)
    }

    fn settle(&self, result: Result<QuestionResponse, ApiError>) -> SubmitOutcome {
        let mut state = self.lock();
        let outcome = match result {
            Ok(resp) => {
                let text = resp.answer
                    .filter(|answer| !answer.is_empty())
                    .unwrap_or_else(|| NOT_UNDERSTOOD.to_string());
                SubmitOutcome::Answered(state.append(text, Sender::Bot))
            }
            Err(e) => {
                warn!("Question could not be answered: {}", e);
                SubmitOutcome::Failed(state.append(SEND_FAILED.to_string(), Sender::Bot))
            }
        };
        state.set_pending(false);
        outcome
    }
}
