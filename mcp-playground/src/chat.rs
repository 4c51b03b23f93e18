//! Chat interface state
//!
//! Keeps the conversation, the input line and the in-flight query. Failures
//! never escape: they are appended to the conversation as assistant messages.

use serde_json::Value;

use crate::client::{ProxyClient, ProxyReply, QueryRequest};
use crate::error::ClientResult;
use crate::message::Message;
use crate::sidebar::ConfigListener;

pub const ACTIVATE_FIRST: &str = "Please activate the MCP configuration first!";
pub const PROCESSING_FAILED: &str = "Error processing request";
pub const EMPTY_STATE: &str = "Start a conversation by asking about your MCP tools...";
pub const INPUT_PLACEHOLDER: &str = "Ask about your MCP tools...";
pub const LOADING_TEXT: &str = "Processing your request...";

/// State of the latest exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeState {
    Ready,
    Sending,
    Error,
}

/// A query that has been sent but not answered
#[derive(Debug, Clone, PartialEq)]
pub struct PendingQuery {
    pub seq: u64,
    pub request: QueryRequest,
}

/// Chat interface state machine
#[derive(Debug)]
pub struct ChatInterface {
    messages: Vec<Message>,
    input: String,
    session_id: Option<String>,
    is_config_active: bool,
    exchange: ExchangeState,
    next_seq: u64,
    pending: Option<u64>,
    scroll_anchor: Option<usize>,
}

impl Default for ChatInterface {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatInterface {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            input: String::new(),
            session_id: None,
            is_config_active: false,
            exchange: ExchangeState::Ready,
            next_seq: 1,
            pending: None,
            scroll_anchor: None,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn is_config_active(&self) -> bool {
        self.is_config_active
    }

    pub fn exchange(&self) -> ExchangeState {
        self.exchange
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Index of the message the view should be scrolled to
    pub fn scroll_anchor(&self) -> Option<usize> {
        self.scroll_anchor
    }

    /// The input line accepts text
    pub fn is_input_enabled(&self) -> bool {
        !self.is_loading() && self.is_config_active
    }

    /// The send control is enabled
    pub fn can_submit(&self) -> bool {
        self.is_input_enabled() && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Append the user's message and issue a query for it.
    ///
    /// Returns `None` when nothing is sent. If the configuration is not
    /// active a prompt to activate it is appended instead.
    pub fn begin_submit(&mut self) -> Option<PendingQuery> {
        if self.is_loading() {
            return None;
        }

        let session_id = match (&self.session_id, self.input.trim().is_empty()) {
            (Some(session_id), false) => session_id.clone(),
            _ => {
                if !self.is_config_active {
                    self.push(Message::assistant(ACTIVATE_FIRST));
                }
                return None;
            }
        };

        let query = std::mem::take(&mut self.input);
        self.push(Message::user(query.clone()));

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(seq);
        self.exchange = ExchangeState::Sending;

        Some(PendingQuery {
            seq,
            request: QueryRequest { query, session_id },
        })
    }

    /// Apply the answer to a query.
    ///
    /// Returns `false` if the query was superseded (deactivated or cleared
    /// meanwhile) and nothing was appended.
    pub fn finish_submit(&mut self, pending: PendingQuery, outcome: ClientResult<ProxyReply>) -> bool {
        if self.pending != Some(pending.seq) {
            tracing::debug!(seq = pending.seq, "Dropping superseded query result");
            return false;
        }
        self.pending = None;

        match outcome.map_err(|e| e.to_string()).and_then(|reply| Self::result_of(&reply)) {
            Ok(result) => {
                self.push(Message::assistant(result));
                self.exchange = ExchangeState::Ready;
            }
            Err(message) => {
                tracing::warn!(message = %message, "Query failed");
                self.push(Message::assistant(format!("Error: {}", message)));
                self.exchange = ExchangeState::Error;
            }
        }
        true
    }

    /// Submit the current input and wait for the answer
    pub async fn submit<C>(&mut self, client: &C) -> ExchangeState
    where
        C: ProxyClient + ?Sized,
    {
        if let Some(pending) = self.begin_submit() {
            let outcome = client.query(&pending.request).await;
            self.finish_submit(pending, outcome);
        }
        self.exchange
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.scroll_anchor = Some(self.messages.len() - 1);
    }

    /// Assistant text from a reply, or the error text to show
    fn result_of(reply: &ProxyReply) -> Result<String, String> {
        if reply.body.is_none() {
            return Err(format!("Unreadable response from proxy ({})", reply.status_line()));
        }

        if !reply.is_success() {
            return Err(reply.message().unwrap_or(PROCESSING_FAILED).to_string());
        }

        match reply.field("result") {
            Some(Value::String(result)) => Ok(result.clone()),
            Some(other) => Ok(other.to_string()),
            None => Err("Response did not include a result".to_string()),
        }
    }
}

impl ConfigListener for ChatInterface {
    fn on_config_activated(&mut self, session_id: &str) {
        self.session_id = Some(session_id.to_string());
        self.is_config_active = true;
    }

    fn on_config_cleared(&mut self) {
        self.session_id = None;
        self.is_config_active = false;
        self.pending = None;
        self.exchange = ExchangeState::Ready;
        self.messages.clear();
        self.input.clear();
        self.scroll_anchor = None;
    }
}
