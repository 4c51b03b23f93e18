//! MCP configuration sidebar
//!
//! Holds the configuration text, activates it through the proxy and tracks
//! the activation status.
//!
//! ```text
//!   Idle ──edit──▶ Editing ──activate──▶ Activating ──▶ Active
//!    ▲                │                      │
//!    │                └──bad JSON──▶ Error ◀─┘
//!    └──────────────── clear (from any state)
//! ```
//!
//! Activation can be driven in one call ([`ConfigSidebar::activate`]) or in
//! two halves ([`ConfigSidebar::begin_activate`] / [`ConfigSidebar::finish_activate`])
//! so the caller can observe the `Activating` state while the request is out.

use chrono::Utc;
use serde_json::{json, Value};

use crate::client::{ActivateRequest, ProxyClient, ProxyReply};
use crate::error::ClientResult;

pub const EMPTY_CONFIG: &str = "Please enter a configuration first";
pub const INVALID_JSON: &str = "Invalid JSON format. Please check your configuration syntax.";
pub const ACTIVATION_FAILED: &str = "Failed to activate configuration";
pub const ACTIVATION_SUCCEEDED: &str = "Configuration activated successfully!";
pub const NETWORK_ERROR: &str =
    "Network error: Could not reach the backend server. Make sure it is running on port 8000.";

/// Receives activation status changes from the sidebar
pub trait ConfigListener {
    /// Configuration is active under `session_id`
    fn on_config_activated(&mut self, session_id: &str);

    /// Configuration was cleared
    fn on_config_cleared(&mut self);
}

/// Sidebar lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarState {
    Idle,
    Editing,
    Activating,
    Active,
    Error,
}

/// An activation request that has been issued but not resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PendingActivation {
    pub seq: u64,
    pub request: ActivateRequest,
}

/// The canned Firecrawl + Ragie configuration
pub fn example_config() -> Value {
    json!({
        "mcpServers": {
            "mcp-server-firecrawl": {
                "command": "npx",
                "args": ["-y", "firecrawl-mcp"],
                "env": {
                    "FIRECRAWL_API_KEY": "${FIRECRAWL_API_KEY}"
                }
            },
            "ragie": {
                "command": "npx",
                "args": ["-y", "@ragieai/mcp-server", "--partition", "default"],
                "env": {
                    "RAGIE_API_KEY": "${RAGIE_API_KEY}"
                }
            }
        }
    })
}

/// Pretty-printed example configuration
pub fn example_config_text() -> String {
    serde_json::to_string_pretty(&example_config()).unwrap_or_default()
}

/// Client-chosen session identifier
pub fn mint_session_id() -> String {
    format!("session-{}", Utc::now().timestamp_millis())
}

/// Map an activation failure's text to what the user sees.
///
/// `transport` marks failures where no answer came back at all; their raw
/// text is replaced by a generic network hint unless it already talks about
/// the connection.
pub fn describe_activation_error(message: &str, transport: bool) -> String {
    if message.contains("JSON") || message.contains("parse") {
        INVALID_JSON.to_string()
    } else if message.contains("connect") || message.contains("backend") {
        message.to_string()
    } else if transport || message.trim().is_empty() {
        NETWORK_ERROR.to_string()
    } else {
        message.to_string()
    }
}

/// Configuration sidebar state machine
#[derive(Debug)]
pub struct ConfigSidebar {
    config_text: String,
    example_preview: Option<String>,
    error: Option<String>,
    success: Option<String>,
    state: SidebarState,
    is_active: bool,
    next_seq: u64,
    pending: Option<u64>,
}

impl Default for ConfigSidebar {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSidebar {
    pub fn new() -> Self {
        Self {
            config_text: String::new(),
            example_preview: None,
            error: None,
            success: None,
            state: SidebarState::Idle,
            is_active: false,
            next_seq: 1,
            pending: None,
        }
    }

    pub fn state(&self) -> SidebarState {
        self.state
    }

    pub fn config_text(&self) -> &str {
        &self.config_text
    }

    /// Read-only preview shown after loading the example
    pub fn example_preview(&self) -> Option<&str> {
        self.example_preview.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Loading indicator; only shown while activating
    pub fn is_loading(&self) -> bool {
        self.state == SidebarState::Activating
    }

    /// Whether a configuration is currently active
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Status panel lines
    pub fn status_lines(&self) -> Vec<&'static str> {
        if self.is_active {
            vec!["MCP Client Active", "Agent Ready"]
        } else {
            vec!["Configuration not activated"]
        }
    }

    /// Replace the configuration text
    pub fn set_config_text(&mut self, text: impl Into<String>) {
        self.config_text = text.into();
        if self.state == SidebarState::Idle {
            self.state = SidebarState::Editing;
        }
    }

    /// Load the canned example into the editor and the read-only preview
    pub fn load_example(&mut self) {
        let text = example_config_text();
        self.example_preview = Some(text.clone());
        self.set_config_text(text);
    }

    /// Validate the text and issue an activation request.
    ///
    /// Returns `None` when nothing should be sent: an activation is already
    /// in flight, the text is empty, or it is not valid JSON. The latter two
    /// leave the sidebar in `Error`.
    pub fn begin_activate(&mut self) -> Option<PendingActivation> {
        if self.is_loading() {
            return None;
        }

        if self.config_text.trim().is_empty() {
            self.fail(EMPTY_CONFIG.to_string());
            return None;
        }

        self.error = None;
        self.success = None;

        let config: Value = match serde_json::from_str(&self.config_text) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(error = %e, "Configuration is not valid JSON");
                self.fail(INVALID_JSON.to_string());
                return None;
            }
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending = Some(seq);
        self.state = SidebarState::Activating;

        Some(PendingActivation {
            seq,
            request: ActivateRequest {
                config,
                session_id: mint_session_id(),
            },
        })
    }

    /// Apply the outcome of an activation request.
    ///
    /// Returns `false` when the request was superseded (the sidebar was
    /// cleared meanwhile) and the outcome was dropped.
    pub fn finish_activate<L>(
        &mut self,
        pending: PendingActivation,
        outcome: ClientResult<ProxyReply>,
        listener: &mut L,
    ) -> bool
    where
        L: ConfigListener + ?Sized,
    {
        if self.pending != Some(pending.seq) {
            tracing::debug!(seq = pending.seq, "Dropping superseded activation result");
            return false;
        }
        self.pending = None;

        let reply = match outcome {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Activation request failed");
                self.fail(describe_activation_error(&e.to_string(), true));
                return true;
            }
        };

        if let Err(message) = Self::check_reply(&reply) {
            tracing::warn!(status = reply.http_status, message = %message, "Activation rejected");
            self.fail(describe_activation_error(&message, false));
            return true;
        }

        let session_id = reply
            .field("sessionId")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or(pending.request.session_id);

        tracing::info!(session_id = %session_id, "Configuration activated");

        self.state = SidebarState::Active;
        self.is_active = true;
        self.success = Some(ACTIVATION_SUCCEEDED.to_string());
        listener.on_config_activated(&session_id);
        true
    }

    /// Validate, send and resolve an activation in one go
    pub async fn activate<C, L>(&mut self, client: &C, listener: &mut L) -> SidebarState
    where
        C: ProxyClient + ?Sized,
        L: ConfigListener + ?Sized,
    {
        if let Some(pending) = self.begin_activate() {
            let outcome = client.activate(&pending.request).await;
            self.finish_activate(pending, outcome, listener);
        }
        self.state
    }

    /// Reset everything and tell the listener the configuration is gone
    pub fn clear<L>(&mut self, listener: &mut L)
    where
        L: ConfigListener + ?Sized,
    {
        self.config_text.clear();
        self.example_preview = None;
        self.error = None;
        self.success = None;
        self.pending = None;
        self.is_active = false;
        self.state = SidebarState::Idle;
        listener.on_config_cleared();
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.success = None;
        self.state = SidebarState::Error;
    }

    /// Error text for an unsuccessful reply
    fn check_reply(reply: &ProxyReply) -> Result<(), String> {
        if !reply.is_http_ok() {
            return Err(match (&reply.body, reply.message()) {
                (Some(_), Some(message)) => message.to_string(),
                (Some(_), None) => ACTIVATION_FAILED.to_string(),
                (None, _) => format!("Server error: {}", reply.status_line()),
            });
        }

        if reply.body.is_none() {
            return Err("Failed to parse response JSON".to_string());
        }

        if !reply.is_success() {
            return Err(reply.message().unwrap_or(ACTIVATION_FAILED).to_string());
        }

        Ok(())
    }
}
