//! Page shells composing the sidebar and the chat

use std::str::FromStr;
use std::sync::Arc;

use serde_json::Value;

use crate::chat::{ChatInterface, ExchangeState};
use crate::client::ProxyClient;
use crate::error::{ClientError, ClientResult};
use crate::sidebar::{ConfigSidebar, SidebarState};

/// Which page is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    Playground,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "MCP-powered Ultimate AI Assistant",
            View::Playground => "Configure MCP and start chatting",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            View::Home => "Configure your MCP servers and chat with them using natural language!",
            View::Playground => {
                "Load the example config (Firecrawl + Ragie), activate, then chat - all without leaving this page."
            }
        }
    }

    /// Small label above the playground heading
    pub fn eyebrow(&self) -> Option<&'static str> {
        match self {
            View::Home => None,
            View::Playground => Some("Live playground"),
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" | "/" => Ok(View::Home),
            "playground" | "/playground" => Ok(View::Playground),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

/// One sidebar and one chat sharing a proxy client
pub struct Page<C: ProxyClient + ?Sized> {
    view: View,
    client: Arc<C>,
    sidebar: ConfigSidebar,
    chat: ChatInterface,
}

impl<C: ProxyClient + ?Sized> Page<C> {
    pub fn new(view: View, client: Arc<C>) -> Self {
        Self {
            view,
            client,
            sidebar: ConfigSidebar::new(),
            chat: ChatInterface::new(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn sidebar(&self) -> &ConfigSidebar {
        &self.sidebar
    }

    pub fn chat(&self) -> &ChatInterface {
        &self.chat
    }

    pub fn set_config_text(&mut self, text: impl Into<String>) {
        self.sidebar.set_config_text(text);
    }

    pub fn load_example(&mut self) {
        self.sidebar.load_example();
    }

    /// Activate the sidebar's configuration; the chat follows on success
    pub async fn activate(&mut self) -> SidebarState {
        self.sidebar.activate(self.client.as_ref(), &mut self.chat).await
    }

    /// Send `text` as a chat message
    pub async fn send(&mut self, text: impl Into<String>) -> ExchangeState {
        self.chat.set_input(text);
        self.chat.submit(self.client.as_ref()).await
    }

    /// Clear the configuration and the conversation.
    ///
    /// The backend session that was active, if any, is released on a best
    /// effort basis; failures are only logged.
    pub async fn clear(&mut self) {
        let released = self.chat.session_id().map(str::to_string);
        self.sidebar.clear(&mut self.chat);

        let Some(session_id) = released else {
            return;
        };

        match self.client.release_session(&session_id).await {
            Ok(reply) if reply.is_success() => {
                tracing::debug!(session_id = %session_id, "Released backend session");
            }
            Ok(reply) => {
                tracing::warn!(
                    session_id = %session_id,
                    status = reply.http_status,
                    message = reply.message().unwrap_or_default(),
                    "Backend refused to release session"
                );
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, error = %e, "Failed to release session");
            }
        }
    }

    /// Sessions the backend currently holds
    pub async fn list_sessions(&self) -> ClientResult<Vec<String>> {
        let reply = self.client.list_sessions().await?;
        if !reply.is_success() {
            return Err(ClientError::Rejected {
                status_code: reply.http_status,
                message: reply
                    .message()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Backend returned {}", reply.http_status)),
            });
        }

        Ok(reply
            .field("sessions")
            .and_then(Value::as_array)
            .map(|sessions| {
                sessions
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default())
    }
}
