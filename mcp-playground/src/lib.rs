//! MCP Playground - configuration and chat front-end for the MCP proxy
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Page                          │
//! │  ┌────────────────────┐     ┌─────────────────────┐  │
//! │  │   ConfigSidebar    │────▶│    ChatInterface    │  │
//! │  │  text / activate   │     │  messages / input   │  │
//! │  └─────────┬──────────┘     └──────────┬──────────┘  │
//! │            │      ConfigListener       │             │
//! │            └─────────────┬─────────────┘             │
//! │                    ┌─────▼─────┐                     │
//! │                    │ProxyClient│                     │
//! │                    └─────┬─────┘                     │
//! └──────────────────────────┼───────────────────────────┘
//!                            ▼
//!          POST /api/mcp/activate, POST /api/mcp/query
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mcp_playground::{HttpProxyClient, Page, View};
//!
//! let client = Arc::new(HttpProxyClient::new("http://localhost:3000")?);
//! let mut page = Page::new(View::Playground, client);
//!
//! page.load_example();
//! page.activate().await;
//! page.send("What tools do you have from MCP?").await;
//!
//! for message in page.chat().messages() {
//!     println!("{:?}: {}", message.role, message.content);
//! }
//! ```

pub mod chat;
pub mod client;
pub mod error;
pub mod message;
pub mod page;
pub mod sidebar;

pub use chat::{ChatInterface, ExchangeState, PendingQuery};
pub use client::{ActivateRequest, HttpProxyClient, ProxyClient, ProxyReply, QueryRequest};
pub use error::{ClientError, ClientResult};
pub use message::{Message, Role};
pub use page::{Page, View};
pub use sidebar::{ConfigListener, ConfigSidebar, PendingActivation, SidebarState};
