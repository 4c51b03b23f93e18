//! MCP Playground Binary
//!
//! Line-oriented front-end for the MCP proxy.
//!
//! ## Usage
//!
//! ```bash
//! # Talk to a proxy on the default port
//! mcp-playground
//!
//! # Playground view with a configuration preloaded
//! mcp-playground --view playground --config mcp.json
//!
//! # Different proxy
//! MCP_PROXY_URL=http://proxy:3000 mcp-playground
//! ```
//!
//! Commands: `:example`, `:config <file>`, `:activate`, `:clear`,
//! `:sessions`, `:status`, `:quit`. Anything else is sent as a chat message.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use mcp_playground::chat::{EMPTY_STATE, INPUT_PLACEHOLDER, LOADING_TEXT};
use mcp_playground::{HttpProxyClient, Page, ProxyClient, View};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "mcp-playground")]
#[command(about = "Configure MCP servers and chat with them through the MCP proxy")]
#[command(version)]
struct Args {
    /// Base URL of the MCP proxy
    #[arg(long, env = "MCP_PROXY_URL", default_value = "http://localhost:3000")]
    proxy_url: String,

    /// Page to show (home or playground)
    #[arg(long, default_value = "home")]
    view: View,

    /// Configuration file to preload into the editor
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// One input line
#[derive(Debug, PartialEq)]
enum Command {
    Example,
    Config(PathBuf),
    Activate,
    Clear,
    Sessions,
    Status,
    Quit,
    Send(String),
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        if !trimmed.starts_with(':') {
            return Some(Command::Send(line.to_string()));
        }

        let (name, arg) = trimmed.split_once(' ').unwrap_or((trimmed, ""));
        Some(match name {
            ":example" => Command::Example,
            ":config" if !arg.trim().is_empty() => Command::Config(PathBuf::from(arg.trim())),
            ":activate" => Command::Activate,
            ":clear" => Command::Clear,
            ":sessions" => Command::Sessions,
            ":status" => Command::Status,
            ":quit" | ":q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (to stderr so it doesn't interleave with the conversation)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_playground=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let client = Arc::new(HttpProxyClient::new(&args.proxy_url)?);
    tracing::info!("Using MCP proxy at {}", client.base_url());

    let mut page = Page::new(args.view, client);

    if let Some(path) = &args.config {
        page.set_config_text(tokio::fs::read_to_string(path).await?);
    }

    print_header(&page);

    let mut printed = 0usize;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };

        match command {
            Command::Example => {
                page.load_example();
                println!("{}", page.sidebar().example_preview().unwrap_or_default());
            }
            Command::Config(path) => match tokio::fs::read_to_string(&path).await {
                Ok(text) => {
                    page.set_config_text(text);
                    println!("Loaded configuration from {}", path.display());
                }
                Err(e) => println!("Could not read {}: {}", path.display(), e),
            },
            Command::Activate => {
                println!("Activating...");
                page.activate().await;
                print_banners(&page);
            }
            Command::Clear => {
                page.clear().await;
                printed = 0;
                println!("Cleared chat and configuration");
            }
            Command::Sessions => match page.list_sessions().await {
                Ok(sessions) if sessions.is_empty() => println!("No active sessions"),
                Ok(sessions) => sessions.iter().for_each(|s| println!("  {}", s)),
                Err(e) => println!("Could not list sessions: {}", e),
            },
            Command::Status => print_status(&page),
            Command::Quit => break,
            Command::Send(text) => {
                if page.chat().is_config_active() {
                    println!("{}", LOADING_TEXT);
                }
                page.send(text).await;
            }
            Command::Unknown(name) => println!("Unknown command {}", name),
        }

        render_messages(&page, &mut printed);
    }

    Ok(())
}

fn print_header<C: ProxyClient + ?Sized>(page: &Page<C>) {
    let view = page.view();
    if let Some(eyebrow) = view.eyebrow() {
        println!("[{}]", eyebrow);
    }
    println!("{}", view.title());
    println!("{}", view.subtitle());
    println!();
    print_status(page);
    println!("{}", EMPTY_STATE);
    println!("({})", INPUT_PLACEHOLDER);
}

fn print_status<C: ProxyClient + ?Sized>(page: &Page<C>) {
    for line in page.sidebar().status_lines() {
        println!("* {}", line);
    }
}

fn print_banners<C: ProxyClient + ?Sized>(page: &Page<C>) {
    if let Some(error) = page.sidebar().error() {
        println!("! {}", error);
    }
    if let Some(success) = page.sidebar().success() {
        println!("{}", success);
    }
}

/// Print everything up to the scroll anchor that has not been shown yet
fn render_messages<C: ProxyClient + ?Sized>(page: &Page<C>, printed: &mut usize) {
    let Some(anchor) = page.chat().scroll_anchor() else {
        *printed = 0;
        return;
    };

    for message in page.chat().messages().iter().take(anchor + 1).skip(*printed) {
        let speaker = if message.is_user() { "you" } else { "assistant" };
        println!("{:>9} > {}", speaker, message.content);
    }
    *printed = anchor + 1;
}
