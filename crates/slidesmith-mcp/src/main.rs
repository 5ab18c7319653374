mod tools;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use rust_mcp_sdk::error::SdkResult;
use rust_mcp_sdk::schema::{
    Implementation, InitializeResult, ProtocolVersion, ServerCapabilities, ServerCapabilitiesTools,
};
use rust_mcp_sdk::{
    mcp_server::{server_runtime, McpServerOptions},
    McpServer, StdioTransport, ToMcpServerHandler, TransportOptions,
};
use tracing_subscriber::EnvFilter;

use slidesmith_google::DeckService;

use crate::tools::{McpContext, SlidesmithServerHandler};

#[derive(Parser)]
#[command(name = "slidesmith-mcp", version)]
struct Args {
    /// Path to the OAuth authorized-user token file.
    #[arg(long, default_value = "token.json")]
    token: PathBuf,
}

#[tokio::main]
async fn main() -> SdkResult<()> {
    // Stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let server_details = InitializeResult {
        server_info: Implementation {
            name: "slidesmith".into(),
            version: env!("CARGO_PKG_VERSION").into(),
            title: Some("Slidesmith MCP Server".into()),
            description: Some("MCP server for building Google Slides decks".into()),
            icons: vec![],
            website_url: None,
        },
        capabilities: ServerCapabilities {
            tools: Some(ServerCapabilitiesTools { list_changed: None }),
            ..Default::default()
        },
        meta: None,
        instructions: Some("Slidesmith MCP server".into()),
        protocol_version: ProtocolVersion::V2025_11_25.into(),
    };

    let transport = StdioTransport::new(TransportOptions::default())?;
    let handler = SlidesmithServerHandler {
        context: McpContext {
            service: Arc::new(DeckService::new(args.token)),
        },
    };

    let server = server_runtime::create_server(McpServerOptions {
        server_details,
        transport,
        handler: handler.to_mcp_server_handler(),
        task_store: None,
        client_task_store: None,
    });

    server.start().await
}
