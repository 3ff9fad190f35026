//! Servidor MCP de checagem de fatos.
//!
//! Expõe cada fonte de evidência como uma ferramenta MCP, sobre dois
//! transportes que compartilham o mesmo [`Dispatcher`]:
//!
//! - stdio (newline-delimited JSON), estilo padrão `badge`
//! - HTTP (`GET /` catálogo, `POST /` JSON-RPC), estilo padrão `directive`
//!
//! ## Exemplo de Uso
//!
//! ```ignore
//! use std::sync::Arc;
//! use factcheck::evidence::RenderStyle;
//! use factcheck::mcp::{Dispatcher, McpServer};
//! use factcheck::types::config::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_or_default();
//!     let dispatcher = Dispatcher::from_config(&config, RenderStyle::Badge).unwrap();
//!     McpServer::stdio(Arc::new(dispatcher)).run().await.unwrap();
//! }
//! ```

pub mod http;
mod protocol;
mod server;
mod tools;
mod transport;

pub use protocol::{
    CallToolParams, Catalog, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ParseFailure,
    ServerCapabilities, ServerInfo, ToolContent, ToolDescription, ToolResult, ToolsCapability,
    INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION, METHOD_NOT_FOUND,
    PARSE_ERROR,
};

pub use server::{resolve_style, Dispatcher, McpServer};
pub use tools::{unknown_tool_message, ToolRegistry, API_KEY_NOT_CONFIGURED, VERDICT_FORMAT_INSTRUCTION};
pub use transport::{LineTransport, StdioTransport};
