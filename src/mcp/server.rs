//! Servidor MCP.
//!
//! O [`Dispatcher`] interpreta mensagens JSON-RPC e é compartilhado pelos
//! dois transportes (stdio e HTTP). Não guarda estado entre requests.
//! O [`McpServer`] é o loop stdio sobre um [`LineTransport`].

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde_json::{json, Value};

use crate::evidence::RenderStyle;
use crate::types::config::{Config, ServerConfig};
use crate::FactCheckResult;

use super::protocol::{
    CallToolParams, Catalog, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerInfo,
};
use super::tools::ToolRegistry;
use super::transport::{LineTransport, StdioTransport};

/// Escolhe o estilo de renderização.
///
/// Precedência: flag da CLI, depois `general.render_style`, depois o padrão
/// do transporte.
pub fn resolve_style(
    cli: Option<RenderStyle>,
    config: &Config,
    transport_default: RenderStyle,
) -> RenderStyle {
    cli.or(config.general.render_style)
        .unwrap_or(transport_default)
}

/// Interpreta requests JSON-RPC.
pub struct Dispatcher {
    registry: ToolRegistry,
    style: RenderStyle,
    catalog: Catalog,
    catalog_value: Value,
}

impl Dispatcher {
    /// Cria um dispatcher a partir de um registro já montado.
    ///
    /// O catálogo é serializado uma única vez aqui.
    pub fn new(
        registry: ToolRegistry,
        server: &ServerConfig,
        style: RenderStyle,
    ) -> FactCheckResult<Self> {
        let catalog = Catalog::new(
            server.protocol_version.clone(),
            ServerInfo::new(server.name.clone()),
            registry.list_tools(),
        );
        let catalog_value = serde_json::to_value(&catalog)?;

        Ok(Self {
            registry,
            style,
            catalog,
            catalog_value,
        })
    }

    /// Cria um dispatcher com os backends HTTP reais.
    pub fn from_config(config: &Config, style: RenderStyle) -> FactCheckResult<Self> {
        let registry = ToolRegistry::from_config(config)?;
        Self::new(registry, &config.server, style)
    }

    /// Catálogo estático.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Catálogo já serializado; o mesmo valor serve GET, `initialize` e
    /// `tools/list`.
    pub fn catalog_value(&self) -> &Value {
        &self.catalog_value
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    /// Processa um corpo bruto e sempre produz uma response.
    ///
    /// Usado pelo transporte HTTP: requests sem `id` recebem `id: null`.
    /// Corpos que não são UTF-8 válido também recebem o envelope de erro.
    pub async fn handle_body(&self, body: impl AsRef<[u8]>) -> JsonRpcResponse {
        match JsonRpcRequest::parse_bytes(body.as_ref()) {
            Ok(request) => self.handle_request(request).await,
            Err(failure) => {
                tracing::debug!(id = %failure.id, error = %failure.message, "Malformed request");
                failure.into()
            }
        }
    }

    /// Processa uma linha do transporte stdio.
    ///
    /// Notificações (sem `id`) não recebem resposta segundo JSON-RPC 2.0.
    pub async fn handle_message(&self, line: impl AsRef<[u8]>) -> Option<JsonRpcResponse> {
        match JsonRpcRequest::parse_bytes(line.as_ref()) {
            Ok(request) if request.is_notification() => {
                tracing::debug!(method = %request.method, "Notification received");
                None
            }
            Ok(request) => Some(self.handle_request(request).await),
            Err(failure) => {
                tracing::debug!(id = %failure.id, error = %failure.message, "Malformed message");
                Some(failure.into())
            }
        }
    }

    /// Roteia uma request já interpretada.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %request.method, id = ?request.id, "Handling request");

        match request.method.as_str() {
            "initialize" | "tools/list" => {
                JsonRpcResponse::success(request.id, self.catalog_value.clone())
            }
            "tools/call" => self.handle_tools_call(request).await,
            "notifications/initialized" | "initialized" | "ping" => {
                JsonRpcResponse::success(request.id, json!({}))
            }
            _ => JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method)),
        }
    }

    /// Handler para tools/call.
    ///
    /// O resultado é sempre um sucesso JSON-RPC; falhas viram texto.
    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params = CallToolParams::from_params(request.params.as_ref());

        let result = self
            .registry
            .call(&params.name, params.query(), self.style)
            .await;

        match serde_json::to_value(&result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(request.id, JsonRpcError::internal_error(e.to_string())),
        }
    }
}

/// Loop MCP sobre stdio (ou qualquer par leitor/escritor).
pub struct McpServer<R, W> {
    transport: LineTransport<R, W>,
    dispatcher: Arc<Dispatcher>,
}

impl McpServer<std::io::BufReader<std::io::Stdin>, std::io::BufWriter<std::io::Stdout>> {
    /// Cria o servidor sobre stdin/stdout.
    pub fn stdio(dispatcher: Arc<Dispatcher>) -> Self {
        Self::new(StdioTransport::stdio(), dispatcher)
    }
}

impl<R: BufRead, W: Write> McpServer<R, W> {
    pub fn new(transport: LineTransport<R, W>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            transport,
            dispatcher,
        }
    }

    /// Processa mensagens até EOF.
    pub async fn run(&mut self) -> FactCheckResult<()> {
        tracing::info!(
            style = %self.dispatcher.style(),
            tools = self.dispatcher.registry().len(),
            "MCP stdio server starting"
        );

        loop {
            // Linhas com bytes inválidos chegam aqui intactas e recebem o
            // envelope de erro; só EOF ou falha de I/O encerram o loop.
            let line = match self.transport.read_message() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::info!("Client disconnected");
                    break;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read message");
                    break;
                }
            };

            if let Some(response) = self.dispatcher.handle_message(&line).await {
                if let Err(e) = self.transport.write_response(&response) {
                    tracing::error!(error = %e, "Failed to write response");
                }
            }
        }

        tracing::info!("MCP stdio server stopped");
        Ok(())
    }

    /// Devolve o transporte (usado em testes para ler a saída).
    pub fn into_transport(self) -> LineTransport<R, W> {
        self.transport
    }
}
