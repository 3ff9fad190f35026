//! Tipos do protocolo MCP (Model Context Protocol).
//!
//! O MCP usa JSON-RPC 2.0 como protocolo de transporte. O `id` de uma request
//! pode ser qualquer valor JSON e é devolvido sem alteração; quando ausente,
//! a response carrega `null`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ═══════════════════════════════════════════════════════════════════════════
// Códigos de erro
// ═══════════════════════════════════════════════════════════════════════════

/// Erro de parse - JSON inválido.
pub const PARSE_ERROR: i32 = -32700;

/// Request inválida.
pub const INVALID_REQUEST: i32 = -32600;

/// Método não encontrado.
pub const METHOD_NOT_FOUND: i32 = -32601;

/// Parâmetros inválidos.
pub const INVALID_PARAMS: i32 = -32602;

/// Erro interno do servidor.
///
/// O dispatcher responde com este código para toda falha de protocolo,
/// incluindo parse e método desconhecido; os demais códigos existem para
/// clientes que os interpretam.
pub const INTERNAL_ERROR: i32 = -32603;

/// Versão JSON-RPC.
pub const JSONRPC_VERSION: &str = "2.0";

// ═══════════════════════════════════════════════════════════════════════════
// Tipos básicos JSON-RPC
// ═══════════════════════════════════════════════════════════════════════════

/// Request JSON-RPC 2.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Versão do protocolo (tolerada quando ausente).
    #[serde(default = "default_jsonrpc")]
    pub jsonrpc: String,

    /// ID da request (ausente em notificações).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Nome do método a ser chamado.
    pub method: String,

    /// Parâmetros do método (opcional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

fn default_jsonrpc() -> String {
    JSONRPC_VERSION.to_string()
}

/// Falha ao interpretar o corpo de uma request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseFailure {
    /// `id` recuperado antes da falha (`null` se nenhum).
    pub id: Value,

    /// Texto do erro de parse.
    pub message: String,
}

impl JsonRpcRequest {
    /// Cria uma nova request.
    pub fn new(method: impl Into<String>, id: Option<Value>) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id,
            method: method.into(),
            params: None,
        }
    }

    /// Adiciona parâmetros à request.
    pub fn with_params(mut self, params: Value) -> Self {
        self.params = Some(params);
        self
    }

    /// Verifica se é uma notificação (sem ID).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Interpreta um corpo JSON.
    ///
    /// Primeiro como JSON genérico (para recuperar o `id`), depois como
    /// envelope. Uma falha na segunda etapa mantém o `id` já lido.
    pub fn parse(body: &str) -> Result<Self, ParseFailure> {
        Self::parse_bytes(body.as_bytes())
    }

    /// Igual a [`parse`](Self::parse), sobre bytes brutos.
    ///
    /// Bytes que não são UTF-8 válido viram uma [`ParseFailure`] com `id`
    /// nulo, como qualquer outro JSON malformado.
    pub fn parse_bytes(body: &[u8]) -> Result<Self, ParseFailure> {
        let value: Value = serde_json::from_slice(body).map_err(|e| ParseFailure {
            id: Value::Null,
            message: e.to_string(),
        })?;

        let id = value.get("id").cloned().unwrap_or(Value::Null);

        serde_json::from_value(value).map_err(|e| ParseFailure {
            id,
            message: e.to_string(),
        })
    }
}

/// Response JSON-RPC 2.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Versão do protocolo (sempre "2.0").
    pub jsonrpc: String,

    /// ID da request original (sempre serializado).
    #[serde(default)]
    pub id: Value,

    /// Resultado em caso de sucesso.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,

    /// Erro em caso de falha.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Cria uma response de sucesso.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: id.unwrap_or(Value::Null),
            result: Some(result),
            error: None,
        }
    }

    /// Cria uma response de erro.
    pub fn error(id: Option<Value>, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: default_jsonrpc(),
            id: id.unwrap_or(Value::Null),
            result: None,
            error: Some(error),
        }
    }

    /// Verifica se a response é um erro.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl From<ParseFailure> for JsonRpcResponse {
    fn from(failure: ParseFailure) -> Self {
        Self::error(
            Some(failure.id),
            JsonRpcError::internal_error(failure.message),
        )
    }
}

/// Erro JSON-RPC.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonRpcError {
    /// Código do erro.
    pub code: i32,

    /// Mensagem de erro.
    pub message: String,
}

impl JsonRpcError {
    /// Cria um novo erro.
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Erro interno.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    /// Método sem handler (reportado como erro interno).
    pub fn method_not_found(method: &str) -> Self {
        Self::internal_error(format!("Method not found: {}", method))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tipos MCP específicos
// ═══════════════════════════════════════════════════════════════════════════

/// Informações do servidor MCP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    /// Nome do servidor.
    pub name: String,

    /// Versão do servidor.
    pub version: String,
}

impl ServerInfo {
    /// Cria as informações do servidor com a versão do crate.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Capacidades do servidor.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerCapabilities {
    /// Capacidades de ferramentas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<ToolsCapability>,
}

/// Capacidade de ferramentas (serializada como `{}`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolsCapability {
    /// Suporta notificação de mudança na lista.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_changed: Option<bool>,
}

/// Descrição de uma ferramenta MCP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescription {
    /// Nome da ferramenta.
    pub name: String,

    /// Descrição da ferramenta.
    pub description: String,

    /// Schema de entrada (JSON Schema).
    pub input_schema: Value,
}

impl ToolDescription {
    /// Cria uma nova descrição de ferramenta.
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Catálogo estático: devolvido em GET, `initialize` e `tools/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Versão do protocolo suportada.
    pub protocol_version: String,

    /// Capacidades do servidor.
    pub capabilities: ServerCapabilities,

    /// Informações do servidor.
    pub server_info: ServerInfo,

    /// Ferramentas disponíveis.
    pub tools: Vec<ToolDescription>,
}

impl Catalog {
    /// Cria um catálogo com capacidade de ferramentas habilitada.
    pub fn new(
        protocol_version: impl Into<String>,
        server_info: ServerInfo,
        tools: Vec<ToolDescription>,
    ) -> Self {
        Self {
            protocol_version: protocol_version.into(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
            server_info,
            tools,
        }
    }
}

/// Parâmetros para chamada de ferramenta.
///
/// Campos ausentes não são erro de protocolo: nome vazio cai em
/// "ferramenta desconhecida" e query ausente vira string vazia.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallToolParams {
    /// Nome da ferramenta.
    #[serde(default)]
    pub name: String,

    /// Argumentos da ferramenta.
    #[serde(default)]
    pub arguments: Value,
}

impl CallToolParams {
    /// Extrai os parâmetros de `params`, tolerando formatos inesperados.
    pub fn from_params(params: Option<&Value>) -> Self {
        let Some(params) = params else {
            return Self::default();
        };

        Self {
            name: params
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            arguments: params.get("arguments").cloned().unwrap_or(Value::Null),
        }
    }

    /// `arguments.query`, ou string vazia.
    pub fn query(&self) -> &str {
        self.arguments
            .get("query")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

/// Conteúdo retornado por uma ferramenta.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Conteúdo de texto.
    Text { text: String },
}

impl ToolContent {
    /// Cria conteúdo de texto.
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }
}

/// Resultado de chamada de ferramenta.
///
/// Falhas de backend também chegam aqui como texto: o cliente recebe uma
/// response de sucesso cujo conteúdo descreve o erro.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    /// Conteúdo retornado.
    pub content: Vec<ToolContent>,
}

impl ToolResult {
    /// Cria um resultado com um único bloco de texto.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::text(text)],
        }
    }

    /// Texto do primeiro bloco.
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().map(|c| match c {
            ToolContent::Text { text } => text.as_str(),
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Testes
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_request() {
        let body = r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#;
        let request = JsonRpcRequest::parse(body).unwrap();

        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.method, "initialize");
        assert_eq!(request.id, Some(json!(1)));
    }

    #[test]
    fn test_parse_without_jsonrpc_field() {
        let request = JsonRpcRequest::parse(r#"{"id":"abc","method":"tools/list"}"#).unwrap();
        assert_eq!(request.jsonrpc, "2.0");
        assert_eq!(request.id, Some(json!("abc")));
    }

    #[test]
    fn test_parse_invalid_json_has_null_id() {
        let failure = JsonRpcRequest::parse("{not json").unwrap_err();
        assert_eq!(failure.id, Value::Null);
        assert!(!failure.message.is_empty());
    }

    #[test]
    fn test_parse_bytes_invalid_utf8() {
        let failure = JsonRpcRequest::parse_bytes(b"{\"id\":9,\"method\":\"\xff\"}").unwrap_err();
        assert_eq!(failure.id, Value::Null);
        assert!(!failure.message.is_empty());

        let request = JsonRpcRequest::parse_bytes(br#"{"id":2,"method":"ping"}"#).unwrap();
        assert_eq!(request.id, Some(json!(2)));
        assert_eq!(request.method, "ping");
    }

    #[test]
    fn test_parse_invalid_structure_keeps_id() {
        let failure = JsonRpcRequest::parse(r#"{"id":7,"method":42}"#).unwrap_err();
        assert_eq!(failure.id, json!(7));

        let failure = JsonRpcRequest::parse(r#"{"id":{"k":"v"}}"#).unwrap_err();
        assert_eq!(failure.id, json!({"k": "v"}));
        assert!(failure.message.contains("method"));
    }

    #[test]
    fn test_parse_failure_into_response() {
        let response: JsonRpcResponse = ParseFailure {
            id: json!(3),
            message: "bad".to_string(),
        }
        .into();

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 3, "error": {"code": -32603, "message": "bad"}})
        );
    }

    #[test]
    fn test_response_without_id_serializes_null() {
        let response = JsonRpcResponse::success(None, json!({}));
        let text = serde_json::to_string(&response).unwrap();
        assert!(text.contains("\"id\":null"));
        assert!(!text.contains("\"error\""));
    }

    #[test]
    fn test_id_echoed_verbatim() {
        let id = json!({"nested": [1, "two"]});
        let response = JsonRpcResponse::success(Some(id.clone()), json!({}));
        assert_eq!(response.id, id);
    }

    #[test]
    fn test_method_not_found_uses_internal_code() {
        let error = JsonRpcError::method_not_found("foo/bar");
        assert_eq!(error.code, INTERNAL_ERROR);
        assert_eq!(error.message, "Method not found: foo/bar");
    }

    #[test]
    fn test_catalog_shape() {
        let catalog = Catalog::new(
            "2024-11-05",
            ServerInfo::new("FactCheck-Master"),
            vec![ToolDescription::new(
                "search_news_fact",
                "desc",
                json!({"type": "object"}),
            )],
        );

        let value = serde_json::to_value(&catalog).unwrap();
        assert_eq!(value["protocolVersion"], "2024-11-05");
        assert_eq!(value["capabilities"], json!({"tools": {}}));
        assert_eq!(value["serverInfo"]["name"], "FactCheck-Master");
        assert_eq!(value["tools"][0]["inputSchema"]["type"], "object");
    }

    #[test]
    fn test_call_params_defaults() {
        let params = CallToolParams::from_params(None);
        assert_eq!(params.name, "");
        assert_eq!(params.query(), "");

        let raw = json!({"name": "verify_rumor_db", "arguments": {}});
        let params = CallToolParams::from_params(Some(&raw));
        assert_eq!(params.name, "verify_rumor_db");
        assert_eq!(params.query(), "");

        let raw = json!({"name": "verify_rumor_db", "arguments": {"query": 5}});
        assert_eq!(CallToolParams::from_params(Some(&raw)).query(), "");
    }

    #[test]
    fn test_tool_result_shape() {
        let result = ToolResult::text("hello");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"content": [{"type": "text", "text": "hello"}]}));
        assert_eq!(result.first_text(), Some("hello"));
    }
}
