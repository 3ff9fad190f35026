//! Trait base para backends de busca.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::sources::BackendKind;
use crate::types::config::Config;
use crate::{FactCheckError, FactCheckResult};

/// Tamanho máximo do corpo de erro do provedor mantido na mensagem.
const MAX_ERROR_BODY: usize = 200;

/// Trait para provedores de busca externos.
///
/// Cada backend encapsula a API de um provedor e devolve os itens brutos
/// (objetos JSON do provedor). A normalização acontece em outro lugar.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Retorna o nome do backend.
    fn name(&self) -> &str;

    /// Retorna o tipo de provedor, que decide como os itens são normalizados.
    fn kind(&self) -> BackendKind;

    /// Verifica se há credenciais.
    fn is_configured(&self) -> bool;

    /// Faz uma consulta e devolve no máximo `cap` itens brutos.
    ///
    /// Falha com [`FactCheckError::MissingCredentials`] antes de qualquer I/O
    /// de rede quando o backend não está configurado.
    async fn search(&self, query: &str, cap: usize) -> FactCheckResult<Vec<Value>>;
}

/// Página de resultados dos dois provedores: só `items` é lido.
#[derive(Debug, Deserialize)]
struct SearchPage {
    #[serde(default)]
    items: Vec<Value>,
}

/// Monta o cliente HTTP compartilhado pelos backends.
pub fn build_http_client(config: &Config) -> FactCheckResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(config.backends.user_agent.clone())
        .timeout(Duration::from_secs(config.general.timeout_secs))
        .build()
        .map_err(|e| FactCheckError::config(format!("failed to build HTTP client: {}", e)))
}

/// Lê o array `items` de uma resposta do provedor.
///
/// Status fora de 2xx viram [`FactCheckError::BackendStatus`]; uma página sem
/// `items` é um resultado vazio.
pub(crate) async fn read_items(
    backend: &str,
    response: reqwest::Response,
) -> FactCheckResult<Vec<Value>> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(FactCheckError::BackendStatus {
            backend: backend.to_string(),
            status: status.as_u16(),
            body: truncate(&body, MAX_ERROR_BODY),
        });
    }

    let page: SearchPage = response
        .json()
        .await
        .map_err(|e| FactCheckError::from_http(backend, e))?;

    Ok(page.items)
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let mut cut: String = trimmed.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}
