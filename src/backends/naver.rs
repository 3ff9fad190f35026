//! Backend de busca de notícias.

use async_trait::async_trait;
use serde_json::Value;

use super::base::{read_items, SearchBackend};
use crate::sources::BackendKind;
use crate::types::config::Config;
use crate::{FactCheckError, FactCheckResult};

/// Cliente da API de busca de notícias.
///
/// Autentica com um par de headers id/secret; os itens trazem
/// `title`/`description` com `<b>` em volta dos termos encontrados.
pub struct NaverNewsBackend {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<(String, String)>,
}

impl NaverNewsBackend {
    /// Cria o backend; `credentials` é `(client id, client secret)`.
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        credentials: Option<(String, String)>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            credentials,
        }
    }

    /// Cria o backend a partir da configuração resolvida.
    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(
            client,
            config.backends.news_endpoint.clone(),
            config.credentials.naver(),
        )
    }
}

#[async_trait]
impl SearchBackend for NaverNewsBackend {
    fn name(&self) -> &str {
        BackendKind::NaverNews.as_str()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::NaverNews
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn search(&self, query: &str, cap: usize) -> FactCheckResult<Vec<Value>> {
        let (client_id, client_secret) =
            self.credentials
                .as_ref()
                .ok_or_else(|| FactCheckError::MissingCredentials {
                    backend: self.name().to_string(),
                })?;

        tracing::debug!(backend = self.name(), query, cap, "Querying news search");

        let display = cap.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query), ("display", display.as_str())])
            .header("X-Naver-Client-Id", client_id)
            .header("X-Naver-Client-Secret", client_secret)
            .send()
            .await
            .map_err(|e| FactCheckError::from_http(self.name(), e))?;

        read_items(self.name(), response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_credentials_short_circuits() {
        // Endpoint inalcançável: a chamada tem que falhar antes de qualquer I/O.
        let backend = NaverNewsBackend::new(reqwest::Client::new(), "http://0.0.0.0:1/", None);

        assert!(!backend.is_configured());
        let err = backend.search("백신", 3).await.unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default_config();
        config.credentials.naver_client_id = Some("id".to_string());
        config.credentials.naver_client_secret = Some("secret".to_string());

        let backend = NaverNewsBackend::from_config(reqwest::Client::new(), &config);
        assert!(backend.is_configured());
        assert_eq!(backend.kind(), BackendKind::NaverNews);
        assert_eq!(backend.name(), "naver_news");
    }
}
