//! Backend de busca web restrita por site.

use async_trait::async_trait;
use serde_json::Value;

use super::base::{read_items, SearchBackend};
use crate::sources::BackendKind;
use crate::types::config::Config;
use crate::{FactCheckError, FactCheckResult};

/// Cliente da API JSON de busca personalizada.
///
/// O escopo (`site:go.kr ...`) faz parte da query montada pela fonte de
/// evidência. Os itens trazem `title`/`snippet`.
pub struct CustomSearchBackend {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<(String, String)>,
}

impl CustomSearchBackend {
    /// Cria o backend; `credentials` é `(api key, engine id)`.
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
            config.backends.web_search_endpoint.clone(),
            config.credentials.google(),
        )
    }
}

#[async_trait]
impl SearchBackend for CustomSearchBackend {
    fn name(&self) -> &str {
        BackendKind::CustomSearch.as_str()
    }

    fn kind(&self) -> BackendKind {
        BackendKind::CustomSearch
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn search(&self, query: &str, cap: usize) -> FactCheckResult<Vec<Value>> {
        let (api_key, engine_id) =
            self.credentials
                .as_ref()
                .ok_or_else(|| FactCheckError::MissingCredentials {
                    backend: self.name().to_string(),
                })?;

        tracing::debug!(backend = self.name(), query, cap, "Querying web search");

        let num = cap.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", api_key.as_str()),
                ("cx", engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FactCheckError::from_http(self.name(), e))?;

        let mut items = read_items(self.name(), response).await?;
        items.truncate(cap);
        Ok(items)
    }
}
