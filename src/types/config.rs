//! Configuração do servidor de checagem.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::evidence::RenderStyle;
use crate::sources::{default_sources, BackendKind, EvidenceSource};
use crate::{FactCheckError, FactCheckResult};

/// Variáveis de ambiente com as credenciais dos backends.
pub const ENV_NAVER_CLIENT_ID: &str = "NAVER_CLIENT_ID";
pub const ENV_NAVER_CLIENT_SECRET: &str = "NAVER_CLIENT_SECRET";
pub const ENV_GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_GOOGLE_CX_ID: &str = "GOOGLE_CX_ID";

/// Configuração principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configurações gerais.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Configurações do protocolo/servidor.
    #[serde(default)]
    pub server: ServerConfig,

    /// Endpoints dos backends.
    #[serde(default)]
    pub backends: BackendsConfig,

    /// Credenciais dos backends (variáveis de ambiente preenchem as lacunas).
    #[serde(default)]
    pub credentials: Credentials,

    /// Tabela de fontes de evidência.
    #[serde(default = "default_sources")]
    pub sources: Vec<EvidenceSource>,
}

/// Configurações gerais.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Nível de log (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Formato de log (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Timeout de uma chamada a backend (em segundos).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Força um único estilo de renderização em todos os transportes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_style: Option<RenderStyle>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            timeout_secs: default_timeout(),
            render_style: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Configurações do protocolo/servidor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Endereço do binding HTTP.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Nome informado em `serverInfo`.
    #[serde(default = "default_server_name")]
    pub name: String,

    /// Versão do protocolo informada no catálogo.
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            name: default_server_name(),
            protocol_version: default_protocol_version(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_server_name() -> String {
    "FactCheck-Master".to_string()
}

fn default_protocol_version() -> String {
    "2024-11-05".to_string()
}

/// Endpoints dos backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendsConfig {
    /// Endpoint da busca de notícias.
    #[serde(default = "default_news_endpoint")]
    pub news_endpoint: String,

    /// Endpoint da busca web restrita por site.
    #[serde(default = "default_web_search_endpoint")]
    pub web_search_endpoint: String,

    /// User-Agent enviado em toda request aos backends.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            news_endpoint: default_news_endpoint(),
            web_search_endpoint: default_web_search_endpoint(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_news_endpoint() -> String {
    "https://openapi.naver.com/v1/search/news.json".to_string()
}

fn default_web_search_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_user_agent() -> String {
    format!("factcheck-mcp/{}", env!("CARGO_PKG_VERSION"))
}

/// Credenciais dos backends.
///
/// Valores em branco contam como ausentes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naver_client_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naver_client_secret: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_cx_id: Option<String>,
}

impl Credentials {
    /// Preenche valores ausentes a partir do ambiente do processo.
    pub fn resolve(self) -> Self {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Preenche valores ausentes usando `lookup` (injetável em testes).
    pub fn resolve_with<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |value: Option<String>, key: &str| {
            non_blank(value).or_else(|| non_blank(lookup(key)))
        };

        Self {
            naver_client_id: pick(self.naver_client_id, ENV_NAVER_CLIENT_ID),
            naver_client_secret: pick(self.naver_client_secret, ENV_NAVER_CLIENT_SECRET),
            google_api_key: pick(self.google_api_key, ENV_GOOGLE_API_KEY),
            google_cx_id: pick(self.google_cx_id, ENV_GOOGLE_CX_ID),
        }
    }

    /// Credenciais de notícias como par `(id, secret)`, se ambas existirem.
    pub fn naver(&self) -> Option<(String, String)> {
        match (
            non_blank(self.naver_client_id.clone()),
            non_blank(self.naver_client_secret.clone()),
        ) {
            (Some(id), Some(secret)) => Some((id, secret)),
            _ => None,
        }
    }

    /// Credenciais da busca web como par `(key, engine id)`, se ambas existirem.
    pub fn google(&self) -> Option<(String, String)> {
        match (
            non_blank(self.google_api_key.clone()),
            non_blank(self.google_cx_id.clone()),
        ) {
            (Some(key), Some(cx)) => Some((key, cx)),
            _ => None,
        }
    }

    /// Variáveis de ambiente que ainda faltam para um backend.
    pub fn missing_for(&self, kind: BackendKind) -> Vec<&'static str> {
        let checks: [(&Option<String>, &'static str); 2] = match kind {
            BackendKind::NaverNews => [
                (&self.naver_client_id, ENV_NAVER_CLIENT_ID),
                (&self.naver_client_secret, ENV_NAVER_CLIENT_SECRET),
            ],
            BackendKind::CustomSearch => [
                (&self.google_api_key, ENV_GOOGLE_API_KEY),
                (&self.google_cx_id, ENV_GOOGLE_CX_ID),
            ],
        };

        checks
            .iter()
            .filter(|(value, _)| non_blank((*value).clone()).is_none())
            .map(|(_, key)| *key)
            .collect()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Carrega configuração de um arquivo TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> FactCheckResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Salva configuração em um arquivo TOML.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FactCheckResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Cria configuração padrão.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            server: ServerConfig::default(),
            backends: BackendsConfig::default(),
            credentials: Credentials::default(),
            sources: default_sources(),
        }
    }

    /// Tenta carregar do diretório atual ou usa o padrão.
    pub fn load_or_default() -> Self {
        Self::load("factcheck.toml").unwrap_or_else(|_| Self::default_config())
    }

    /// Valida cada fonte e a unicidade de nomes e nomes de ferramenta.
    pub fn validate(&self) -> FactCheckResult<()> {
        let mut names = HashSet::new();
        let mut tools = HashSet::new();

        for source in &self.sources {
            source.validate()?;
            if !names.insert(source.name.as_str()) {
                return Err(FactCheckError::config(format!(
                    "duplicate source name '{}'",
                    source.name
                )));
            }
            if !tools.insert(source.tool_name.as_str()) {
                return Err(FactCheckError::config(format!(
                    "duplicate tool name '{}'",
                    source.tool_name
                )));
            }
        }

        if self.general.timeout_secs == 0 {
            return Err(FactCheckError::config("timeout_secs must be greater than zero"));
        }

        Ok(())
    }

    /// Fontes expostas como ferramentas, na ordem de declaração.
    pub fn enabled_sources(&self) -> impl Iterator<Item = &EvidenceSource> {
        self.sources.iter().filter(|s| s.enabled)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        config.validate().unwrap();
        assert_eq!(config.enabled_sources().count(), 4);
        assert_eq!(config.general.timeout_secs, 10);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [general]
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.general.log_format, "text");
        assert_eq!(config.sources.len(), 4);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_toml_roundtrip_keeps_sources() {
        let config = Config::default_config();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.sources, config.sources);
    }

    #[test]
    fn test_render_style_override() {
        let config: Config = toml::from_str(
            r#"
            [general]
            render_style = "directive"
            "#,
        )
        .unwrap();
        assert_eq!(config.general.render_style, Some(RenderStyle::Directive));
    }

    #[test]
    fn test_scholarly_can_be_disabled() {
        let mut config = Config::default_config();
        for source in config.sources.iter_mut() {
            if source.name == "scholarly" {
                source.enabled = false;
            }
        }
        let tools: Vec<&str> = config.enabled_sources().map(|s| s.tool_name.as_str()).collect();
        assert_eq!(
            tools,
            vec!["search_news_fact", "query_public_data", "verify_rumor_db"]
        );
    }

    #[test]
    fn test_duplicate_tool_name_rejected() {
        let mut config = Config::default_config();
        config.sources[1].tool_name = config.sources[0].tool_name.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_resolve_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_NAVER_CLIENT_ID, "id"),
            (ENV_NAVER_CLIENT_SECRET, "secret"),
            (ENV_GOOGLE_API_KEY, "   "),
        ]
        .into_iter()
        .collect();

        let creds = Credentials {
            google_cx_id: Some("cx".to_string()),
            ..Default::default()
        }
        .resolve_with(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(creds.naver(), Some(("id".to_string(), "secret".to_string())));
        assert!(creds.google().is_none());
        assert_eq!(
            creds.missing_for(BackendKind::CustomSearch),
            vec![ENV_GOOGLE_API_KEY]
        );
        assert!(creds.missing_for(BackendKind::NaverNews).is_empty());
    }

    #[test]
    fn test_config_value_wins_over_env() {
        let creds = Credentials {
            google_api_key: Some("from-file".to_string()),
            ..Default::default()
        }
        .resolve_with(|_| Some("from-env".to_string()));

        assert_eq!(creds.google_api_key.as_deref(), Some("from-file"));
        assert_eq!(creds.google_cx_id.as_deref(), Some("from-env"));
    }
}
