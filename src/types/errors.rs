//! Tipos de erro do serviço de checagem.

use thiserror::Error;

/// Tipo Result padrão.
pub type FactCheckResult<T> = Result<T, FactCheckError>;

/// Erros do serviço.
#[derive(Error, Debug)]
pub enum FactCheckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing credentials for backend '{backend}'")]
    MissingCredentials { backend: String },

    #[error("Backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },

    #[error("Timed out querying '{backend}'")]
    BackendTimeout { backend: String },

    #[error("Backend '{backend}' returned HTTP {status}: {body}")]
    BackendStatus {
        backend: String,
        status: u16,
        body: String,
    },
}

impl FactCheckError {
    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de backend.
    pub fn backend(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            backend: backend.into(),
            message: message.into(),
        }
    }

    /// Credenciais ausentes: viram texto fixo, não falha de backend.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. })
    }

    /// Converte um erro do `reqwest`, separando timeouts.
    pub fn from_http(backend: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::BackendTimeout {
                backend: backend.to_string(),
            }
        } else {
            Self::backend(backend, err.to_string())
        }
    }
}
