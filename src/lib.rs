//! # FactCheck
//!
//! Servidor MCP de agregação de evidências e pontuação de confiança.
//!
//! Cada ferramenta consulta uma categoria de fonte (imprensa, governo,
//! bases de checagem, material acadêmico), normaliza os resultados,
//! calcula uma pontuação de confiança ponderada pela fonte e devolve um
//! relatório em texto para o modelo que está verificando a afirmação.
//!
//! ## Módulos
//!
//! - [`cli`] - Interface de linha de comando
//! - [`mcp`] - Servidor MCP (stdio e HTTP)
//! - [`backends`] - Clientes das APIs de busca
//! - [`evidence`] - Normalização, pontuação e formatação
//! - [`sources`] - Tabela de fontes de evidência
//! - [`types`] - Configuração e erros

pub mod backends;
pub mod cli;
pub mod evidence;
pub mod mcp;
pub mod sources;
pub mod types;

pub use types::config::Config;
pub use types::errors::{FactCheckError, FactCheckResult};
