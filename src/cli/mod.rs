//! Interface de linha de comando do servidor de checagem.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::evidence::RenderStyle;

/// FactCheck - servidor MCP de agregação de evidências e pontuação de confiança.
#[derive(Parser, Debug)]
#[command(name = "factcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "factcheck.toml", global = true)]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cria um factcheck.toml padrão.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Inicia o servidor MCP (stdio por padrão).
    Serve {
        /// Usa o binding HTTP em vez de stdio.
        #[arg(long)]
        http: bool,

        /// Endereço HTTP (padrão: server.bind do config).
        #[arg(short, long)]
        bind: Option<String>,

        /// Estilo de renderização.
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Executa uma ferramenta uma vez e imprime o texto.
    Check {
        /// Nome da ferramenta (ex.: query_public_data).
        tool: String,

        /// Afirmação ou termo a verificar.
        query: String,

        /// Estilo de renderização (padrão: badge).
        #[arg(short, long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Lista as fontes de evidência configuradas.
    Sources,

    /// Diagnostica credenciais e configuração.
    Doctor,

    /// Mostra versão.
    Version,
}
