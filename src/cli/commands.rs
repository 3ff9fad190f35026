//! Implementação dos comandos CLI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::evidence::RenderStyle;
use crate::mcp::{http, resolve_style, Dispatcher, McpServer, ToolRegistry};
use crate::sources::BackendKind;
use crate::types::config::Config;
use crate::FactCheckResult;

/// Nome do arquivo de configuração criado pelo `init`.
pub const CONFIG_FILE_NAME: &str = "factcheck.toml";

/// Inicializa a configuração no diretório indicado.
pub async fn init(path: Option<PathBuf>) -> FactCheckResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Export credentials (NAVER_CLIENT_ID, NAVER_CLIENT_SECRET, GOOGLE_API_KEY, GOOGLE_CX_ID)");
    println!("  2. Check the setup: factcheck doctor");
    println!("  3. Register the server: claude mcp add factcheck -- factcheck serve");

    Ok(())
}

/// Inicia o servidor MCP.
///
/// stdio usa o estilo `badge` por padrão; HTTP usa `directive`.
pub async fn serve(
    http_mode: bool,
    bind: Option<String>,
    style: Option<RenderStyle>,
    config: &Config,
) -> FactCheckResult<()> {
    config.validate()?;

    tracing::debug!(
        timeout_secs = config.general.timeout_secs,
        sources = config.enabled_sources().count(),
        "Configuration loaded"
    );

    if http_mode {
        let style = resolve_style(style, config, RenderStyle::Directive);
        let dispatcher = Arc::new(Dispatcher::from_config(config, style)?);
        let bind = bind.unwrap_or_else(|| config.server.bind.clone());
        return http::serve(&bind, dispatcher).await;
    }

    if bind.is_some() {
        tracing::warn!("--bind is ignored without --http");
    }

    let style = resolve_style(style, config, RenderStyle::Badge);
    let dispatcher = Arc::new(Dispatcher::from_config(config, style)?);
    McpServer::stdio(dispatcher).run().await
}

/// Executa uma ferramenta e imprime o texto renderizado.
pub async fn check(
    tool: &str,
    query: &str,
    style: Option<RenderStyle>,
    config: &Config,
) -> FactCheckResult<()> {
    config.validate()?;

    let style = resolve_style(style, config, RenderStyle::Badge);
    let registry = ToolRegistry::from_config(config)?;

    let result = registry.call(tool, query, style).await;
    println!("{}", result.first_text().unwrap_or_default());

    Ok(())
}

/// Lista as fontes configuradas.
pub fn sources(config: &Config) {
    println!(
        "{:<28} {:<14} {:>3} {:>6}  {}",
        "TOOL", "BACKEND", "CAP", "WEIGHT", "STATUS"
    );

    for source in &config.sources {
        let status = if source.enabled { "enabled" } else { "disabled" };
        println!(
            "{:<28} {:<14} {:>3} {:>6.2}  {}",
            source.tool_name,
            source.backend.as_str(),
            source.item_cap,
            source.weight,
            status
        );
    }
}

/// Diagnostica problemas de configuração.
pub async fn doctor(config: &Config) -> FactCheckResult<()> {
    println!("Checking factcheck configuration...\n");

    let mut issues: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    match config.validate() {
        Ok(()) => println!("✓ Configuration is valid"),
        Err(e) => issues.push(e.to_string()),
    }

    for kind in BackendKind::ALL {
        let tools: Vec<&str> = config
            .enabled_sources()
            .filter(|s| s.backend == kind)
            .map(|s| s.tool_name.as_str())
            .collect();

        if tools.is_empty() {
            println!("○ {} is not used by any enabled source", kind);
            continue;
        }

        let missing = config.credentials.missing_for(kind);
        if missing.is_empty() {
            println!("✓ {} credentials present ({})", kind, tools.join(", "));
        } else {
            warnings.push(format!(
                "{} is missing {}; {} will answer with a configuration notice",
                kind,
                missing.join(", "),
                tools.join(", ")
            ));
        }
    }

    if config.enabled_sources().next().is_none() {
        issues.push("No enabled sources: the catalog is empty".to_string());
    }

    println!();
    if issues.is_empty() && warnings.is_empty() {
        println!("✓ All good! The server is ready.");
    } else {
        if !warnings.is_empty() {
            println!("Warnings:");
            for warning in warnings {
                println!("  ⚠ {}", warning);
            }
        }
        if !issues.is_empty() {
            println!("Problems:");
            for issue in issues {
                println!("  ✗ {}", issue);
            }
        }
    }

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("factcheck {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Evidence aggregation and trust scoring MCP server");
}
