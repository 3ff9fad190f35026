use clap::Parser;
use factcheck::cli::{Cli, Commands};
use factcheck::types::config::Config;
use factcheck::FactCheckResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> FactCheckResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let (mut config, load_error) = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => (config, None),
            Err(e) => (Config::default_config(), Some(e)),
        }
    } else {
        (Config::default_config(), None)
    };
    config.credentials = config.credentials.resolve();

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("factcheck={}", log_level)
            .parse()
            .unwrap_or_else(|_| "factcheck=info".parse().expect("fallback directive is valid")),
    );

    // stderr only: stdout carries the stdio transport
    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry.with(fmt::layer().with_writer(std::io::stderr)).init();
    }

    if let Some(e) = load_error {
        tracing::warn!(error = %e, "Invalid configuration file, using defaults");
    }
    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            factcheck::cli::commands::init(path).await?;
        }
        Commands::Serve { http, bind, style } => {
            factcheck::cli::commands::serve(http, bind, style, &config).await?;
        }
        Commands::Check { tool, query, style } => {
            factcheck::cli::commands::check(&tool, &query, style, &config).await?;
        }
        Commands::Sources => {
            factcheck::cli::commands::sources(&config);
        }
        Commands::Doctor => {
            factcheck::cli::commands::doctor(&config).await?;
        }
        Commands::Version => {
            factcheck::cli::commands::version();
        }
    }

    Ok(())
}
