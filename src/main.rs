use clap::Parser;
use leethelper::cli::commands::{self, AskOptions};
use leethelper::cli::{Cli, Commands};
use leethelper::types::config::Config;
use leethelper::LeetHelperResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> LeetHelperResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = Config::load_or_default(&cli.config);

    // CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("leethelper={}", log_level)
            .parse()
            .unwrap_or_else(|_| "leethelper=info".parse().expect("fallback directive is valid")),
    );

    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            commands::init(path).await?;
        }
        Commands::Get { question, field } => {
            commands::get(&question, field.as_deref(), &config).await?;
        }
        Commands::Set {
            question,
            field,
            value,
        } => {
            commands::set(&question, &field, &value, &config).await?;
        }
        Commands::Clear { question } => {
            commands::clear(&question, &config).await?;
        }
        Commands::ClearAll { yes } => {
            commands::clear_all(yes, &config).await?;
        }
        Commands::List => {
            commands::list(&config).await?;
        }
        Commands::Purge => {
            commands::purge(&config).await?;
        }
        Commands::Ask {
            field,
            question,
            url,
            language,
            code,
            refresh,
        } => {
            let options = AskOptions {
                field,
                question,
                url,
                language,
                code,
                refresh,
            };
            commands::ask(options, &config).await?;
        }
        Commands::ApiKey { key, clear } => {
            commands::api_key(key, clear, &config).await?;
        }
        Commands::Status => {
            commands::status(&config).await?;
        }
        Commands::Config => {
            commands::config_cmd(&cli.config).await?;
        }
        Commands::Version => {
            commands::version();
        }
    }

    Ok(())
}
