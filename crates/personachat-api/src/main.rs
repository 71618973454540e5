//! Persona Chat CLI and REST API entry point.
//!
//! Binary name: `pchat`
//!
//! Parses CLI arguments, loads configuration from the data directory, then
//! dispatches to the appropriate command handler or starts the REST API server.

mod cli;
mod http;
mod state;

use clap::Parser;

use cli::{CharacterAction, Cli, Commands, ConversationAction};
use personachat_infra::config::{load_service_config, resolve_data_dir};
use personachat_infra::sqlite::character::SqliteCharacterRepository;
use personachat_infra::sqlite::conversation::SqliteConversationRepository;
use personachat_observe::tracing_setup::{init_tracing, shutdown_tracing, TracingOptions};
use state::{open_database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,personachat_core=debug,personachat_infra=debug",
        _ => "trace",
    };

    init_tracing(&TracingOptions {
        default_filter: filter.to_string(),
        json: cli.log_json,
        otel: cli.otel,
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let output = cli.output();
    let data_dir = resolve_data_dir();
    let config = load_service_config(&data_dir).await;

    match cli.command {
        Commands::Serve { port, host } => {
            let state = AppState::init(&data_dir, &config).await?;

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            tracing::info!(%addr, data_dir = %data_dir.display(), "Server listening");
            if !cli.quiet {
                println!(
                    "  {} Persona Chat API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            if !cli.quiet {
                println!("\n  Server stopped.");
            }
        }

        Commands::Chat {
            user,
            character,
            message,
        } => {
            let state = AppState::init(&data_dir, &config).await?;
            cli::chat::chat(&state, user, character, message, output).await?;
        }

        Commands::Character { action } => {
            let repo = SqliteCharacterRepository::new(open_database(&data_dir).await?);
            match action {
                CharacterAction::Set { id, prompt, name } => {
                    cli::character::set_character(&repo, &id, &prompt, &name, output).await?;
                }
                CharacterAction::Show { id } => {
                    cli::character::show_character(&repo, &id, output).await?;
                }
            }
        }

        Commands::Conversation { action } => {
            let repo = SqliteConversationRepository::new(open_database(&data_dir).await?);
            match action {
                ConversationAction::Show { session_id } => {
                    cli::conversation::show_conversation(&repo, &session_id, output).await?;
                }
                ConversationAction::List { user, limit } => {
                    cli::conversation::list_conversations(&repo, &user, limit, output).await?;
                }
            }
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
