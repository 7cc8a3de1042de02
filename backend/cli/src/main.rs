mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::info;

use pagetalk_gateway::{build_router, GatewayState};
use pagetalk_provider::ClaudeClient;

use config::Config;

#[derive(Parser)]
#[command(name = "pagetalk")]
#[command(about = "PageTalk — streaming relay for chatting with the open web page")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the relay server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Show relay server status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let config = Config {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status => {
            let client = reqwest::Client::new();
            match client
                .get(format!("http://localhost:{}/api/health", config.port))
                .send()
                .await
            {
                Ok(resp) => {
                    let body: serde_json::Value = resp.json().await?;
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Err(_) => {
                    println!("PageTalk is not running on port {}", config.port);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: Config) -> Result<()> {
    let api_key = config
        .api_key
        .clone()
        .context("ANTHROPIC_API_KEY is not set")?;

    let mut provider = ClaudeClient::new(api_key);
    if let Some(url) = &config.api_url {
        provider = provider.with_api_url(url.clone());
    }

    let state = GatewayState {
        provider: Arc::new(provider),
        model: config.model.clone(),
        context_limit_tokens: config.context_limit_tokens,
    };

    let app = build_router(state);
    let addr = format!("{}:{}", config.bind_address, config.port);
    info!(
        addr = %addr,
        model = %config.model,
        context_limit_tokens = config.context_limit_tokens,
        "PageTalk relay listening"
    );

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
