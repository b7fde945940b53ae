use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use prd_api::config::{ApiConfig, CorsConfig};
use prd_api::handlers;
use prd_api::helpers::llm::{OpenAIProviderFactory, ProviderFactory};
use prd_api::research::ServiceSettings;
use prd_api::storage::{self, DocumentStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "prd-api", version, about = "PRD Expert market research API")]
struct Args {
    /// Config file to use instead of the default search locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config =
        ApiConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level)),
        )
        .init();

    if config.openai.api_key.is_none() {
        warn!("No default OpenAI API key configured; requests must supply openai_api_key");
    }

    let store: Arc<dyn DocumentStore> = storage::connect(&config.database)
        .await
        .context("Failed to open document store")?;
    let providers: Arc<dyn ProviderFactory> =
        Arc::new(OpenAIProviderFactory::from_config(&config.openai));
    let settings = ServiceSettings::from_config(&config);

    let (host, port) = config.bind_address();
    info!("Starting prd-api server at http://{}:{}/api", host, port);

    let cors_config = config.cors.clone();
    let server_store = store.clone();
    let result = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(build_cors(&cors_config))
            .app_data(web::Data::new(server_store.clone()))
            .app_data(web::Data::new(providers.clone()))
            .app_data(web::Data::new(settings.clone()))
            .configure(handlers::configure)
    })
    .bind((host, port))?
    .run()
    .await;

    store.close().await;
    info!("prd-api stopped");

    result.context("HTTP server failed")
}

fn build_cors(config: &CorsConfig) -> Cors {
    if config.allowed_origins.iter().any(|origin| origin == "*") {
        return Cors::permissive();
    }

    config
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allow_any_method()
        .allow_any_header()
        .supports_credentials()
}
