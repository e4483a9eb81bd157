//! Newscheck API Server
//!
//! HTTP API server that aggregates news headlines and feeds, and runs
//! AI-backed article analysis and claim verification.

mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newscheck_ai::{
    AiProvider, ArticleSummarizer, FakeNewsDetector, HuggingFaceClient, OpenAiClient,
};
use newscheck_services::{AnalysisService, FallbackCatalog, NewsAggregator, NewsCheckConfig};
use newscheck_sources::{
    ArticleFetcher, ClaimBusterClient, FactCheckClient, FactCheckSource, NewsApiClient, RssClient,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<NewsAggregator>,
    pub analysis: Arc<AnalysisService>,
    pub fact_checks: Arc<dyn FactCheckSource>,
    /// Upstream names and whether their credentials are present
    pub upstreams: Vec<(&'static str, bool)>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,newscheck_api=debug")),
        )
        .init();

    info!("Starting Newscheck API");

    let config = NewsCheckConfig::from_env()?;
    for (upstream, configured) in config.configured_upstreams() {
        if configured {
            info!(upstream, "Credentials found");
        } else {
            info!(upstream, "No credentials, upstream will be unavailable");
        }
    }

    let state = build_state(&config);
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Wire the upstream clients into the services
fn build_state(config: &NewsCheckConfig) -> AppState {
    let headlines = NewsApiClient::new(config.news_api_key.clone())
        .with_base_url(config.news_api_base_url.clone())
        .with_timeout(config.data_api_timeout);
    let feeds = RssClient::new().with_timeout(config.data_api_timeout);
    let fact_checks: Arc<dyn FactCheckSource> = Arc::new(
        FactCheckClient::new(config.fact_check_api_key.clone())
            .with_timeout(config.data_api_timeout),
    );
    let scorer = ClaimBusterClient::new(config.claimbuster_api_key.clone())
        .with_timeout(config.data_api_timeout);
    let content = ArticleFetcher::new().with_timeout(config.data_api_timeout);

    let openai = Arc::new(
        OpenAiClient::new()
            .with_model(&config.openai_model)
            .with_timeout(config.ai_timeout),
    );

    let hf = match (config.ai_provider, config.huggingface_api_key.clone()) {
        (AiProvider::HuggingFace, Some(key)) => {
            info!("Using Hugging Face for summaries and misinformation checks");
            Some(Arc::new(
                HuggingFaceClient::new(Some(key)).with_timeout(config.ai_timeout),
            ))
        }
        (AiProvider::HuggingFace, None) => {
            warn!("AI_PROVIDER is huggingface but HUGGINGFACE_API_KEY is not set, using OpenAI");
            None
        }
        (AiProvider::OpenAi, _) => None,
    };
    let (summarizer, detector) = match hf {
        Some(hf) => (
            hf.clone() as Arc<dyn ArticleSummarizer>,
            hf as Arc<dyn FakeNewsDetector>,
        ),
        None => (
            openai.clone() as Arc<dyn ArticleSummarizer>,
            openai.clone() as Arc<dyn FakeNewsDetector>,
        ),
    };

    let aggregator = NewsAggregator::new(
        Arc::new(headlines),
        Arc::new(feeds),
        Arc::new(FallbackCatalog::builtin()),
    );

    let analysis = AnalysisService::new(
        Arc::new(content),
        summarizer,
        detector,
        openai,
        Arc::new(scorer),
        fact_checks.clone(),
    );

    AppState {
        aggregator: Arc::new(aggregator),
        analysis: Arc::new(analysis),
        fact_checks,
        upstreams: config.configured_upstreams(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
