//! FoodCheck API Server
//!
//! HTTP API server for produce freshness classification. Accepts one image
//! upload per request on the prediction endpoint and returns the JSON
//! verdict. The classifier is loaded once at startup; a missing or corrupt
//! weight record aborts the process before the listener binds.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use foodcheck::backend::{backend_name, default_device, DefaultBackend};
use foodcheck::inference::FreshnessService;
use foodcheck::model::{load_classifier, ModelVariant};

use crate::state::AppState;

/// FoodCheck API Server
#[derive(Parser, Debug)]
#[command(name = "foodcheck-server")]
#[command(version = "0.1.0")]
#[command(about = "HTTP API server for produce freshness classification")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "8000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the trained weight record
    #[arg(short, long, env = "FOODCHECK_MODEL")]
    model: PathBuf,

    /// Model variant: "fine" (6 classes) or "coarse" (2 classes)
    #[arg(long, default_value = "fine", env = "FOODCHECK_VARIANT")]
    variant: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    info!("FoodCheck API Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Model:   {:?}", cli.model);
    info!("  Variant: {}", cli.variant);
    info!("  Backend: {}", backend_name());

    // Load the classifier once; failure here is fatal and the server never
    // starts accepting requests.
    let variant = ModelVariant::from_name(&cli.variant)?;
    let device = default_device();
    let model = load_classifier::<DefaultBackend>(&cli.model, &variant, &device)
        .context("failed to load model weights, refusing to serve")?;
    let service = FreshnessService::new(model, variant)?;

    // Create shared state
    let state = Arc::new(AppState::new(service));

    // Build router
    let app = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/predict", post(routes::predict::predict))
        // Add state
        .with_state(state)
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
