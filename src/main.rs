use std::sync::Arc;

use gpx_guard::config::Config;
use gpx_guard::model::ForestClassifier;
use gpx_guard::state::AppState;
use mimalloc::MiMalloc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpx_guard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    let classifier = match ForestClassifier::load(&config.model_path) {
        Ok(classifier) => classifier,
        Err(err) => {
            tracing::error!("Cannot start without a classifier: {}", err);
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Loaded model {} ({} trees, features: {})",
        config.model_path.display(),
        classifier.tree_count(),
        classifier.feature_names().join(", ")
    );

    let addr = format!("0.0.0.0:{}", config.port);
    let state = AppState::new(config, Arc::new(classifier));
    let app = gpx_guard::app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    tracing::info!("GPX-Guard listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Single: POST http://{}/upload-workout", addr);
    tracing::info!("Multiple: POST http://{}/upload-multiple", addr);
    tracing::info!("Archive: POST http://{}/upload-zip", addr);

    axum::serve(listener, app).await.unwrap();
}
