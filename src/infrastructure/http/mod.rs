use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{
    examples::ExampleController,
    health::{self, HealthState},
    speech::SpeechController,
    ui,
};
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::request_id_middleware;

/// Controllers wired into the router
pub struct AppControllers {
    pub health: Arc<HealthState>,
    pub speech: Arc<SpeechController>,
    pub examples: Arc<ExampleController>,
}

/// Build the application router with all routes and layers
pub fn build_router(controllers: AppControllers, max_upload_bytes: usize) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(controllers.health);

    // Speech generation
    let speech_routes = Router::new()
        .route("/generate", post(SpeechController::generate))
        .route("/generate/", post(SpeechController::generate))
        .route("/tts", post(SpeechController::tts))
        .route("/examples/generate", post(SpeechController::generate_from_example))
        .route("/outputs/:name", get(SpeechController::download_output))
        .route("/languages", get(SpeechController::languages))
        .with_state(controllers.speech);

    // Example store CRUD
    let example_routes = Router::new()
        .route(
            "/examples",
            get(ExampleController::list_examples).post(ExampleController::create_example),
        )
        .route(
            "/examples/",
            get(ExampleController::list_examples).post(ExampleController::create_example),
        )
        .route(
            "/examples/:id",
            get(ExampleController::get_example).delete(ExampleController::delete_example),
        )
        .with_state(controllers.examples);

    Router::new()
        .route("/", get(ui::index))
        .merge(health_routes)
        .merge(speech_routes)
        .merge(example_routes)
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Serve the router until Ctrl-C or SIGTERM
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
