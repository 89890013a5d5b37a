use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use voice_clone_backend::controllers::{
    examples::ExampleController, health::HealthState, speech::SpeechController,
};
use voice_clone_backend::domain::examples::ExampleService;
use voice_clone_backend::domain::speech::{ModelType, SpeechService};
use voice_clone_backend::infrastructure::config::{Config, LogFormat};
use voice_clone_backend::infrastructure::db::{check_connection, create_pool, run_migrations};
use voice_clone_backend::infrastructure::http::{build_router, start_http_server, AppControllers};
use voice_clone_backend::infrastructure::repositories::{
    ExampleRepository, RemoteSpeechModel, SpeechModel,
};
use voice_clone_backend::infrastructure::storage::{ExampleFileStore, OutputStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Voice Clone Backend on {}:{}",
        config.host,
        config.port
    );

    // Create database connection pool
    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Database connection pool created");

    run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    // Verify database connection
    check_connection(&pool).await?;
    tracing::info!("Database connection verified");

    // Storage directories
    let example_files = Arc::new(ExampleFileStore::new(config.examples_dir.clone()));
    example_files.ensure_dir().await?;
    tracing::info!(dir = %example_files.dir().display(), "Example audio directory ready");

    let output_store = Arc::new(OutputStore::new(
        config.output_dir.clone(),
        Duration::from_secs(config.output_ttl_secs),
    ));
    let stale = output_store.prepare().await?;
    tracing::info!(
        dir = %output_store.dir().display(),
        removed_stale = stale,
        "Generated audio directory ready"
    );

    // Model handles are created once and shared by every request
    let model_timeout = Duration::from_secs(config.model_timeout_secs);
    let mut models: HashMap<ModelType, Arc<dyn SpeechModel>> = HashMap::new();
    models.insert(
        ModelType::Transformer,
        Arc::new(RemoteSpeechModel::new(
            ModelType::Transformer.as_str(),
            &config.transformer_model_url,
            model_timeout,
        )?),
    );
    tracing::info!(url = %config.transformer_model_url, "Transformer model configured");

    match &config.hybrid_model_url {
        Some(url) => {
            models.insert(
                ModelType::Hybrid,
                Arc::new(RemoteSpeechModel::new(
                    ModelType::Hybrid.as_str(),
                    url,
                    model_timeout,
                )?),
            );
            tracing::info!(url = %url, "Hybrid model configured");
        }
        None => tracing::info!("HYBRID_MODEL_URL not set, hybrid model disabled"),
    }

    let pool = Arc::new(pool);
    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories (inject db pool)
    tracing::info!("Instantiating repositories...");
    let example_repo = Arc::new(ExampleRepository::new(pool.clone()));

    // 2. Instantiate services (inject repositories and model handles)
    tracing::info!("Instantiating services...");
    let speech_service = Arc::new(SpeechService::new(models));
    let example_service = Arc::new(ExampleService::new(example_repo, example_files));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let controllers = AppControllers {
        health: Arc::new(HealthState {
            pool: pool.clone(),
            speech_service: speech_service.clone(),
        }),
        speech: Arc::new(SpeechController::new(
            speech_service,
            example_service.clone(),
            output_store.clone(),
            config.scratch_dir.clone(),
        )),
        examples: Arc::new(ExampleController::new(example_service)),
    };

    let app = build_router(controllers, config.max_upload_bytes);

    // Start HTTP server with all routes
    start_http_server(config, app).await?;

    // Release resources after the server drains
    output_store.purge().await;
    tracing::info!("Generated audio purged");

    pool.close().await;
    tracing::info!("Database pool closed, model handles released");

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_clone_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "voice_clone_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
