use jotter::config::Config;
use jotter::repository::Repository;
use jotter::server::{self, AppState};
use jotter::service::NoteService;
use jotter::summary::SummaryService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let config = Config::from_env();

    // Repository creation and migration
    let repo = Repository::new(&config.db_path).await.unwrap_or_else(|e| {
        tracing::error!("Failed to open database at '{}': {e}", config.db_path);
        panic!("failed to open database: {e}");
    });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let state = AppState {
        notes: NoteService::new(repo.clone()),
        summarizer: SummaryService::new(config.api_url.clone(), config.api_key.clone()),
    };

    // Router config
    let router = server::app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind to port {}: {e}", config.port);
            panic!("failed to bind listener: {e}");
        });
    let addr = listener.local_addr().unwrap();

    tracing::info!("Notes server starting, listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("HTTP server error: {e}");
            panic!("failed to start server: {e}");
        });

    // Release the store handle before exiting so in-flight writes complete.
    repo.close().await;

    tracing::info!("Server stopped");
}
