use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tokio::signal;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::rest;
use crate::service::NoteService;
use crate::summary::SummaryService;

/// Shared state handed to every handler. Both services are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub summarizer: SummaryService,
}

/// Assembles the full application router: the JSON API, the OpenAPI UI and
/// the static browser client (served for every path the API does not claim).
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/notes", post(rest::create_note))
        .route("/api/notes", get(rest::get_all_notes))
        .route("/api/notes/{id}", get(rest::get_one_note))
        .route("/api/notes/{id}", put(rest::update_note))
        .route("/api/notes/{id}", delete(rest::delete_note))
        .route("/api/summarize", post(rest::summarize))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .fallback_service(ServeDir::new("static"))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Resolves on Ctrl-C or SIGTERM; used to drain the server before the store
/// handle is released.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
