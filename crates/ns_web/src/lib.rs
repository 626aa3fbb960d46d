use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;
pub mod ui;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();
    let audio = ServeDir::new(&state.audio_dir);

    Router::new()
        .route("/", get(ui::index))
        .route("/ui", post(ui::analyze))
        .route("/health", get(handlers::health))
        .route("/news/:company_name", get(handlers::get_news))
        .route("/fetch-news", post(handlers::fetch_news))
        .route("/fetch-news/", post(handlers::fetch_news))
        .route("/generate-tts", post(handlers::generate_tts))
        .route("/generate-tts/", post(handlers::generate_tts))
        .nest_service("/audio", audio)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

pub async fn serve(state: AppState, address: &str) -> ns_core::Result<()> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("🚀 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use crate::{create_app, serve, AppState};
    pub use ns_core::{Error, Result};
}

#[cfg(test)]
mod tests;
