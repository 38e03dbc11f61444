use crate::state::AppState;
use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

mod markers;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(map_config))
        .merge(markers::router())
}

async fn map_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.context.read().await.config().clone())
}
