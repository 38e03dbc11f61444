//! The detail overlay. Each handler drives the presenter and answers with the
//! overlay fragment for the resulting state, which htmx swaps into `#overlay`.

use crate::{error::Error, state::AppState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use libphotomap::map::MarkerId;
use minijinja::context;

const OVERLAY_TEMPLATE: &str = "_overlay.html.j2";

pub(super) async fn show_overlay(State(state): State<AppState>) -> impl IntoResponse {
    let overlay = state.context.read().await.overlay();
    state.render_template(OVERLAY_TEMPLATE, context!(overlay => overlay))
}

pub(super) async fn select_marker(
    State(state): State<AppState>,
    Path(id): Path<MarkerId>,
) -> Result<impl IntoResponse, Error> {
    let overlay = state.context.write().await.select(id)?;
    Ok(state.render_template(OVERLAY_TEMPLATE, context!(overlay => overlay)))
}

pub(super) async fn dismiss_overlay(State(state): State<AppState>) -> impl IntoResponse {
    state.context.write().await.dismiss();
    state.render_template(OVERLAY_TEMPLATE, context!(overlay => None::<()>))
}
