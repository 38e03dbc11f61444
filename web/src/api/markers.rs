use crate::{error::Error, state::AppState};
use axum::{
    Json, Router,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
};
use libphotomap::{
    context::LoadStatus,
    loader::SkippedRow,
    map::{Bounds, MapSurface, Marker, MarkerId},
};
use serde::Serialize;

pub(super) fn router() -> Router<AppState> {
    Router::new()
        .route("/markers", get(list_markers))
        .route("/markers/{id}", get(show_marker))
}

/// The part of a marker that the map page needs to place it
#[derive(Serialize)]
struct MarkerSummary<'a> {
    id: MarkerId,
    lat: f64,
    lng: f64,
    label: &'a str,
}

impl<'a> From<&'a Marker> for MarkerSummary<'a> {
    fn from(marker: &'a Marker) -> Self {
        Self {
            id: marker.id,
            lat: marker.position.latitude,
            lng: marker.position.longitude,
            label: &marker.label,
        }
    }
}

#[derive(Serialize)]
struct MarkerList<'a> {
    status: &'a LoadStatus,
    markers: Vec<MarkerSummary<'a>>,
    bounds: Option<Bounds>,
    skipped: &'a [SkippedRow],
}

async fn list_markers(State(state): State<AppState>) -> Response {
    let ctx = state.context.read().await;
    Json(MarkerList {
        status: ctx.status(),
        markers: ctx.layer().markers().iter().map(Into::into).collect(),
        bounds: ctx.layer().bounds(),
        skipped: ctx.skipped(),
    })
    .into_response()
}

async fn show_marker(
    State(state): State<AppState>,
    Path(id): Path<MarkerId>,
) -> Result<Json<Marker>, Error> {
    state
        .context
        .read()
        .await
        .layer()
        .marker(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("Unable to find marker '{id}'")))
}
