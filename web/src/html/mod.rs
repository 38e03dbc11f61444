use crate::{state::AppState, util::app_url};
use axum::{Router, extract::State, response::IntoResponse, routing::get};
use minijinja::context;

mod overlay;
#[cfg(test)]
mod tests;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route(&app_url("/"), get(root))
        .route(
            &app_url("/overlay"),
            get(overlay::show_overlay).delete(overlay::dismiss_overlay),
        )
        .route(&app_url("/overlay/{id}"), get(overlay::select_marker))
}

/// The map page. Markers are fetched by the page itself once it has loaded, so
/// this renders fine while the dataset is still loading. A fresh page always
/// starts with the overlay hidden; only the htmx fragment requests below
/// `/overlay` see the current selection.
async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let ctx = state.context.read().await;
    state.render_template(
        crate::state::MAP_TEMPLATE,
        context!(
            map => ctx.config(),
            status => ctx.status(),
            marker_count => ctx.marker_count(),
        ),
    )
}
