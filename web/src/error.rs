use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
    #[error(transparent)]
    Photomap(#[from] libphotomap::Error),
    #[error("Resource Not Found: {0}")]
    NotFound(String),
}

impl Error {
    pub(crate) fn to_client_status(&self) -> (StatusCode, String) {
        match self {
            Error::Other(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error".to_string(),
            ),
            Error::Photomap(libphotomap::Error::UnknownMarker(id)) => {
                (StatusCode::NOT_FOUND, format!("No marker with id {id}"))
            }
            Error::Photomap(libphotomap::Error::ResourceUnavailable { .. }) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "The dataset is unavailable".to_string(),
            ),
            Error::Photomap(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Library error".to_string()),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
        }
    }
}

// Tell axum how to convert `Error` into a response.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        warn!("Got error for response: {self:?}");
        self.to_client_status().into_response()
    }
}
