//! A web server that shows the locations of a spreadsheet on a map.
use crate::{config::EnvConfig, state::SharedState};
use anyhow::{Context, Result, anyhow};
use axum::{Router, response::IntoResponse, response::Redirect, routing::get};
use clap::Parser;
use directories::ProjectDirs;
use state::AppState;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{debug, info};
use tracing_subscriber::filter::EnvFilter;

mod api;
mod config;
mod error;
mod html;
mod state;
mod util;

const API_PREFIX: &str = "/api/v1/";
const APP_PREFIX: &str = "/app/";

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "prod")]
    pub env: String,
    #[arg(short, long)]
    pub config_file: Option<PathBuf>,
    #[arg(short, long)]
    pub datadir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("PHOTOMAP_LOG"))
        .init();
    let args = Cli::parse();
    let dirs = ProjectDirs::from("org", "photomap", "photomap")
        .ok_or_else(|| anyhow!("Unable to determine the home directory"))?;
    let config_file = args
        .config_file
        .unwrap_or_else(|| dirs.config_dir().join("config.yaml"));
    let datadir = args
        .datadir
        .unwrap_or_else(|| dirs.data_dir().to_path_buf());
    debug!(?config_file, ?datadir, env = args.env, "starting up");

    let env = EnvConfig::load(&config_file, &args.env)?;
    let listen = env.listen.clone();
    let shared_state = Arc::new(
        SharedState::new(&args.env, env, datadir).with_context(|| "Failed to set up the app")?,
    );

    // the page is usable (base tiles only) while the dataset is loading
    tokio::spawn({
        let state = shared_state.clone();
        async move { state.load_dataset().await }
    });

    let app = app(shared_state.clone());
    let addr: SocketAddr = format!("{}:{}", listen.host, listen.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Unable to listen on {addr}"))?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    shared_state.context.write().await.teardown();
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/favicon.ico", get(favicon_redirect))
        .nest_service("/static", ServeDir::new(state.datadir.join("static")))
        .merge(html::router())
        .nest(API_PREFIX.trim_end_matches('/'), api::router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down"),
        Err(e) => tracing::warn!("Unable to listen for shutdown signal: {e}"),
    }
}

async fn root() -> impl IntoResponse {
    Redirect::permanent(APP_PREFIX)
}

async fn favicon_redirect() -> impl IntoResponse {
    Redirect::permanent("/static/favicon.ico")
}

#[cfg(test)]
pub(crate) type TestResult<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Build the app around a test state whose markers come from `dataset`
#[cfg(test)]
pub(crate) async fn test_app(dataset: &str) -> (Router, AppState) {
    let state = Arc::new(SharedState::test());
    state
        .context
        .write()
        .await
        .install_str(&libphotomap::loader::LocationLoader::new(), dataset)
        .expect("failed to load test dataset");
    (app(state.clone()), state)
}
