//! The application context: the single owner of the map state for one
//! running application, constructed at startup and torn down at shutdown.

use crate::{
    Result,
    loader::{LoadSummary, LocationLoader, SkippedRow},
    map::{MapConfig, MapSurface, MarkerId, MarkerLayer},
    presenter::{OverlayContent, Presenter},
    source::DataSource,
};
use serde::Serialize;
use tracing::debug;

/// Progress of the initial dataset load
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    /// Nothing has been loaded yet
    Pending,
    Ready,
    /// The load failed; the map shows base tiles only
    Failed(String),
}

#[derive(Debug)]
pub struct AppContext {
    config: MapConfig,
    layer: MarkerLayer,
    presenter: Presenter,
    status: LoadStatus,
    skipped: Vec<SkippedRow>,
}

impl AppContext {
    pub fn new(config: MapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            layer: MarkerLayer::new(),
            presenter: Presenter::new(),
            status: LoadStatus::Pending,
            skipped: Vec::new(),
        })
    }

    /// Run the initial load of `source` into this context's marker layer
    pub async fn init(
        &mut self,
        loader: &LocationLoader,
        source: &DataSource,
    ) -> Result<LoadSummary> {
        let outcome = loader.load_layer(source).await;
        self.install(outcome)
    }

    /// Install the outcome of a load that was run elsewhere. A successful load
    /// replaces the marker layer wholesale; a failed one leaves an empty layer.
    /// The error is handed back so the caller can report it.
    pub fn install(
        &mut self,
        outcome: Result<(MarkerLayer, LoadSummary)>,
    ) -> Result<LoadSummary> {
        self.presenter.dismiss();
        match outcome {
            Ok((layer, summary)) => {
                debug!(markers = layer.len(), "installing marker layer");
                self.layer = layer;
                self.skipped = summary.skipped.clone();
                self.status = LoadStatus::Ready;
                Ok(summary)
            }
            Err(e) => {
                self.layer.clear();
                self.skipped.clear();
                self.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop all loaded state
    pub fn teardown(&mut self) {
        debug!("tearing down application context");
        self.presenter.dismiss();
        self.layer.clear();
        self.skipped.clear();
        self.status = LoadStatus::Pending;
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn layer(&self) -> &MarkerLayer {
        &self.layer
    }

    pub fn presenter(&self) -> &Presenter {
        &self.presenter
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }

    /// Show the overlay for marker `id`
    pub fn select(&mut self, id: MarkerId) -> Result<Option<OverlayContent>> {
        self.presenter.select_marker(&self.layer, id)?;
        Ok(self.presenter.content())
    }

    pub fn dismiss(&mut self) {
        self.presenter.dismiss();
    }

    pub fn overlay(&self) -> Option<OverlayContent> {
        self.presenter.content()
    }

    /// Convenience for loading already-fetched text, mostly useful for tests
    pub fn install_str(&mut self, loader: &LocationLoader, text: &str) -> Result<LoadSummary> {
        let mut layer = MarkerLayer::new();
        let outcome = loader
            .load_str(text, &mut layer)
            .map(|summary| (layer, summary));
        self.install(outcome)
    }

    pub fn marker_count(&self) -> usize {
        self.layer.len()
    }
}
