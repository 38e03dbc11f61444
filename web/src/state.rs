use crate::{EnvConfig, util};
use anyhow::{Context, Result};
use axum_template::{RenderHtml, engine::Engine};
use libphotomap::{context::AppContext, loader::LocationLoader};
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::{path::Path, path::PathBuf, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, error, info, trace};

pub(crate) type TemplateEngine = Engine<Environment<'static>>;

/// The template for the map page and the element it must contain for the map
/// to be mounted on.
pub(crate) const MAP_TEMPLATE: &str = "map.html.j2";
const MAP_MOUNT_POINT: &str = r#"id="map""#;

pub(crate) fn template_engine<P: AsRef<Path>>(envname: &str, template_dir: P) -> Environment<'static> {
    let mut jinja = Environment::new();
    jinja.set_loader(minijinja::path_loader(template_dir));
    jinja.set_auto_escape_callback(|name| {
        if name.ends_with(".html.j2") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    jinja.add_global("environment", envname);
    jinja.add_filter("app_url", util::app_url_filter);
    jinja.add_filter("api_url", util::api_url_filter);
    jinja.add_filter("truncate", util::truncate_text);
    jinja
}

/// Make sure the map page can actually be displayed. Without a mount point
/// there is nothing for the map to render into.
pub(crate) fn check_render_target(jinja: &Environment) -> libphotomap::Result<()> {
    let tmpl = jinja
        .get_template(MAP_TEMPLATE)
        .map_err(|_| libphotomap::Error::RenderTargetMissing(MAP_TEMPLATE.to_string()))?;
    if !tmpl.source().contains(MAP_MOUNT_POINT) {
        return Err(libphotomap::Error::RenderTargetMissing("#map".to_string()));
    }
    Ok(())
}

#[derive(Debug)]
pub struct SharedState {
    pub tmpl: TemplateEngine,
    pub config: EnvConfig,
    pub datadir: PathBuf,
    pub context: RwLock<AppContext>,
}

impl SharedState {
    pub fn new(envname: &str, env: EnvConfig, datadir: PathBuf) -> Result<Self> {
        let tmpl_path = datadir.join("templates");
        trace!(?tmpl_path, "Creating shared app state");
        let jinja = template_engine(envname, &tmpl_path);
        check_render_target(&jinja)
            .with_context(|| format!("Unable to use templates in '{}'", tmpl_path.display()))?;
        let context = AppContext::new(env.map.clone())?;
        Ok(Self {
            tmpl: Engine::from(jinja),
            config: env,
            datadir,
            context: RwLock::new(context),
        })
    }

    pub fn render_template<K, S>(&self, key: K, data: S) -> RenderHtml<K, TemplateEngine, S>
    where
        K: AsRef<str>,
        S: Serialize,
    {
        RenderHtml(key, self.tmpl.clone(), data)
    }

    /// Fetch the configured dataset and install its markers. The fetch and
    /// parse happen without holding the context lock; the finished layer is
    /// swapped in all at once.
    pub async fn load_dataset(&self) {
        let mut loader = LocationLoader::new();
        if let Some(timeout) = self.config.fetch_timeout() {
            loader = loader.with_timeout(timeout);
        }
        debug!(dataset = %self.config.dataset, "Loading dataset");
        let outcome = loader.load_layer(&self.config.dataset).await;
        match self.context.write().await.install(outcome) {
            Ok(summary) => info!(
                dataset = %self.config.dataset,
                markers = summary.added,
                skipped = summary.skipped.len(),
                "Dataset loaded"
            ),
            Err(e) => error!(
                dataset = %self.config.dataset,
                "Failed to load dataset, the map will have no markers: {e}"
            ),
        }
    }

    #[cfg(test)]
    pub fn test() -> Self {
        let jinja = template_engine("test", "./templates");
        debug!("Creating test shared app state");
        let config = EnvConfig {
            listen: crate::config::ListenConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            dataset: libphotomap::source::DataSource::Path("test-places.csv".into()),
            fetch_timeout: None,
            map: Default::default(),
        };
        Self {
            tmpl: Engine::from(jinja),
            context: RwLock::new(
                AppContext::new(config.map.clone()).expect("default map config is valid"),
            ),
            config,
            datadir: ".".into(),
        }
    }
}

pub type AppState = Arc<SharedState>;
