use anyhow::{Context, Result, anyhow};
use libphotomap::{map::MapConfig, source::DataSource};
use serde::{Deserialize, Deserializer};
use std::{collections::HashMap, path::Path, time::Duration};
use tracing::debug;

#[derive(Debug, Deserialize, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ListenConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
}

const DEFAULT_HTTP_PORT: u16 = 80;
const DEFAULT_HOST: &str = "0.0.0.0";
fn default_listen() -> ListenConfig {
    ListenConfig {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_HTTP_PORT,
    }
}

// This handles the case where the `listen` block is PRESENT, but a field may be missing.
fn deserialize_listen_with_default_port<'de, D>(deserializer: D) -> Result<ListenConfig, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct PartialListenConfig {
        host: Option<String>,
        port: Option<u16>,
    }

    let partial_config = PartialListenConfig::deserialize(deserializer)?;
    Ok(ListenConfig {
        host: partial_config
            .host
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: partial_config.port.unwrap_or(DEFAULT_HTTP_PORT),
    })
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EnvConfig {
    #[serde(default = "default_listen")]
    #[serde(deserialize_with = "deserialize_listen_with_default_port")]
    pub(crate) listen: ListenConfig,
    /// url or path of the dataset to show on the map
    pub(crate) dataset: DataSource,
    /// seconds to wait for the dataset to download
    pub(crate) fetch_timeout: Option<u64>,
    #[serde(default)]
    pub(crate) map: MapConfig,
}

impl EnvConfig {
    /// Load the configuration for environment `envname` from a yaml file that
    /// maps environment names to configurations
    pub(crate) fn load(path: &Path, envname: &str) -> Result<Self> {
        debug!(?path, envname, "Loading environment config");
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::parse(&contents, envname)
            .with_context(|| format!("Invalid config file '{}'", path.display()))
    }

    fn parse(contents: &str, envname: &str) -> Result<Self> {
        let mut configs: HashMap<String, EnvConfig> = serde_yaml::from_str(contents)?;
        let cfg = configs
            .remove(envname)
            .ok_or_else(|| anyhow!("No configuration found for environment '{envname}'"))?;
        cfg.map.validate()?;
        Ok(cfg)
    }

    pub(crate) fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout.map(Duration::from_secs)
    }
}
