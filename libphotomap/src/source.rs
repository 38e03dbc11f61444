//! Where a dataset comes from, and how to fetch it.

use crate::{Error, Result};
use reqwest::Url;
use serde::Deserialize;
use std::{fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::debug;

/// A dataset location: either a url to download or a local file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub enum DataSource {
    Url(Url),
    Path(PathBuf),
}

impl DataSource {
    /// Retrieve the full text of the dataset. Any failure to do so, including an
    /// http error status or an elapsed `timeout`, is reported as
    /// [Error::ResourceUnavailable].
    pub async fn fetch(&self, timeout: Option<Duration>) -> Result<String> {
        debug!(source = %self, ?timeout, "fetching dataset");
        match self {
            DataSource::Url(url) => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = timeout {
                    builder = builder.timeout(timeout);
                }
                let client = builder.build().map_err(|e| self.unavailable(e))?;
                let response = client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(|e| self.unavailable(e))?;
                response.text().await.map_err(|e| self.unavailable(e))
            }
            DataSource::Path(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| self.unavailable(e)),
        }
    }

    fn unavailable(&self, reason: impl Display) -> Error {
        Error::ResourceUnavailable {
            resource: self.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for DataSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidConfig("no dataset specified".into()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Url::parse(s)
                .map(DataSource::Url)
                .map_err(|e| Error::InvalidConfig(format!("invalid dataset url '{s}': {e}")))
        } else {
            Ok(DataSource::Path(PathBuf::from(s)))
        }
    }
}

impl TryFrom<String> for DataSource {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{url}"),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
