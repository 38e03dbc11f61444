//! The location loader: dataset in, markers out.

use crate::{
    Error, Result,
    dataset::parse_records,
    map::{MapSurface, MarkerLayer},
    source::DataSource,
};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, trace, warn};

/// A dataset row that did not produce a marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// What a load did to the map surface
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadSummary {
    /// number of markers added
    pub added: usize,
    pub skipped: Vec<SkippedRow>,
}

/// Fetches a dataset and places one marker per valid row on a [MapSurface].
///
/// If the dataset can't be fetched, or its header is unusable, the load fails
/// before anything is added, so the surface is left exactly as it was. Rows
/// without usable coordinates are skipped and reported in the [LoadSummary].
/// Nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct LocationLoader {
    timeout: Option<Duration>,
}

impl LocationLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Give up on fetching a remote dataset after `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn load<S>(&self, source: &DataSource, surface: &mut S) -> Result<LoadSummary>
    where
        S: MapSurface + ?Sized,
    {
        let text = source.fetch(self.timeout).await?;
        self.load_str(&text, surface)
    }

    /// Load into a new [MarkerLayer]
    pub async fn load_layer(&self, source: &DataSource) -> Result<(MarkerLayer, LoadSummary)> {
        let mut layer = MarkerLayer::new();
        let summary = self.load(source, &mut layer).await?;
        Ok((layer, summary))
    }

    /// Load from dataset text that has already been fetched
    pub fn load_str<S>(&self, text: &str, surface: &mut S) -> Result<LoadSummary>
    where
        S: MapSurface + ?Sized,
    {
        let dataset = parse_records(text)?;
        let mut summary = LoadSummary::default();
        for row in dataset.rows {
            match row.record {
                Ok(record) => {
                    let id = surface.add_marker(record.position(), record.name.clone(), record);
                    trace!(line = row.line, id, "added marker");
                    summary.added += 1;
                }
                Err(e) => {
                    warn!(line = row.line, "skipping row: {e}");
                    let reason = match e {
                        Error::RecordInvalid { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    summary.skipped.push(SkippedRow {
                        line: row.line,
                        reason,
                    });
                }
            }
        }
        info!(
            added = summary.added,
            skipped = summary.skipped.len(),
            "loaded dataset"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Coordinates;
    use std::io::Write;
    use test_log::test;

    const PIER: &str = "Name,Description,Lat,Long,Pic_url\n\
        Pier,Old fishing pier,28.38,-81.57,http://x/pier.jpg\n";

    #[test]
    fn test_pier() {
        let mut layer = MarkerLayer::new();
        let summary = LocationLoader::new()
            .load_str(PIER, &mut layer)
            .expect("failed to load");
        assert_eq!(summary.added, 1);
        assert!(summary.skipped.is_empty());

        let marker = layer.marker(0).expect("no marker");
        assert_eq!(marker.position, Coordinates::new(28.38, -81.57));
        assert_eq!(marker.label, "Pier");
        assert_eq!(marker.record.description, "Old fishing pier");
        assert_eq!(
            marker.record.image_url.as_deref(),
            Some("http://x/pier.jpg")
        );
    }

    #[test]
    fn test_n_rows_n_markers() {
        let mut text = String::from("Name,Description,Lat,Long,Pic_url\n");
        for i in 0..25 {
            text.push_str(&format!("Place {i},Description {i},{}.5,-81.{i},\n", i % 80));
        }
        let mut layer = MarkerLayer::new();
        let summary = LocationLoader::new()
            .load_str(&text, &mut layer)
            .expect("failed to load");
        assert_eq!(summary.added, 25);
        assert_eq!(layer.len(), 25);
        for (i, marker) in layer.markers().iter().enumerate() {
            assert_eq!(marker.id, i);
            assert_eq!(marker.label, format!("Place {i}"));
            assert_eq!(marker.position.latitude, format!("{}.5", i % 80).parse::<f64>().unwrap());
        }
    }

    #[test]
    fn test_empty_lat_is_skipped() {
        let text = "Name,Description,Lat,Long,Pic_url\n\
            Pier,Old fishing pier,,-81.57,http://x/pier.jpg\n\
            Lake,Big lake,28.40,-81.60,\n\
            Bad,Bad longitude,28.40,west,\n\
            Tower,The tower,28.41,-81.58,\n";
        let mut layer = MarkerLayer::new();
        let summary = LocationLoader::new()
            .load_str(text, &mut layer)
            .expect("failed to load");
        assert_eq!(summary.added, 2);
        assert_eq!(
            summary.skipped,
            vec![
                SkippedRow {
                    line: 2,
                    reason: "missing latitude".into()
                },
                SkippedRow {
                    line: 4,
                    reason: "longitude 'west' is not a number".into()
                },
            ]
        );
        let labels: Vec<_> = layer.markers().iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Lake", "Tower"]);
    }

    #[test]
    fn test_bad_header_leaves_surface_alone() {
        let mut layer = MarkerLayer::new();
        LocationLoader::new()
            .load_str(PIER, &mut layer)
            .expect("failed to load");
        let err = LocationLoader::new()
            .load_str("Name,Lat,Long\nX,1,2\n", &mut layer)
            .unwrap_err();
        assert!(matches!(err, Error::MissingColumns(_)));
        assert_eq!(layer.len(), 1);

        let err = LocationLoader::new()
            .load_str(
                "Name,Name,Description,Lat,Long,Pic_url\nX,Y,Z,1,2,\n",
                &mut layer,
            )
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumns(cols) if cols == ["Name"]));
        assert_eq!(layer.len(), 1);
    }

    #[test(tokio::test)]
    async fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        file.write_all(PIER.as_bytes()).expect("failed to write");
        let src = DataSource::Path(file.path().to_path_buf());
        let (layer, summary) = LocationLoader::new()
            .load_layer(&src)
            .await
            .expect("failed to load");
        assert_eq!(summary.added, 1);
        assert_eq!(layer.markers()[0].label, "Pier");
    }

    #[test(tokio::test)]
    async fn test_fetch_failure_adds_nothing() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let src = DataSource::Path(dir.path().join("missing.csv"));
        let mut layer = MarkerLayer::new();
        let err = LocationLoader::new()
            .load(&src, &mut layer)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { .. }));
        assert!(layer.is_empty());
    }

    async fn serve(router: axum::Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind");
        let addr = listener.local_addr().expect("no local address");
        tokio::spawn(async move { axum::serve(listener, router).await });
        addr
    }

    #[test(tokio::test)]
    async fn test_load_url() {
        use axum::{http::StatusCode, routing::get};
        let addr = serve(
            axum::Router::new()
                .route("/sheet.csv", get(|| async { PIER }))
                .route(
                    "/gone.csv",
                    get(|| async { (StatusCode::NOT_FOUND, "not here") }),
                ),
        )
        .await;

        let src: DataSource = format!("http://{addr}/sheet.csv").parse().unwrap();
        let (layer, summary) = LocationLoader::new()
            .with_timeout(Duration::from_secs(10))
            .load_layer(&src)
            .await
            .expect("failed to load");
        assert_eq!(summary.added, 1);
        assert_eq!(layer.markers()[0].label, "Pier");

        // an error status is not a dataset
        let src: DataSource = format!("http://{addr}/gone.csv").parse().unwrap();
        let err = LocationLoader::new().load_layer(&src).await.unwrap_err();
        assert!(matches!(err, Error::ResourceUnavailable { .. }));
    }

    #[test(tokio::test)]
    async fn test_load_url_timeout() {
        use axum::routing::get;
        let addr = serve(axum::Router::new().route(
            "/slow.csv",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                PIER
            }),
        ))
        .await;

        let src: DataSource = format!("http://{addr}/slow.csv").parse().unwrap();
        let mut layer = MarkerLayer::new();
        let err = LocationLoader::new()
            .with_timeout(Duration::from_millis(200))
            .load(&src, &mut layer)
            .await
            .unwrap_err();
        match err {
            Error::ResourceUnavailable { resource, .. } => assert!(resource.ends_with("/slow.csv")),
            other => panic!("unexpected error {other:?}"),
        }
        assert!(layer.is_empty());
    }
}
