use crate::output::{
    self, OutputFormat,
    rows::{MarkerRow, SkippedRowDetails},
};
use anyhow::{Context, Result};
use libphotomap::{
    loader::{LoadSummary, LocationLoader},
    map::{MapSurface, MarkerLayer},
    source::DataSource,
};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::debug;

pub(crate) async fn handle_command(
    source: String,
    fmt: OutputFormat,
    show_skipped: bool,
    timeout: Option<u64>,
) -> Result<()> {
    let mut loader = LocationLoader::new();
    if let Some(secs) = timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }
    let mut layer = MarkerLayer::new();
    let summary = if source == "-" {
        debug!("reading dataset from stdin");
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .with_context(|| "Failed to read dataset from stdin")?;
        loader.load_str(&text, &mut layer)?
    } else {
        let source: DataSource = source.parse()?;
        loader
            .load(&source, &mut layer)
            .await
            .with_context(|| format!("Failed to load dataset '{source}'"))?
    };

    println!("{}", format_markers(&layer, fmt.clone())?);
    if show_skipped && !summary.skipped.is_empty() {
        println!("\n{}", format_skipped(&summary, fmt)?);
    } else if !summary.skipped.is_empty() {
        eprintln!(
            "{} rows were skipped, use --skipped to list them",
            summary.skipped.len()
        );
    }
    Ok(())
}

fn format_markers(layer: &MarkerLayer, fmt: OutputFormat) -> Result<String> {
    output::format_seq(layer.markers().iter().map(MarkerRow::new), fmt)
}

fn format_skipped(summary: &LoadSummary, fmt: OutputFormat) -> Result<String> {
    output::format_seq(summary.skipped.iter().map(SkippedRowDetails::new), fmt)
}
