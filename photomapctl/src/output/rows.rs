use libphotomap::{loader::SkippedRow, map::Marker};
use serde::Serialize;
use tabled::Tabled;

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub(crate) struct MarkerRow {
    id: usize,
    label: String,
    latitude: f64,
    longitude: f64,
    #[tabled(display("tabled::derive::display::option", ""))]
    image: Option<String>,
}

impl MarkerRow {
    pub(crate) fn new(marker: &Marker) -> Self {
        Self {
            id: marker.id,
            label: marker.label.clone(),
            latitude: marker.position.latitude,
            longitude: marker.position.longitude,
            image: marker.record.image_url.clone(),
        }
    }
}

#[derive(Tabled, Serialize)]
#[tabled(rename_all = "PascalCase")]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SkippedRowDetails {
    line: u64,
    reason: String,
}

impl SkippedRowDetails {
    pub(crate) fn new(row: &SkippedRow) -> Self {
        Self {
            line: row.line,
            reason: row.reason.clone(),
        }
    }
}
