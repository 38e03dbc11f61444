//! The location record: one row of the dataset, validated.

use crate::{Error, Result, empty_string_as_none, map::Coordinates};
use serde::{Deserialize, Serialize};

/// The column names that a dataset's header row must contain. These are the
/// contract with whoever maintains the spreadsheet, so they are matched
/// case-sensitively.
pub const COLUMNS: [&str; 5] = ["Name", "Description", "Lat", "Long", "Pic_url"];

/// A row as it comes out of the csv reader, before any validation
#[derive(Debug, Default, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Lat", deserialize_with = "empty_string_as_none")]
    pub lat: Option<String>,
    #[serde(rename = "Long", deserialize_with = "empty_string_as_none")]
    pub long: Option<String>,
    #[serde(rename = "Pic_url", deserialize_with = "empty_string_as_none")]
    pub pic_url: Option<String>,
}

/// A point of interest that can be placed on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Short display name, used as the marker label and overlay title
    pub name: String,
    /// Free text shown in the overlay body
    pub description: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// An image to display in the overlay, if any
    pub image_url: Option<String>,
}

impl LocationRecord {
    /// Validates a raw row. `line` is the line of the dataset that the row was
    /// read from and is only used for error reporting.
    pub fn from_row(row: RawRow, line: u64) -> Result<Self> {
        let invalid = |reason: String| Error::RecordInvalid { line, reason };
        let latitude = parse_coordinate("latitude", row.lat.as_deref(), 90.0).map_err(invalid)?;
        let longitude =
            parse_coordinate("longitude", row.long.as_deref(), 180.0).map_err(invalid)?;
        Ok(Self {
            name: row.name,
            description: row.description,
            latitude,
            longitude,
            image_url: row.pic_url,
        })
    }

    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

fn parse_coordinate(axis: &str, value: Option<&str>, limit: f64) -> Result<f64, String> {
    let value = value.ok_or_else(|| format!("missing {axis}"))?;
    let n: f64 = value
        .parse()
        .map_err(|_| format!("{axis} '{value}' is not a number"))?;
    if !n.is_finite() {
        return Err(format!("{axis} '{value}' is not a finite number"));
    }
    if n.abs() > limit {
        return Err(format!("{axis} {n} is out of range"));
    }
    Ok(n)
}
