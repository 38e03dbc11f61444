//! The map surface that markers are placed on, and its static configuration.
//!
//! Rendering tiles is somebody else's job (the browser-side map library). What
//! lives here is the marker layer: the ordered set of markers, each carrying
//! the record it was created from so that it can be looked up again when the
//! marker is selected.

use crate::{Error, Result, record::LocationRecord};
use serde::{Deserialize, Serialize};

/// Identifies a marker within a [MapSurface]. This is the marker's position in
/// insertion order and is only meaningful for the layer that issued it.
pub type MarkerId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= 90.0
            && self.longitude.abs() <= 180.0
    }
}

/// A visual representation of a [LocationRecord] on the map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub id: MarkerId,
    pub position: Coordinates,
    pub label: String,
    /// metadata attached to the marker for later retrieval
    pub record: LocationRecord,
}

/// A rectangular area of the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south_west: Coordinates,
    pub north_east: Coordinates,
}

impl Bounds {
    fn extend(self, point: Coordinates) -> Self {
        Self {
            south_west: Coordinates::new(
                self.south_west.latitude.min(point.latitude),
                self.south_west.longitude.min(point.longitude),
            ),
            north_east: Coordinates::new(
                self.north_east.latitude.max(point.latitude),
                self.north_east.longitude.max(point.longitude),
            ),
        }
    }
}

/// Something that point markers can be added to
pub trait MapSurface {
    /// Add a marker at `position` with the given label and attached record.
    fn add_marker(
        &mut self,
        position: Coordinates,
        label: String,
        record: LocationRecord,
    ) -> MarkerId;

    /// Remove all markers
    fn clear(&mut self);

    /// All markers in the order they were added
    fn markers(&self) -> &[Marker];

    fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers().iter().find(|m| m.id == id)
    }
}

/// An in-memory marker layer
#[derive(Debug, Default, Clone)]
pub struct MarkerLayer {
    markers: Vec<Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// The smallest area containing every marker, or `None` if the layer is empty
    pub fn bounds(&self) -> Option<Bounds> {
        let mut iter = self.markers.iter().map(|m| m.position);
        let first = iter.next()?;
        Some(iter.fold(
            Bounds {
                south_west: first,
                north_east: first,
            },
            Bounds::extend,
        ))
    }
}

impl MapSurface for MarkerLayer {
    fn add_marker(
        &mut self,
        position: Coordinates,
        label: String,
        record: LocationRecord,
    ) -> MarkerId {
        let id = self.markers.len();
        self.markers.push(Marker {
            id,
            position,
            label,
            record,
        });
        id
    }

    fn clear(&mut self) {
        self.markers.clear();
    }

    fn markers(&self) -> &[Marker] {
        &self.markers
    }

    fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }
}

const DEFAULT_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const DEFAULT_ATTRIBUTION: &str = "Tiles &copy; Esri &mdash; Source: Esri, i-cubed, USDA, USGS, AEX, GeoEye, Getmapping, Aerogrid, IGN, IGP, UPR-EGP, and the GIS User Community";

/// Static configuration for the map: where it starts and where its tiles come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub center: Coordinates,
    pub zoom: u8,
    pub max_zoom: u8,
    /// A tile url template containing `{z}`, `{x}` and `{y}` placeholders, and
    /// optionally `{s}` for a subdomain
    pub tile_url: String,
    pub attribution: String,
    /// Show marker labels without hovering
    pub permanent_labels: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinates::new(28.385011167593483, -81.57237660566031),
            zoom: 13,
            max_zoom: 16,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            permanent_labels: true,
        }
    }
}

impl MapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.zoom > self.max_zoom {
            return Err(Error::InvalidConfig(format!(
                "zoom level {} is greater than the maximum zoom {}",
                self.zoom, self.max_zoom
            )));
        }
        if !self.center.is_valid() {
            return Err(Error::InvalidConfig(format!(
                "center ({}, {}) is not a valid coordinate",
                self.center.latitude, self.center.longitude
            )));
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url.contains(placeholder) {
                return Err(Error::InvalidConfig(format!(
                    "tile url '{}' has no {placeholder} placeholder",
                    self.tile_url
                )));
            }
        }
        Ok(())
    }

    /// Expand the tile url template for a single tile
    pub fn tile_url_for(&self, z: u8, x: u32, y: u32) -> String {
        self.tile_url
            .replace("{s}", "a")
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}
