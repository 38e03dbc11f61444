//! The selection presenter: what the detail overlay is currently showing.

use crate::{
    Error, Result,
    map::{MapSurface, MarkerId},
    record::LocationRecord,
};
use serde::Serialize;
use tracing::debug;

/// The state of the detail overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Overlay {
    #[default]
    Hidden,
    Shown(LocationRecord),
}

/// The fields displayed by a shown overlay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayContent {
    pub title: String,
    pub body: String,
    pub image_url: Option<String>,
}

impl From<&LocationRecord> for OverlayContent {
    fn from(record: &LocationRecord) -> Self {
        Self {
            title: record.name.clone(),
            body: record.description.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

/// Tracks which record, if any, the overlay is showing.
///
/// Selecting while already shown replaces the content in place; it never
/// passes through [Overlay::Hidden]. The most recent selection always wins.
#[derive(Debug, Default)]
pub struct Presenter {
    state: Overlay,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Overlay {
        &self.state
    }

    pub fn is_shown(&self) -> bool {
        matches!(self.state, Overlay::Shown(_))
    }

    pub fn select(&mut self, record: LocationRecord) {
        debug!(name = record.name, "showing overlay");
        self.state = Overlay::Shown(record);
    }

    /// Select the record attached to marker `id` on `surface`. An unknown
    /// marker leaves the current state alone.
    pub fn select_marker<S>(&mut self, surface: &S, id: MarkerId) -> Result<()>
    where
        S: MapSurface + ?Sized,
    {
        let marker = surface.marker(id).ok_or(Error::UnknownMarker(id))?;
        self.select(marker.record.clone());
        Ok(())
    }

    pub fn dismiss(&mut self) {
        if self.is_shown() {
            debug!("hiding overlay");
        }
        self.state = Overlay::Hidden;
    }

    pub fn content(&self) -> Option<OverlayContent> {
        match &self.state {
            Overlay::Hidden => None,
            Overlay::Shown(record) => Some(record.into()),
        }
    }
}
