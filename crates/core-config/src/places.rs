//! Remembered cursor positions per file (`places.toml`).
//!
//! Each record is checked on its own: a record with missing or negative
//! fields is dropped and the rest survive. A file that is not TOML at all is
//! treated as empty.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::{info, warn};

pub const PLACES_FILE_NAME: &str = "places.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlace {
    pub path: PathBuf,
    pub row: usize,
    pub col: usize,
    pub anchor_row: usize,
    pub anchor_col: usize,
}

#[derive(Debug, Default, Deserialize)]
struct RawPlaces {
    #[serde(default)]
    place: Vec<toml::Value>,
}

#[derive(Serialize)]
struct PlacesFile<'a> {
    place: &'a [SavedPlace],
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceBook {
    places: Vec<SavedPlace>,
}

impl PlaceBook {
    pub fn load(path: &Path) -> Self {
        let Ok(content) = fs::read_to_string(path) else {
            return Self::default();
        };
        let raw = match toml::from_str::<RawPlaces>(&content) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(target: "config", path = %path.display(), error = %e, "places_malformed_discarded");
                return Self::default();
            }
        };
        let total = raw.place.len();
        let places: Vec<SavedPlace> = raw
            .place
            .into_iter()
            .filter_map(|v| v.try_into::<SavedPlace>().ok())
            .collect();
        if places.len() != total {
            warn!(target: "config", dropped = total - places.len(), "places_records_discarded");
        }
        info!(target: "config", count = places.len(), "places_loaded");
        Self { places }
    }

    pub fn get(&self, path: &Path) -> Option<&SavedPlace> {
        self.places.iter().find(|p| p.path == path)
    }

    /// Replace any record for `place.path`. Most recent goes last.
    pub fn remember(&mut self, place: SavedPlace) {
        self.places.retain(|p| p.path != place.path);
        self.places.push(place);
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating places directory {}", dir.display()))?;
        }
        let text = toml::to_string(&PlacesFile {
            place: &self.places,
        })
        .context("serializing places")?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}
