// Hotspot configuration records and the active-selection state.
//
// Hotspots are authored externally as JSON and validated exactly once at
// load; after that the records are immutable and shared read-only by the
// scene and the overlay synchronizer.

use fnv::FnvHashSet;
use glam::Vec3;
use serde::Deserialize;

/// One clickable point of interest in the panorama.
#[derive(Clone, Debug)]
pub struct Hotspot {
    pub id: String,
    pub title: String,
    pub description: String,
    pub position: Vec3,
    pub icon: Option<String>,
}

// Wire shape of an authored record; converted to `Hotspot` after validation.
#[derive(Deserialize)]
struct RawHotspot {
    id: String,
    title: String,
    description: String,
    position: [f32; 3],
    #[serde(default)]
    icon: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("hotspot configuration is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hotspot has an empty id")]
    EmptyId,
    #[error("duplicate hotspot id '{id}'")]
    DuplicateId { id: String },
    #[error("hotspot '{id}' has a non-finite position")]
    NonFinitePosition { id: String },
}

/// Parse and validate the authored hotspot list. The only validation the
/// viewer owes the configuration source is "position is a finite 3-vector";
/// id uniqueness is checked so markers and narration can address hotspots
/// unambiguously.
pub fn parse_hotspots(json: &str) -> Result<Vec<Hotspot>, ConfigError> {
    let raw: Vec<RawHotspot> = serde_json::from_str(json)?;
    let mut seen: FnvHashSet<String> = FnvHashSet::default();
    let mut hotspots = Vec::with_capacity(raw.len());
    for r in raw {
        if r.id.is_empty() {
            return Err(ConfigError::EmptyId);
        }
        if !seen.insert(r.id.clone()) {
            return Err(ConfigError::DuplicateId { id: r.id });
        }
        if !r.position.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::NonFinitePosition { id: r.id });
        }
        hotspots.push(Hotspot {
            id: r.id,
            title: r.title,
            description: r.description,
            position: Vec3::from_array(r.position),
            icon: r.icon,
        });
    }
    Ok(hotspots)
}

/// The single active hotspot selection driving the info panel.
///
/// Selecting replaces any prior selection; closing clears it. At most one
/// selection exists at a time.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActiveSelection {
    selected: Option<usize>,
    panel_visible: bool,
}

impl ActiveSelection {
    /// Select a hotspot by index and open the panel.
    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
        self.panel_visible = true;
    }

    /// Explicitly close the panel and clear the selection.
    pub fn close(&mut self) {
        self.selected = None;
        self.panel_visible = false;
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }
}
