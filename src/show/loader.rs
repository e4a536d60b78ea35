//! Show document ingestion.
//!
//! The source format is a JSON document:
//!
//! ```json
//! {
//!   "title": "Aurora",
//!   "layers": [
//!     {
//!       "id": "l0", "name": "Ring", "duration": 4000,
//!       "points": [{ "x": 0.0, "y": 120.0, "z": 0.0, "color": "#ff8800" }]
//!     }
//!   ]
//! }
//! ```
//!
//! All fields are required; a missing field surfaces as a
//! [`SkyswarmError::ShowParse`] rather than being silently defaulted.

use std::path::Path;

use glam::{Vec3, Vec4};
use serde::Deserialize;

use super::{DronePoint, Show, ShowLayer};
use crate::error::SkyswarmError;

#[derive(Debug, Deserialize)]
struct ShowDoc {
    title: String,
    layers: Vec<LayerDoc>,
}

#[derive(Debug, Deserialize)]
struct LayerDoc {
    id: String,
    name: String,
    duration: u32,
    points: Vec<PointDoc>,
}

#[derive(Debug, Deserialize)]
struct PointDoc {
    x: f32,
    y: f32,
    z: f32,
    color: String,
}

impl Show {
    /// Parse a show from its JSON document form.
    pub fn from_json(json: &str) -> Result<Self, SkyswarmError> {
        let doc: ShowDoc = serde_json::from_str(json)
            .map_err(|e| SkyswarmError::ShowParse(e.to_string()))?;

        let layers = doc
            .layers
            .into_iter()
            .map(|l| ShowLayer {
                id: l.id,
                name: l.name,
                duration_ms: l.duration,
                points: l
                    .points
                    .into_iter()
                    .map(|p| DronePoint {
                        position: Vec3::new(p.x, p.y, p.z),
                        color: parse_color(&p.color),
                    })
                    .collect(),
            })
            .collect();

        let show = Self {
            title: doc.title,
            layers,
        };
        log::info!(
            "loaded show {:?}: {} layers, {} drones, {} ms",
            show.title,
            show.layers.len(),
            show.max_drones(),
            show.total_duration_ms()
        );
        Ok(show)
    }

    /// Read and parse a show document from disk.
    pub fn from_path(path: &Path) -> Result<Self, SkyswarmError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Parse a `#RRGGBB` hex string into an opaque RGBA color.
///
/// Exactly that form is accepted. Anything else yields opaque black and a
/// warning, so a bad color in one point cannot take down the whole load.
fn parse_color(hex: &str) -> Vec4 {
    if let Some(digits) = hex.strip_prefix('#') {
        if digits.len() == 6 {
            if let Ok(value) = u32::from_str_radix(digits, 16) {
                return Vec4::new(
                    ((value >> 16) & 0xff) as f32 / 255.0,
                    ((value >> 8) & 0xff) as f32 / 255.0,
                    (value & 0xff) as f32 / 255.0,
                    1.0,
                );
            }
        }
    }
    log::warn!("malformed color string {hex:?}; defaulting to opaque black");
    Vec4::new(0.0, 0.0, 0.0, 1.0)
}
