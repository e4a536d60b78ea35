//! Centralized engine options with TOML preset support.
//!
//! All tweakable settings (playback timing, display, fireworks, camera
//! feel) are consolidated here. Options serialize to and from TOML so a
//! host can ship presets; every sub-struct uses `#[serde(default)]`, so a
//! partial file overriding a single section works.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::phase::PRE_TAKEOFF_MS;
use crate::animation::transition::TRANSITION_MS;
use crate::error::SkyswarmError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Playback timing parameters.
    pub playback: PlaybackOptions,
    /// Point-sprite display parameters.
    pub display: DisplayOptions,
    /// Fireworks toggles.
    pub fireworks: FireworksOptions,
    /// Camera control feel.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SkyswarmError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| SkyswarmError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SkyswarmError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SkyswarmError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Playback timing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Initial playback speed multiplier, clamped by the engine to the
    /// supported range.
    pub speed: f32,
    /// Formation transition duration, in milliseconds.
    pub transition_ms: f32,
    /// Ground hold before takeoff, in milliseconds.
    pub pre_takeoff_ms: f32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            transition_ms: TRANSITION_MS,
            pre_takeoff_ms: PRE_TAKEOFF_MS,
        }
    }
}

/// Point-sprite display parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Rendered size of one drone sprite. Also sets the ground formation
    /// spacing, so larger drones get a wider launch grid.
    pub drone_size: f32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self { drone_size: 5.0 }
    }
}

/// Fireworks toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct FireworksOptions {
    /// Fire a particle burst every time the show completes a loop.
    pub enabled: bool,
}

/// Camera control feel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Orbit radians per dragged pixel.
    pub orbit_speed: f32,
    /// World units of zoom per scroll step.
    pub zoom_step: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            orbit_speed: 0.005,
            zoom_step: 20.0,
        }
    }
}
