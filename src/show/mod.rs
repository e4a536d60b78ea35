//! Show data model: immutable-after-load formations and their timing.
//!
//! A [`Show`] is an ordered list of [`ShowLayer`] formations. Point index is
//! drone identity: index `i` in one layer corresponds to index `i` in the
//! next, which is what the transition engine pairs start and end positions
//! by. That correspondence is a load-time contract of the source document;
//! reordering points in the document changes which physical drone flies
//! where.

mod ground;
mod loader;

pub use ground::{ground_formation, GROUND_Y};

use glam::{Vec3, Vec4};

/// Minimum swarm size for a loaded show, regardless of its content.
pub const MIN_SWARM_SIZE: usize = 2500;

/// A single drone sample: world-space position plus RGBA color in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DronePoint {
    /// World-space position.
    pub position: Vec3,
    /// RGBA color, each component in `[0, 1]`.
    pub color: Vec4,
}

impl DronePoint {
    /// Resting state for drones not participating in the current formation:
    /// parked below the stage, fully transparent.
    pub const PARKED: Self = Self {
        position: Vec3::new(0.0, GROUND_Y, 0.0),
        color: Vec4::ZERO,
    };

    /// Construct a point from position components and a color.
    #[must_use]
    pub fn new(position: Vec3, color: Vec4) -> Self {
        Self { position, color }
    }
}

/// One formation in the show: a named set of points held for a duration.
#[derive(Debug, Clone)]
pub struct ShowLayer {
    /// Stable identifier from the source document.
    pub id: String,
    /// Human-readable formation name shown in the UI.
    pub name: String,
    /// How long this formation is held, in milliseconds.
    pub duration_ms: u32,
    /// Formation points, in drone-identity order.
    pub points: Vec<DronePoint>,
}

/// A complete show. Layer order is playback order.
#[derive(Debug, Clone, Default)]
pub struct Show {
    /// Show title from the source document.
    pub title: String,
    /// Ordered formations.
    pub layers: Vec<ShowLayer>,
}

impl Show {
    /// Whether the show has no layers (the inert state after a failed load).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Sum of all layer durations, in milliseconds. Recomputed on demand so
    /// it can never go stale relative to the layers.
    #[must_use]
    pub fn total_duration_ms(&self) -> f32 {
        self.layers.iter().map(|l| l.duration_ms as f32).sum()
    }

    /// Swarm size for this show: at least [`MIN_SWARM_SIZE`] and at least
    /// the point count of every layer. Zero for an empty show.
    #[must_use]
    pub fn max_drones(&self) -> usize {
        if self.layers.is_empty() {
            return 0;
        }
        self.layers
            .iter()
            .map(|l| l.points.len())
            .max()
            .unwrap_or(0)
            .max(MIN_SWARM_SIZE)
    }

    /// Layer index targeted at the given elapsed time, scanning layers in
    /// order and accumulating durations. `None` when the time lies at or
    /// past the end of the show.
    #[must_use]
    pub fn layer_at(&self, elapsed_ms: f32) -> Option<usize> {
        let mut cursor = 0.0;
        for (i, layer) in self.layers.iter().enumerate() {
            cursor += layer.duration_ms as f32;
            if elapsed_ms < cursor {
                return Some(i);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(duration_ms: u32, points: usize) -> ShowLayer {
        ShowLayer {
            id: format!("layer-{duration_ms}"),
            name: "test".to_owned(),
            duration_ms,
            points: (0..points)
                .map(|i| {
                    DronePoint::new(
                        Vec3::new(i as f32, 0.0, 0.0),
                        Vec4::ONE,
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn total_duration_is_sum_of_layers() {
        let show = Show {
            title: "t".to_owned(),
            layers: vec![layer(1000, 3), layer(250, 1), layer(4750, 2)],
        };
        assert_eq!(show.total_duration_ms(), 6000.0);
    }

    #[test]
    fn empty_show_is_inert() {
        let show = Show::default();
        assert!(show.is_empty());
        assert_eq!(show.total_duration_ms(), 0.0);
        assert_eq!(show.max_drones(), 0);
        assert_eq!(show.layer_at(0.0), None);
    }

    #[test]
    fn max_drones_has_floor() {
        let show = Show {
            title: String::new(),
            layers: vec![layer(1000, 3)],
        };
        assert_eq!(show.max_drones(), MIN_SWARM_SIZE);
    }

    #[test]
    fn max_drones_tracks_largest_layer() {
        let show = Show {
            title: String::new(),
            layers: vec![layer(1000, 3), layer(1000, 4000)],
        };
        assert_eq!(show.max_drones(), 4000);
    }

    #[test]
    fn layer_scan_accumulates_durations() {
        let show = Show {
            title: String::new(),
            layers: vec![layer(1000, 1), layer(500, 1), layer(500, 1)],
        };
        assert_eq!(show.layer_at(0.0), Some(0));
        assert_eq!(show.layer_at(999.9), Some(0));
        // A layer boundary belongs to the next layer.
        assert_eq!(show.layer_at(1000.0), Some(1));
        assert_eq!(show.layer_at(1499.9), Some(1));
        assert_eq!(show.layer_at(1500.0), Some(2));
        assert_eq!(show.layer_at(2000.0), None);
    }
}
