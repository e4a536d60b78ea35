//! Synthetic ground formation: where the swarm waits before takeoff.

use glam::{Vec3, Vec4};

use super::DronePoint;

/// Altitude drones rest at before takeoff and when parked, in world units.
pub const GROUND_Y: f32 = -200.0;

/// Dim gray for pad slots that have no layer-0 color to inherit.
const PAD_COLOR: Vec4 = Vec4::new(0.2, 0.2, 0.2, 1.0);

/// Lay out `count` drones on a centered square grid in the XZ plane at
/// [`GROUND_Y`].
///
/// The grid side is `ceil(sqrt(count))` and the spacing is four times the
/// drone's visual size, never tighter than 10 units. Slot `i` takes the
/// color of `first_layer[i]` when that point exists so the pad hints at the
/// opening formation, and [`PAD_COLOR`] otherwise.
///
/// Deterministic: identical inputs produce identical formations. The pad is
/// regenerated from scratch on every show load, never patched in place.
#[must_use]
pub fn ground_formation(
    count: usize,
    first_layer: Option<&[DronePoint]>,
    drone_size: f32,
) -> Vec<DronePoint> {
    let side = (count as f32).sqrt().ceil() as usize;
    let spacing = (drone_size * 4.0).max(10.0);
    let half = side.saturating_sub(1) as f32 / 2.0;

    (0..count)
        .map(|i| {
            let x = ((i % side) as f32 - half) * spacing;
            let z = ((i / side) as f32 - half) * spacing;
            let color = first_layer
                .and_then(|points| points.get(i))
                .map_or(PAD_COLOR, |p| p.color);
            DronePoint {
                position: Vec3::new(x, GROUND_Y, z),
                color,
            }
        })
        .collect()
}
