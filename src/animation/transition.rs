//! Formation transition fill: per-drone endpoint policy plus the buffer
//! update for one frame of flight.
//!
//! Drones are paired across formations by index. An index present in both
//! formations flies the curved path between its two points. The edge cases
//! get synthetic endpoints: a drone leaving the show flies outward past the
//! audience, a drone joining launches from below its destination, and an
//! index in neither formation stays parked.

use glam::{Vec3, Vec4};

use super::interpolation::{lerp_color, natural_lerp};
use crate::show::DronePoint;

/// Default duration of a formation transition, in milliseconds.
pub const TRANSITION_MS: f32 = 1500.0;

/// Horizontal radius disappearing drones fly out to.
const EXIT_RADIUS: f32 = 500.0;
/// Altitude appearing drones launch from.
const ENTRY_Y: f32 = -250.0;
/// Horizontal jitter applied to an appearing drone's launch point, so
/// joiners do not stack on a single column.
const ENTRY_JITTER: f32 = 50.0;

/// Start and end states for one drone over one transition, derived from its
/// presence in the two formations.
pub(crate) fn endpoints(
    index: usize,
    from: Option<&DronePoint>,
    to: Option<&DronePoint>,
) -> (DronePoint, DronePoint) {
    match (from, to) {
        (Some(a), Some(b)) => (*a, *b),
        (Some(a), None) => {
            // Disappearing: fly outward to the surroundings at the original
            // height, fading out on the way.
            let mut direction =
                Vec3::new(a.position.x, 0.0, a.position.z);
            if direction.length_squared() < 0.1 {
                let i = index as f32;
                direction = Vec3::new(i.sin(), 0.0, i.cos());
            }
            let mut end = direction.normalize_or_zero() * EXIT_RADIUS;
            end.y = a.position.y;
            (*a, DronePoint::new(end, Vec4::ZERO))
        }
        (None, Some(b)) => {
            // Appearing: launch from a jittered point below the
            // destination, fading in on the way up.
            let i = index as f32;
            let start = Vec3::new(
                b.position.x + i.sin() * ENTRY_JITTER,
                ENTRY_Y,
                b.position.z + i.cos() * ENTRY_JITTER,
            );
            (DronePoint::new(start, Vec4::ZERO), *b)
        }
        (None, None) => (DronePoint::PARKED, DronePoint::PARKED),
    }
}

/// Fill `buffer` with one frame of a layer-to-layer transition at the given
/// eased progress.
pub fn fill_transition_frame(
    buffer: &mut [DronePoint],
    from: &[DronePoint],
    to: &[DronePoint],
    eased_t: f32,
) {
    for (i, slot) in buffer.iter_mut().enumerate() {
        let (start, end) = endpoints(i, from.get(i), to.get(i));
        slot.position =
            natural_lerp(start.position, end.position, eased_t, i);
        slot.color = lerp_color(start.color, end.color, eased_t);
    }
}

/// Fill `buffer` with one frame of the takeoff from the ground formation
/// into the first layer. Pads with no slot in the layer hold their ground
/// position while fading out.
pub fn fill_takeoff_frame(
    buffer: &mut [DronePoint],
    ground: &[DronePoint],
    to: &[DronePoint],
    eased_t: f32,
) {
    for (i, slot) in buffer.iter_mut().enumerate() {
        let start = ground.get(i).copied().unwrap_or(DronePoint::PARKED);
        let (end_position, end_color) = match to.get(i) {
            Some(b) => (b.position, b.color),
            None => (start.position, Vec4::ZERO),
        };
        slot.position =
            natural_lerp(start.position, end_position, eased_t, i);
        slot.color = lerp_color(start.color, end_color, eased_t);
    }
}

/// Snap `buffer` exactly onto the target formation, parking every index
/// beyond its point count.
pub fn snap_to_layer(buffer: &mut [DronePoint], points: &[DronePoint]) {
    for (i, slot) in buffer.iter_mut().enumerate() {
        *slot = points.get(i).copied().unwrap_or(DronePoint::PARKED);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f32, y: f32, z: f32) -> DronePoint {
        DronePoint::new(Vec3::new(x, y, z), Vec4::ONE)
    }

    #[test]
    fn present_in_both_uses_the_layer_points() {
        let a = point(1.0, 2.0, 3.0);
        let b = point(4.0, 5.0, 6.0);
        let (start, end) = endpoints(0, Some(&a), Some(&b));
        assert_eq!(start, a);
        assert_eq!(end, b);
    }

    #[test]
    fn disappearing_drone_exits_at_radius_keeping_height() {
        let a = point(30.0, 120.0, 40.0);
        let (start, end) = endpoints(7, Some(&a), None);
        assert_eq!(start, a);

        let horizontal =
            Vec3::new(end.position.x, 0.0, end.position.z).length();
        assert!((horizontal - 500.0).abs() < 1e-2);
        assert_eq!(end.position.y, 120.0);
        // Exit direction is radially outward from the origin.
        assert!((end.position.x / end.position.z - 30.0 / 40.0).abs() < 1e-4);
        assert_eq!(end.color, Vec4::ZERO);
    }

    #[test]
    fn disappearing_drone_at_origin_gets_a_pseudo_direction() {
        let a = point(0.0, 80.0, 0.0);
        let (_, end) = endpoints(5, Some(&a), None);
        let horizontal =
            Vec3::new(end.position.x, 0.0, end.position.z).length();
        assert!((horizontal - 500.0).abs() < 1e-2);
        assert_eq!(end.position.y, 80.0);
    }

    #[test]
    fn appearing_drone_launches_from_jittered_offset() {
        let b = point(10.0, 150.0, -20.0);
        let index = 9;
        let (start, end) = endpoints(index, None, Some(&b));
        assert_eq!(end, b);
        assert_eq!(start.color, Vec4::ZERO);
        assert_eq!(start.position.y, -250.0);

        let i = index as f32;
        assert!((start.position.x - (10.0 + i.sin() * 50.0)).abs() < 1e-4);
        assert!((start.position.z - (-20.0 + i.cos() * 50.0)).abs() < 1e-4);
    }

    #[test]
    fn absent_drone_stays_parked() {
        let (start, end) = endpoints(0, None, None);
        assert_eq!(start, DronePoint::PARKED);
        assert_eq!(end, DronePoint::PARKED);
    }

    #[test]
    fn frame_at_zero_matches_start_and_at_one_matches_end() {
        let from: Vec<DronePoint> =
            (0..5).map(|i| point(i as f32 * 10.0, 100.0, 0.0)).collect();
        let to: Vec<DronePoint> =
            (0..3).map(|i| point(0.0, 100.0, i as f32 * 10.0)).collect();
        let mut buffer = vec![DronePoint::PARKED; 8];

        fill_transition_frame(&mut buffer, &from, &to, 0.0);
        for i in 0..5 {
            assert_eq!(buffer[i].position, from[i].position);
        }

        fill_transition_frame(&mut buffer, &from, &to, 1.0);
        for i in 0..3 {
            assert_eq!(buffer[i].position, to[i].position);
            assert_eq!(buffer[i].color, to[i].color);
        }
        // Indices 3 and 4 ended their outward flight fully transparent.
        for i in 3..5 {
            assert_eq!(buffer[i].color, Vec4::ZERO);
            let horizontal = Vec3::new(
                buffer[i].position.x,
                0.0,
                buffer[i].position.z,
            )
            .length();
            assert!((horizontal - 500.0).abs() < 1e-2);
        }
        // Indices beyond both formations never moved off the pad.
        for i in 5..8 {
            assert_eq!(buffer[i].position, DronePoint::PARKED.position);
        }
    }

    #[test]
    fn takeoff_holds_surplus_pads_in_place_while_fading() {
        let ground: Vec<DronePoint> =
            (0..4).map(|i| point(i as f32, -200.0, 0.0)).collect();
        let to: Vec<DronePoint> = vec![point(0.0, 100.0, 0.0)];
        let mut buffer = vec![DronePoint::PARKED; 4];

        fill_takeoff_frame(&mut buffer, &ground, &to, 0.5);
        // Pad 0 is on its way up.
        assert!(buffer[0].position.y > -200.0);
        // Pads without a slot in the layer stay put and fade.
        for i in 1..4 {
            assert_eq!(buffer[i].position, ground[i].position);
            assert_eq!(buffer[i].color.w, 0.5);
        }
    }

    #[test]
    fn snap_parks_the_tail() {
        let to: Vec<DronePoint> = vec![point(1.0, 2.0, 3.0)];
        let mut buffer = vec![point(9.0, 9.0, 9.0); 3];
        snap_to_layer(&mut buffer, &to);
        assert_eq!(buffer[0], to[0]);
        assert_eq!(buffer[1], DronePoint::PARKED);
        assert_eq!(buffer[2], DronePoint::PARKED);
    }
}
