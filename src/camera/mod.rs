//! Camera rig for the render collaborator.
//!
//! Orbit state for the 3D view plus orthographic state for the 2D plan and
//! elevation views. The rig is derived state only: the engine never reads
//! it, the renderer applies whatever view-projection it yields to the point
//! buffer.

mod rig;

pub use rig::{CameraRig, ViewMode};
