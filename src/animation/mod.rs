//! Show-state animation: curved interpolation paths, the playback clock,
//! the engine phase machine, and the formation transition fill.

pub mod interpolation;
pub mod phase;
pub mod playback;
pub mod transition;

pub use interpolation::natural_lerp;
pub use phase::ShowPhase;
pub use playback::Playback;
