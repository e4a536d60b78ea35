// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

#![deny(clippy::all)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]

//! Drone light show animation engine.
//!
//! Skyswarm animates a swarm of simulated drones through a sequence of
//! formations ("layers"), producing one flat `(x, y, z, r, g, b, a)` point
//! record per visible drone and per live firework particle each tick.
//! Rendering, windowing, and widgets are the host's problem: the engine is
//! a pure simulation that consumes a frame delta and control-surface calls,
//! and yields a buffer snapshot.
//!
//! # Key entry points
//!
//! - [`engine::ShowEngine`] - the engine context driving the per-tick step
//! - [`show::Show`] - the immutable-after-load show model
//! - [`options::Options`] - runtime configuration with TOML presets
//! - [`camera::CameraRig`] - derived view state for the render collaborator
//!
//! # Architecture
//!
//! A tick is single-threaded and synchronous: the startup state machine or
//! the playback clock advances, any in-flight formation transition fills
//! the animation buffer along curved per-drone paths, the fireworks
//! simulator integrates its particles, and the flat vertex buffer is
//! rebuilt. The host reads [`engine::ShowEngine::vertex_data`] once per
//! frame and uploads it; no partial frames are observable.

pub mod animation;
pub mod camera;
pub mod engine;
pub mod error;
pub mod fireworks;
pub mod options;
pub mod show;
pub mod util;
