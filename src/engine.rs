//! The engine context: owns all mutable show state and runs the per-tick
//! simulation step.
//!
//! One [`ShowEngine::tick`] per frame advances the startup sequence, the
//! show clock, any in-flight transition, and the particle set, then
//! rebuilds the flat vertex buffer the renderer uploads. The caller passes
//! the raw frame delta from its own monotonic clock; all speed scaling
//! happens here.

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::animation::phase::ShowPhase;
use crate::animation::playback::Playback;
use crate::animation::transition::{
    fill_takeoff_frame, fill_transition_frame, snap_to_layer,
};
use crate::error::SkyswarmError;
use crate::fireworks::Fireworks;
use crate::options::Options;
use crate::show::{ground_formation, DronePoint, Show};
use crate::util::easing::EasingFunction;

/// How many of the animation buffer's drones the renderer should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisibleCount {
    /// Draw the entire animation buffer.
    #[default]
    All,
    /// Draw only the first `n` drones.
    Count(usize),
}

/// Floats per vertex record: position xyz plus color rgba.
const FLOATS_PER_POINT: usize = 7;

/// The show-state animation engine.
///
/// Single-threaded and synchronous: each tick runs to completion before the
/// renderer reads the buffer, so no partial frames are ever observable. Work
/// per tick is bounded by the swarm size plus the live particle count.
pub struct ShowEngine {
    show: Show,
    ground: Vec<DronePoint>,
    buffer: Vec<DronePoint>,
    phase: ShowPhase,
    playback: Playback,
    fireworks: Fireworks,
    visible: VisibleCount,
    fireworks_enabled: bool,
    options: Options,
    vertex_data: Vec<f32>,
    rng: StdRng,
}

impl ShowEngine {
    /// Engine with default options and no show loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Engine with explicit options and no show loaded.
    #[must_use]
    pub fn with_options(options: Options) -> Self {
        let mut playback = Playback::new();
        playback.set_speed(options.playback.speed);
        let fireworks_enabled = options.fireworks.enabled;
        Self {
            show: Show::default(),
            ground: Vec::new(),
            buffer: Vec::new(),
            phase: ShowPhase::Steady { playing: false },
            playback,
            fireworks: Fireworks::new(),
            visible: VisibleCount::All,
            fireworks_enabled,
            options,
            vertex_data: Vec::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Install a show and reset all animation state for it.
    ///
    /// Regenerates the ground formation, rewinds the clock (speed survives,
    /// it is a user preference), clears particles, and restarts the takeoff
    /// sequence. An empty show leaves the engine valid but inert.
    pub fn load_show(&mut self, show: Show) {
        self.show = show;
        self.fireworks.clear();
        self.playback.reset();
        self.visible = VisibleCount::All;

        let max = self.show.max_drones();
        self.ground = ground_formation(
            max,
            self.show.layers.first().map(|l| l.points.as_slice()),
            self.options.display.drone_size,
        );

        self.buffer.clear();
        if self.show.is_empty() {
            self.phase = ShowPhase::Steady { playing: false };
        } else {
            self.buffer.extend_from_slice(&self.ground);
            self.phase = ShowPhase::initial();
        }
        self.rebuild_vertex_data();
    }

    /// Load a show document from disk.
    ///
    /// On any ingestion failure the error is surfaced to the caller, and
    /// the engine is left holding an empty show: valid, inert, zero drones.
    pub fn load_show_file(&mut self, path: &Path) -> Result<(), SkyswarmError> {
        match Show::from_path(path) {
            Ok(show) => {
                self.load_show(show);
                Ok(())
            }
            Err(e) => {
                log::warn!("show load failed, engine is inert: {e}");
                self.load_show(Show::default());
                Err(e)
            }
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// `frame_delta_s` is wall-clock seconds since the previous tick; the
    /// playback speed multiplier is applied here, to the startup hold, the
    /// show clock, transition flight, and particle integration alike.
    pub fn tick(&mut self, frame_delta_s: f32) {
        let dt_s = frame_delta_s * self.playback.speed();
        let dt_ms = dt_s * 1000.0;

        match self.phase {
            ShowPhase::PreTakeoff { held_ms } => {
                let held = held_ms + dt_ms;
                if held >= self.options.playback.pre_takeoff_ms {
                    self.phase = ShowPhase::TakingOff { elapsed_ms: 0.0 };
                } else {
                    self.phase = ShowPhase::PreTakeoff { held_ms: held };
                }
            }
            ShowPhase::TakingOff { elapsed_ms } => {
                self.step_takeoff(elapsed_ms + dt_ms);
            }
            ShowPhase::Steady { .. } | ShowPhase::Transitioning { .. } => {
                self.step_playback(dt_ms);
            }
        }

        self.fireworks.step(dt_s);
        self.rebuild_vertex_data();
    }

    fn step_takeoff(&mut self, elapsed_ms: f32) {
        let Some(first) = self.show.layers.first() else {
            // Unreachable with a loaded show; degrade to inert.
            self.phase = ShowPhase::Steady { playing: false };
            return;
        };

        let t = (elapsed_ms / self.options.playback.transition_ms).min(1.0);
        let eased = EasingFunction::DEFAULT.evaluate(t);
        fill_takeoff_frame(
            &mut self.buffer,
            &self.ground,
            &first.points,
            eased,
        );

        if t >= 1.0 {
            snap_to_layer(&mut self.buffer, &first.points);
            self.visible = VisibleCount::Count(first.points.len());
            self.playback.rewind();
            self.phase = ShowPhase::Steady { playing: true };
        } else {
            self.phase = ShowPhase::TakingOff { elapsed_ms };
        }
    }

    fn step_playback(&mut self, dt_ms: f32) {
        let total = self.show.total_duration_ms();

        if self.phase.is_playing() {
            if self.playback.advance(dt_ms, total) {
                self.on_loop_completed();
            }
            // Scan for the layer the clock has reached. Only arms a new
            // flight when none is in progress.
            if matches!(self.phase, ShowPhase::Steady { .. }) {
                if let Some(target) =
                    self.show.layer_at(self.playback.elapsed_ms())
                {
                    if target != self.playback.current_layer() {
                        self.request_transition(target, false);
                    }
                }
            }
        }

        // An in-flight transition advances even while paused.
        if let ShowPhase::Transitioning {
            from,
            to,
            elapsed_ms,
            playing,
        } = self.phase
        {
            self.step_transition(from, to, elapsed_ms + dt_ms, playing);
        }
    }

    fn on_loop_completed(&mut self) {
        if self.fireworks_enabled {
            if let Some(last) = self.show.layers.last() {
                self.fireworks.burst(&last.points, &mut self.rng);
            }
        }
        if self.displayed_layer() != 0 {
            // The wrap-around return flight retargets even mid-transition.
            self.request_transition(0, true);
        }
    }

    fn step_transition(
        &mut self,
        from: usize,
        to: usize,
        elapsed_ms: f32,
        playing: bool,
    ) {
        let (Some(from_layer), Some(to_layer)) =
            (self.show.layers.get(from), self.show.layers.get(to))
        else {
            self.phase = ShowPhase::Steady { playing };
            return;
        };

        let t = (elapsed_ms / self.options.playback.transition_ms).min(1.0);
        let eased = EasingFunction::DEFAULT.evaluate(t);
        fill_transition_frame(
            &mut self.buffer,
            &from_layer.points,
            &to_layer.points,
            eased,
        );

        if t >= 1.0 {
            snap_to_layer(&mut self.buffer, &to_layer.points);
            self.visible = VisibleCount::Count(to_layer.points.len());
            self.playback.set_current_layer(to);
            self.phase = ShowPhase::Steady { playing };
        } else {
            self.phase = ShowPhase::Transitioning {
                from,
                to,
                elapsed_ms,
                playing,
            };
        }
    }

    /// The layer the audience currently sees: the in-flight target during a
    /// transition, the layer cursor otherwise.
    fn displayed_layer(&self) -> usize {
        match self.phase {
            ShowPhase::Transitioning { to, .. } => to,
            _ => self.playback.current_layer(),
        }
    }

    /// Arm a transition toward `target`.
    ///
    /// Ignored when the show is empty, the index is out of range, the
    /// target is already displayed, or the startup sequence is still
    /// running. `retarget` lets the request replace an in-flight
    /// transition: the old flight is discarded and the new one starts from
    /// the old target's formation at progress zero. Not a smooth handoff.
    fn request_transition(&mut self, target: usize, retarget: bool) {
        if target >= self.show.layers.len()
            || target == self.displayed_layer()
        {
            return;
        }
        match self.phase {
            ShowPhase::Steady { playing } => {
                self.phase = ShowPhase::Transitioning {
                    from: self.playback.current_layer(),
                    to: target,
                    elapsed_ms: 0.0,
                    playing,
                };
            }
            ShowPhase::Transitioning { to, playing, .. } if retarget => {
                self.playback.set_current_layer(to);
                self.phase = ShowPhase::Transitioning {
                    from: to,
                    to: target,
                    elapsed_ms: 0.0,
                    playing,
                };
            }
            _ => {
                log::debug!(
                    "transition request to layer {target} ignored in phase {:?}",
                    self.phase
                );
            }
        }
    }

    fn rebuild_vertex_data(&mut self) {
        self.vertex_data.clear();
        let drones = self.visible_drone_count();
        self.vertex_data.reserve(
            (drones + self.fireworks.len()) * FLOATS_PER_POINT,
        );
        for p in self.buffer.iter().take(drones) {
            self.vertex_data.extend_from_slice(&[
                p.position.x,
                p.position.y,
                p.position.z,
                p.color.x,
                p.color.y,
                p.color.z,
                p.color.w,
            ]);
        }
        for p in self.fireworks.particles() {
            self.vertex_data.extend_from_slice(&[
                p.position.x,
                p.position.y,
                p.position.z,
                p.color.x,
                p.color.y,
                p.color.z,
                p.color.w,
            ]);
        }
    }

    // --- Control surface -------------------------------------------------

    /// Toggle play/pause. No effect until the startup sequence finishes.
    pub fn toggle_playback(&mut self) {
        let playing = self.phase.is_playing();
        self.phase.set_playing(!playing);
    }

    /// Seek to a normalized timeline position in `[0, 1]`. The layer scan
    /// on the next playing tick flies the swarm to wherever the clock
    /// landed.
    pub fn set_timeline_position(&mut self, normalized: f32) {
        let total = self.show.total_duration_ms();
        self.playback.seek(normalized, total);
    }

    /// Set the playback speed multiplier, clamped to the supported range.
    pub fn set_speed(&mut self, speed: f32) {
        self.playback.set_speed(speed);
    }

    /// Fly directly to a layer, replacing any flight already in progress.
    /// Ignored during startup and for out-of-range or already-displayed
    /// targets.
    pub fn select_layer(&mut self, index: usize) {
        self.request_transition(index, true);
    }

    /// Override how many drones the renderer draws. Counts clamp to
    /// `[1, max_drones]`.
    pub fn set_visible_count(&mut self, visible: VisibleCount) {
        self.visible = match visible {
            VisibleCount::All => VisibleCount::All,
            VisibleCount::Count(n) => {
                if self.buffer.is_empty() {
                    VisibleCount::All
                } else {
                    VisibleCount::Count(n.clamp(1, self.buffer.len()))
                }
            }
        };
    }

    /// Enable or disable the loop-completion fireworks burst.
    pub fn set_fireworks_enabled(&mut self, enabled: bool) {
        self.fireworks_enabled = enabled;
    }

    // --- Accessors --------------------------------------------------------

    /// The loaded show.
    #[must_use]
    pub fn show(&self) -> &Show {
        &self.show
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> ShowPhase {
        self.phase
    }

    /// Whether show time is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    /// Index of the layer the audience currently sees.
    #[must_use]
    pub fn current_layer(&self) -> usize {
        self.displayed_layer()
    }

    /// Normalized timeline position in `[0, 1]`.
    #[must_use]
    pub fn timeline_position(&self) -> f32 {
        self.playback
            .timeline_position(self.show.total_duration_ms())
    }

    /// Playback speed multiplier.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.playback.speed()
    }

    /// Whether loop-completion fireworks are enabled.
    #[must_use]
    pub fn fireworks_enabled(&self) -> bool {
        self.fireworks_enabled
    }

    /// Number of live particles.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.fireworks.len()
    }

    /// Swarm size of the loaded show.
    #[must_use]
    pub fn max_drones(&self) -> usize {
        self.buffer.len()
    }

    /// Number of drones the renderer should draw this frame.
    #[must_use]
    pub fn visible_drone_count(&self) -> usize {
        match self.visible {
            VisibleCount::All => self.buffer.len(),
            VisibleCount::Count(n) => n.min(self.buffer.len()),
        }
    }

    /// This tick's animation buffer: one entry per drone in the swarm.
    #[must_use]
    pub fn animation_buffer(&self) -> &[DronePoint] {
        &self.buffer
    }

    /// This tick's flat render buffer: 7 floats (x, y, z, r, g, b, a) per
    /// visible drone, followed by 7 per live particle. Order within the
    /// buffer is upload convenience only; consumers draw it as an
    /// unordered point set.
    #[must_use]
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }
}

impl Default for ShowEngine {
    fn default() -> Self {
        Self::new()
    }
}
