//! Playback clock and layer cursor for a loaded show.

/// Lower bound of the playback speed multiplier.
pub const MIN_SPEED: f32 = 0.1;
/// Upper bound of the playback speed multiplier.
pub const MAX_SPEED: f32 = 4.0;

/// Tracks elapsed show time, the speed multiplier, and which layer the show
/// currently sits on. Time is monotonic within a loop cycle and wraps
/// modulo the total duration when a loop completes.
#[derive(Debug, Clone)]
pub struct Playback {
    elapsed_ms: f32,
    speed: f32,
    current_layer: usize,
}

impl Playback {
    /// Fresh clock at the start of the show, speed 1x.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0.0,
            speed: 1.0,
            current_layer: 0,
        }
    }

    /// Elapsed show time in milliseconds, within the current loop cycle.
    #[must_use]
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Advance the clock by an already speed-scaled delta. Returns `true`
    /// when this advancement completed a full loop, in which case the clock
    /// has wrapped modulo `total_ms`.
    pub fn advance(&mut self, dt_ms: f32, total_ms: f32) -> bool {
        self.elapsed_ms += dt_ms;
        if total_ms > 0.0 && self.elapsed_ms >= total_ms {
            self.elapsed_ms %= total_ms;
            return true;
        }
        false
    }

    /// Seek to a normalized timeline position in `[0, 1]`.
    pub fn seek(&mut self, normalized: f32, total_ms: f32) {
        self.elapsed_ms = normalized.clamp(0.0, 1.0) * total_ms;
    }

    /// Normalized timeline position in `[0, 1]`.
    #[must_use]
    pub fn timeline_position(&self, total_ms: f32) -> f32 {
        if total_ms > 0.0 {
            (self.elapsed_ms / total_ms).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Playback speed multiplier.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the speed multiplier, clamped to [`MIN_SPEED`]..[`MAX_SPEED`].
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Index of the layer the show currently sits on.
    #[must_use]
    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    /// Move the layer cursor, as a completed transition does.
    pub fn set_current_layer(&mut self, layer: usize) {
        self.current_layer = layer;
    }

    /// Rewind the clock to zero without touching speed or layer cursor.
    pub fn rewind(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Reset clock and layer cursor for a new show. Speed is a user
    /// preference and survives reloads.
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.current_layer = 0;
    }
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_accumulates_until_wrap() {
        let mut playback = Playback::new();
        assert!(!playback.advance(400.0, 1000.0));
        assert!(!playback.advance(400.0, 1000.0));
        assert_eq!(playback.elapsed_ms(), 800.0);

        // Crossing the end wraps modulo the total.
        assert!(playback.advance(400.0, 1000.0));
        assert!((playback.elapsed_ms() - 200.0).abs() < 1e-3);
    }

    #[test]
    fn exact_end_wraps_to_zero() {
        let mut playback = Playback::new();
        assert!(playback.advance(1000.0, 1000.0));
        assert_eq!(playback.elapsed_ms(), 0.0);
    }

    #[test]
    fn zero_total_never_loops() {
        let mut playback = Playback::new();
        assert!(!playback.advance(500.0, 0.0));
        assert_eq!(playback.elapsed_ms(), 500.0);
    }

    #[test]
    fn seek_maps_normalized_position_to_time() {
        let mut playback = Playback::new();
        playback.seek(0.25, 4000.0);
        assert_eq!(playback.elapsed_ms(), 1000.0);
        assert_eq!(playback.timeline_position(4000.0), 0.25);

        playback.seek(2.0, 4000.0);
        assert_eq!(playback.elapsed_ms(), 4000.0);
        playback.seek(-1.0, 4000.0);
        assert_eq!(playback.elapsed_ms(), 0.0);
    }

    #[test]
    fn speed_is_clamped() {
        let mut playback = Playback::new();
        playback.set_speed(10.0);
        assert_eq!(playback.speed(), MAX_SPEED);
        playback.set_speed(0.0);
        assert_eq!(playback.speed(), MIN_SPEED);
        playback.set_speed(1.5);
        assert_eq!(playback.speed(), 1.5);
    }

    #[test]
    fn reset_preserves_speed() {
        let mut playback = Playback::new();
        playback.set_speed(2.0);
        playback.set_current_layer(3);
        assert!(!playback.advance(100.0, 1000.0));

        playback.reset();
        assert_eq!(playback.elapsed_ms(), 0.0);
        assert_eq!(playback.current_layer(), 0);
        assert_eq!(playback.speed(), 2.0);
    }
}
