//! Repaint scheduling
//!
//! egui repaints on input by default. A calculator only needs more than
//! that while something is moving on screen, so the controller keeps a
//! timed repaint going for exactly as long as an animation is alive and
//! reports the frame delta time the animations integrate with.
//!
//! Call [`RepaintController::begin_frame`] at the top of `update()`,
//! [`RepaintController::set_animating`] once the animations have been
//! advanced, and [`RepaintController::end_frame`] at the bottom.

use std::time::{Duration, Instant};

/// Frame interval while particles are in flight (~60 Hz).
const ANIMATION_INTERVAL: Duration = Duration::from_millis(16);

/// Longest delta time handed to the animations. A window that was asleep
/// for seconds should not teleport its particles.
const MAX_FRAME_DT: f32 = 0.1;

pub struct RepaintController {
    animating: bool,
    interval: Duration,
    last_frame: Instant,
    dt: f32,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self {
            animating: false,
            interval: ANIMATION_INTERVAL,
            last_frame: Instant::now(),
            dt: 0.0,
        }
    }

    pub fn begin_frame(&mut self) {
        self.start(Instant::now());
    }

    fn start(&mut self, now: Instant) {
        self.dt = now
            .duration_since(self.last_frame)
            .as_secs_f32()
            .min(MAX_FRAME_DT);
        self.last_frame = now;
    }

    /// Seconds since the previous frame, capped.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Keep timed repaints running while `animating` is true.
    pub fn set_animating(&mut self, animating: bool) {
        self.animating = animating;
    }

    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.animating {
            ctx.request_repaint_after(self.interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dt_is_capped() {
        let mut rc = RepaintController::new();
        let later = rc.last_frame + Duration::from_secs(5);
        rc.start(later);
        assert_eq!(rc.dt(), MAX_FRAME_DT);
    }

    #[test]
    fn test_dt_tracks_frames() {
        let mut rc = RepaintController::new();
        let t0 = rc.last_frame;
        rc.start(t0 + Duration::from_millis(16));
        assert!((rc.dt() - 0.016).abs() < 1e-4);
        rc.start(t0 + Duration::from_millis(48));
        assert!((rc.dt() - 0.032).abs() < 1e-4);
    }
}
