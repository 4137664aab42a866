/// Longest frame step fed to the animation. Longer gaps (a suspended tab, a
/// debugger break) are clamped so the bob does not jump.
const MAX_FRAME_DT: f32 = 0.1;

/// Animation clock with smoothed FPS.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds of animation time since start.
    elapsed: f32,
    /// Frames advanced so far.
    frames: u64,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            frames: 0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Advance by `dt` seconds and return the step actually applied.
    /// Negative or non-finite steps count as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.frames += 1;

        if dt > 0.0 {
            let instant_fps = 1.0 / dt;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
        dt
    }

    /// Animation time in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_gaps_are_clamped() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(5.0), MAX_FRAME_DT);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), MAX_FRAME_DT);
        assert_eq!(clock.frame_count(), 3);
    }

    #[test]
    fn fps_converges() {
        let mut clock = FrameClock::new();
        for _ in 0..500 {
            let _ = clock.advance(1.0 / 30.0);
        }
        assert!((clock.fps() - 30.0).abs() < 0.5);
    }
}
