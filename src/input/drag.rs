use glam::Vec2;
use web_time::{Duration, Instant};

/// How a finished press/release sequence is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The pointer never travelled past the drag threshold.
    Click {
        /// Time between press and release.
        held_for: Duration,
    },
    /// The pointer travelled past the drag threshold.
    Drag,
}

impl DragOutcome {
    /// A click released before `timeout` elapsed.
    #[must_use]
    pub fn is_quick_click(self, timeout: Duration) -> bool {
        matches!(self, Self::Click { held_for } if held_for < timeout)
    }
}

/// Tracks one primary-button press from down to up.
///
/// Pointer travel is accumulated as path length, so a wiggle that returns
/// to its start still counts as a drag once it exceeds the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    last: Vec2,
    travelled: f32,
    moved: bool,
    started: Instant,
}

impl DragSession {
    /// Start a session at `at`.
    #[must_use]
    pub fn begin(at: Vec2, now: Instant) -> Self {
        Self {
            last: at,
            travelled: 0.0,
            moved: false,
            started: now,
        }
    }

    /// Record a pointer position and return the delta since the last one.
    pub fn advance(&mut self, at: Vec2, threshold: f32) -> Vec2 {
        let delta = at - self.last;
        self.last = at;
        self.travelled += delta.length();
        if self.travelled > threshold {
            self.moved = true;
        }
        delta
    }

    /// Whether the threshold has been exceeded.
    #[must_use]
    pub fn moved(&self) -> bool {
        self.moved
    }

    /// Total path length so far.
    #[must_use]
    pub fn travelled(&self) -> f32 {
        self.travelled
    }

    /// Last recorded pointer position.
    #[must_use]
    pub fn last_position(&self) -> Vec2 {
        self.last
    }

    /// Close the session.
    #[must_use]
    pub fn finish(self, now: Instant) -> DragOutcome {
        if self.moved {
            DragOutcome::Drag
        } else {
            DragOutcome::Click {
                held_for: now.saturating_duration_since(self.started),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: f32 = 3.0;
    const TIMEOUT: Duration = Duration::from_millis(200);

    #[test]
    fn small_quick_press_is_a_quick_click() {
        let t0 = Instant::now();
        let mut session = DragSession::begin(Vec2::new(10.0, 10.0), t0);
        let _ = session.advance(Vec2::new(11.0, 11.0), THRESHOLD);
        assert!(!session.moved());

        let outcome = session.finish(t0 + Duration::from_millis(120));
        assert!(outcome.is_quick_click(TIMEOUT));
    }

    #[test]
    fn travel_past_threshold_is_a_drag() {
        let t0 = Instant::now();
        let mut session = DragSession::begin(Vec2::ZERO, t0);
        let delta = session.advance(Vec2::new(4.0, 0.0), THRESHOLD);
        assert_eq!(delta, Vec2::new(4.0, 0.0));
        assert!(session.moved());
        assert_eq!(session.finish(t0), DragOutcome::Drag);
    }

    #[test]
    fn travel_is_cumulative() {
        let t0 = Instant::now();
        let mut session = DragSession::begin(Vec2::ZERO, t0);
        let _ = session.advance(Vec2::new(2.0, 0.0), THRESHOLD);
        assert!(!session.moved());
        let _ = session.advance(Vec2::ZERO, THRESHOLD);
        assert!(session.moved());
        assert_eq!(session.travelled(), 4.0);
        assert_eq!(session.last_position(), Vec2::ZERO);
    }

    #[test]
    fn slow_press_is_not_a_quick_click() {
        let t0 = Instant::now();
        let session = DragSession::begin(Vec2::ZERO, t0);
        let outcome = session.finish(t0 + Duration::from_millis(200));
        assert!(matches!(outcome, DragOutcome::Click { .. }));
        assert!(!outcome.is_quick_click(TIMEOUT));
    }
}
