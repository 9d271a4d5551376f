/// A signature drawn in one burst can carry a near-zero capture span; clamp
/// the duration so playback still takes a tick instead of dividing by zero.
const MIN_DURATION_SECONDS: f64 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Direction {
    Forward,
    Backward,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tick {
    Running,
    ReachedEnd,
    ReachedStart,
}

/// Minimal controllable playback head: a position in seconds advanced by
/// caller-supplied timestamps. Direction and rate are imperative, progress
/// is a fraction, and completion is reported from `tick` rather than through
/// stored callbacks, so the owner decides what completion means.
#[derive(Clone, Debug)]
pub struct Timeline {
    duration: f64,
    position: f64,
    time_scale: f64,
    direction: Direction,
    last_tick_ms: Option<f64>,
}

impl Timeline {
    pub fn new(duration_seconds: f64) -> Self {
        Self {
            duration: duration_seconds.max(MIN_DURATION_SECONDS),
            position: 0.0,
            time_scale: 1.0,
            direction: Direction::Forward,
            last_tick_ms: None,
        }
    }

    pub fn play(&mut self) {
        self.direction = Direction::Forward;
    }

    pub fn reverse(&mut self) {
        self.direction = Direction::Backward;
    }

    pub fn set_time_scale(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.time_scale = factor;
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn position_seconds(&self) -> f64 {
        self.position
    }

    pub fn progress(&self) -> f64 {
        self.position / self.duration
    }

    /// Advances the head to `now_ms`. The first tick only anchors the clock;
    /// backwards timestamps are treated as zero elapsed time.
    pub fn tick(&mut self, now_ms: f64) -> Tick {
        let last = self.last_tick_ms.replace(now_ms).unwrap_or(now_ms);
        let elapsed = ((now_ms - last).max(0.0) / 1000.0) * self.time_scale;
        match self.direction {
            Direction::Forward => {
                self.position += elapsed;
                if self.position >= self.duration {
                    self.position = self.duration;
                    Tick::ReachedEnd
                } else {
                    Tick::Running
                }
            }
            Direction::Backward => {
                self.position -= elapsed;
                if self.position <= 0.0 {
                    self.position = 0.0;
                    Tick::ReachedStart
                } else {
                    Tick::Running
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plays_forward_to_completion() {
        let mut timeline = Timeline::new(1.0);
        timeline.play();
        assert_eq!(timeline.tick(0.0), Tick::Running);
        assert_eq!(timeline.tick(400.0), Tick::Running);
        assert!((timeline.progress() - 0.4).abs() < 1e-9);
        assert_eq!(timeline.tick(1000.0), Tick::ReachedEnd);
        assert_eq!(timeline.progress(), 1.0);
    }

    #[test]
    fn reverse_runs_back_toward_start() {
        let mut timeline = Timeline::new(1.0);
        timeline.play();
        timeline.tick(0.0);
        timeline.tick(600.0);
        timeline.reverse();
        assert_eq!(timeline.tick(900.0), Tick::Running);
        assert!((timeline.progress() - 0.3).abs() < 1e-9);
        assert_eq!(timeline.tick(1200.0), Tick::ReachedStart);
        assert_eq!(timeline.progress(), 0.0);
    }

    #[test]
    fn time_scale_doubles_the_rate() {
        let mut timeline = Timeline::new(1.0);
        timeline.play();
        timeline.tick(0.0);
        timeline.tick(500.0);
        timeline.set_time_scale(2.0);
        timeline.reverse();
        // 250ms of wall clock at 2x covers the 500ms played forward.
        assert_eq!(timeline.tick(750.0), Tick::ReachedStart);
    }

    #[test]
    fn reversing_at_start_stays_put() {
        let mut timeline = Timeline::new(1.0);
        timeline.reverse();
        assert_eq!(timeline.tick(0.0), Tick::ReachedStart);
        assert_eq!(timeline.tick(100.0), Tick::ReachedStart);
        assert_eq!(timeline.progress(), 0.0);
    }

    #[test]
    fn progress_is_clamped_to_unit_range() {
        let mut timeline = Timeline::new(0.5);
        timeline.play();
        timeline.tick(0.0);
        timeline.tick(10_000.0);
        assert_eq!(timeline.progress(), 1.0);
    }

    #[test]
    fn zero_duration_is_clamped() {
        let mut timeline = Timeline::new(0.0);
        timeline.play();
        timeline.tick(0.0);
        assert_eq!(timeline.tick(1.0), Tick::ReachedEnd);
    }

    #[test]
    fn bad_time_scale_is_ignored() {
        let mut timeline = Timeline::new(1.0);
        timeline.set_time_scale(0.0);
        timeline.set_time_scale(-3.0);
        timeline.set_time_scale(f64::NAN);
        timeline.play();
        timeline.tick(0.0);
        timeline.tick(500.0);
        assert!((timeline.progress() - 0.5).abs() < 1e-9);
    }
}
