use crate::replay::{prepare_replay_data, ReplayTrack};
use crate::signature::Signature;
use crate::timeline::{Tick, Timeline};

/// Releasing early reverses the replay at double speed so the bail-out feels
/// snappier than the hold.
pub const REVERSE_TIME_SCALE: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Holding,
    Reversing,
    Committed,
}

/// What the owner must do after advancing the gesture clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureTick {
    /// Nothing active.
    Quiet,
    /// Replay underway; mirror the fraction into the progress indicator.
    Progress(f64),
    /// The hold ran to completion. The owner resolves it: capture the
    /// surface's viewBox and call [`GestureController::commit`], or
    /// [`GestureController::reset`] if the surface is gone.
    HoldComplete,
    /// The reverse reached the start; clear the replay visual and zero the
    /// progress indicator. The signature's strokes are untouched.
    ReversedToStart,
}

/// Press-and-hold confirm machine layered on the replay timeline.
///
/// `Idle → Holding` on press (gated on a valid signature, a non-empty name,
/// and not having committed), `Holding → Committed` when the replay runs to
/// the end, `Holding → Reversing → Idle` on early release. A press while
/// anything but idle is ignored.
pub struct GestureController {
    state: GestureState,
    track: Option<ReplayTrack>,
    timeline: Option<Timeline>,
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self {
            state: GestureState::Idle,
            track: None,
            timeline: None,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_committed(&self) -> bool {
        self.state == GestureState::Committed
    }

    /// The replay runs while holding or reversing and gesture input is live
    /// in both, so one flag covers the tick loop's lifetime.
    pub fn is_active(&self) -> bool {
        matches!(self.state, GestureState::Holding | GestureState::Reversing)
    }

    pub fn track(&self) -> Option<&ReplayTrack> {
        self.track.as_ref()
    }

    pub fn progress(&self) -> f64 {
        match self.state {
            GestureState::Committed => 1.0,
            _ => self
                .timeline
                .as_ref()
                .map(Timeline::progress)
                .unwrap_or(0.0),
        }
    }

    /// Attempts to start the hold. Returns whether it started; a refusal is
    /// silent by design, the caller's UI hints at the unmet precondition.
    /// The replay track is rebuilt on every entry because strokes may have
    /// been added since the last attempt.
    pub fn press(&mut self, signature: &Signature, name: &str) -> bool {
        if self.state != GestureState::Idle {
            return false;
        }
        if !signature.is_valid() || name.trim().is_empty() {
            return false;
        }
        let track = prepare_replay_data(signature);
        if track.is_empty() {
            return false;
        }
        // Any previous timeline is dropped here; only one may ever be live.
        let mut timeline = Timeline::new(track.duration_seconds());
        timeline.play();
        self.track = Some(track);
        self.timeline = Some(timeline);
        self.state = GestureState::Holding;
        true
    }

    /// Pointer released. Before completion this turns the replay around;
    /// in any other state it is a no-op, so up/leave/touch-end may all fire.
    pub fn release(&mut self) {
        if self.state != GestureState::Holding {
            return;
        }
        if let Some(timeline) = &mut self.timeline {
            timeline.set_time_scale(REVERSE_TIME_SCALE);
            timeline.reverse();
        }
        self.state = GestureState::Reversing;
    }

    /// Advances the replay clock to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> GestureTick {
        if !self.is_active() {
            return GestureTick::Quiet;
        }
        let Some(timeline) = &mut self.timeline else {
            return GestureTick::Quiet;
        };
        match timeline.tick(now_ms) {
            Tick::ReachedEnd => GestureTick::HoldComplete,
            Tick::ReachedStart => {
                self.state = GestureState::Idle;
                self.timeline = None;
                GestureTick::ReversedToStart
            }
            Tick::Running => GestureTick::Progress(timeline.progress()),
        }
    }

    /// Marks the signature committed. Only valid once, from a hold that ran
    /// to completion; afterwards no press can start again.
    pub fn commit(&mut self) -> bool {
        if self.state == GestureState::Holding && self.progress() >= 1.0 {
            self.state = GestureState::Committed;
            self.timeline = None;
            true
        } else {
            false
        }
    }

    /// Back to the initial state: used by `clear()` and by a commit attempt
    /// whose surface went away before the viewBox could be captured.
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
        self.track = None;
        self.timeline = None;
    }
}
