use crate::signature::{Point, Signature, Stroke};

enum Mode {
    Idle,
    Recording { stroke: Stroke },
}

/// Groups samples into strokes and owns the accumulated signature. The
/// recorder is the single writer; everyone else reads through the accessors.
pub struct StrokeRecorder {
    mode: Mode,
    signature: Signature,
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            signature: Signature::new(),
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.mode, Mode::Recording { .. })
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn in_progress(&self) -> Option<&Stroke> {
        match &self.mode {
            Mode::Recording { stroke } => Some(stroke),
            Mode::Idle => None,
        }
    }

    /// Starts a new stroke. Returns false (and does nothing) while another
    /// stroke is still being recorded.
    pub fn begin(&mut self, point: Point) -> bool {
        if self.is_recording() {
            return false;
        }
        self.mode = Mode::Recording {
            stroke: Stroke {
                points: vec![point],
            },
        };
        true
    }

    /// Appends to the in-progress stroke; a no-op outside of recording.
    pub fn extend(&mut self, point: Point) -> bool {
        match &mut self.mode {
            Mode::Recording { stroke } => {
                stroke.points.push(point);
                true
            }
            Mode::Idle => false,
        }
    }

    /// Seals the in-progress stroke and appends it to the signature. Always
    /// returns to idle, so pointer-up, pointer-leave, and touch-end can all
    /// route here without caring which fired first.
    pub fn end(&mut self) {
        if let Mode::Recording { stroke } = std::mem::replace(&mut self.mode, Mode::Idle) {
            self.signature.push_stroke(stroke);
        }
    }

    pub fn clear(&mut self) {
        self.mode = Mode::Idle;
        self.signature.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64, time: f64) -> Point {
        Point { x, y, time }
    }

    #[test]
    fn begin_extend_end_seals_one_stroke() {
        let mut recorder = StrokeRecorder::new();
        assert!(recorder.begin(point(0.0, 0.0, 0.0)));
        assert!(recorder.extend(point(1.0, 0.0, 10.0)));
        assert!(recorder.extend(point(2.0, 0.0, 20.0)));
        assert!(recorder.is_recording());
        recorder.end();
        assert!(!recorder.is_recording());
        assert_eq!(recorder.signature().strokes().len(), 1);
        assert_eq!(recorder.signature().strokes()[0].points.len(), 3);
    }

    #[test]
    fn begin_while_recording_is_rejected() {
        let mut recorder = StrokeRecorder::new();
        assert!(recorder.begin(point(0.0, 0.0, 0.0)));
        assert!(!recorder.begin(point(5.0, 5.0, 5.0)));
        assert_eq!(recorder.in_progress().unwrap().points.len(), 1);
    }

    #[test]
    fn extend_and_end_outside_recording_are_noops() {
        let mut recorder = StrokeRecorder::new();
        assert!(!recorder.extend(point(1.0, 1.0, 1.0)));
        recorder.end();
        assert!(recorder.signature().is_empty());
    }

    #[test]
    fn repeated_end_is_idempotent() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(point(0.0, 0.0, 0.0));
        recorder.end();
        recorder.end();
        assert_eq!(recorder.signature().strokes().len(), 1);
    }

    #[test]
    fn clear_drops_strokes_and_recording() {
        let mut recorder = StrokeRecorder::new();
        recorder.begin(point(0.0, 0.0, 0.0));
        recorder.extend(point(1.0, 0.0, 10.0));
        recorder.end();
        recorder.begin(point(2.0, 0.0, 20.0));
        recorder.clear();
        assert!(!recorder.is_recording());
        assert!(recorder.signature().is_empty());
        // Behaves like first use afterwards.
        assert!(recorder.begin(point(0.0, 0.0, 30.0)));
        recorder.end();
        assert_eq!(recorder.signature().strokes().len(), 1);
    }
}
