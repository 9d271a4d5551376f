use crate::signature::Signature;

/// One drawable keyframe of the replay: a captured point plus its offset
/// from the first point of the whole signature and whether it opens a new
/// subpath.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayFrame {
    pub x: f64,
    pub y: f64,
    pub time: f64,
    pub relative_time: f64,
    pub is_new_stroke: bool,
}

/// The globally time-sorted flattening of a signature, rebuilt once per hold
/// gesture and never persisted.
#[derive(Clone, Debug, Default)]
pub struct ReplayTrack {
    frames: Vec<ReplayFrame>,
}

impl ReplayTrack {
    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn duration_seconds(&self) -> f64 {
        self.frames
            .last()
            .map(|frame| frame.relative_time / 1000.0)
            .unwrap_or(0.0)
    }

    /// Number of frames with `relative_time` at or before the given playback
    /// position. Frames are sorted, so this is the prefix the renderer draws.
    pub fn frames_through(&self, position_seconds: f64) -> usize {
        let cutoff = position_seconds * 1000.0;
        self.frames
            .partition_point(|frame| frame.relative_time <= cutoff)
    }
}

/// Flattens sealed strokes into a replay track: tag the first point of every
/// stroke, compute offsets from the signature's first captured point, then
/// sort all frames by absolute time. A single-pointer surface already yields
/// them in order; the global sort keeps the track correct if strokes ever
/// arrive with overlapping timestamps.
pub fn prepare_replay_data(signature: &Signature) -> ReplayTrack {
    let first_time = signature
        .strokes()
        .iter()
        .flat_map(|stroke| stroke.points.iter())
        .map(|point| point.time)
        .fold(f64::INFINITY, f64::min);
    if !first_time.is_finite() {
        return ReplayTrack::default();
    }

    let mut frames = Vec::with_capacity(
        signature
            .strokes()
            .iter()
            .map(|stroke| stroke.points.len())
            .sum(),
    );
    for stroke in signature.strokes() {
        for (index, point) in stroke.points.iter().enumerate() {
            frames.push(ReplayFrame {
                x: point.x,
                y: point.y,
                time: point.time,
                relative_time: point.time - first_time,
                is_new_stroke: index == 0,
            });
        }
    }
    // Stable, so same-timestamp frames keep stroke order.
    frames.sort_by(|a, b| a.time.total_cmp(&b.time));
    ReplayTrack { frames }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{Point, Stroke};

    fn stroke(points: &[(f64, f64, f64)]) -> Stroke {
        Stroke {
            points: points
                .iter()
                .map(|&(x, y, time)| Point { x, y, time })
                .collect(),
        }
    }

    fn signature(strokes: Vec<Stroke>) -> Signature {
        let mut signature = Signature::new();
        for stroke in strokes {
            signature.push_stroke(stroke);
        }
        signature
    }

    #[test]
    fn empty_signature_yields_empty_track() {
        let track = prepare_replay_data(&Signature::new());
        assert!(track.is_empty());
        assert_eq!(track.duration_seconds(), 0.0);
    }

    #[test]
    fn track_has_one_frame_per_point_sorted_by_time() {
        let signature = signature(vec![
            stroke(&[(0.0, 0.0, 1000.0), (1.0, 0.0, 1050.0), (2.0, 0.0, 1100.0)]),
            stroke(&[(5.0, 5.0, 1500.0), (6.0, 5.0, 1600.0)]),
        ]);
        let track = prepare_replay_data(&signature);
        assert_eq!(track.len(), 5);
        for pair in track.frames().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        assert_eq!(track.frames()[0].relative_time, 0.0);
        assert_eq!(track.frames()[4].relative_time, 600.0);
        assert!((track.duration_seconds() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn only_stroke_starts_are_tagged() {
        let signature = signature(vec![
            stroke(&[(0.0, 0.0, 0.0), (1.0, 0.0, 10.0)]),
            stroke(&[(2.0, 0.0, 20.0), (3.0, 0.0, 30.0), (4.0, 0.0, 40.0)]),
        ]);
        let track = prepare_replay_data(&signature);
        let tags: Vec<bool> = track.frames().iter().map(|f| f.is_new_stroke).collect();
        assert_eq!(tags, vec![true, false, true, false, false]);
    }

    #[test]
    fn overlapping_stroke_times_are_globally_sorted() {
        // Two strokes whose capture windows interleave, as a multi-pointer
        // surface could produce.
        let signature = signature(vec![
            stroke(&[(0.0, 0.0, 0.0), (1.0, 0.0, 100.0)]),
            stroke(&[(9.0, 9.0, 50.0), (8.0, 9.0, 150.0)]),
        ]);
        let track = prepare_replay_data(&signature);
        let times: Vec<f64> = track.frames().iter().map(|f| f.time).collect();
        assert_eq!(times, vec![0.0, 50.0, 100.0, 150.0]);
    }

    #[test]
    fn frames_through_walks_the_prefix() {
        let signature = signature(vec![stroke(&[
            (0.0, 0.0, 0.0),
            (1.0, 0.0, 250.0),
            (2.0, 0.0, 500.0),
            (3.0, 0.0, 1000.0),
        ])]);
        let track = prepare_replay_data(&signature);
        assert_eq!(track.frames_through(0.0), 1);
        assert_eq!(track.frames_through(0.25), 2);
        assert_eq!(track.frames_through(0.6), 3);
        assert_eq!(track.frames_through(track.duration_seconds()), 4);
    }
}
