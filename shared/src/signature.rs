use crate::path::build_path;

/// Minimum complexity for a drawing to count as a signature. Both bounds are
/// inclusive and deliberately crude: they reject a single tap or a trivial
/// scribble, nothing more.
pub const MIN_POINTS: usize = 50;
pub const MIN_DISTANCE: f64 = 150.0;

/// One captured sample: coordinates relative to the drawing surface's
/// top-left corner, plus the wall-clock capture time in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub time: f64,
}

/// Core of the point sampler: mouse-style events carry `clientX`/`clientY`
/// directly, touch-style events carry them on `touches[0]`; the caller hands
/// in whichever it found. Missing or non-finite coordinates yield no sample.
pub fn sample_point(
    client_x: Option<f64>,
    client_y: Option<f64>,
    rect_left: f64,
    rect_top: f64,
    now_ms: f64,
) -> Option<Point> {
    let x = client_x?;
    let y = client_y?;
    if !x.is_finite() || !y.is_finite() || !now_ms.is_finite() {
        return None;
    }
    Some(Point {
        x: x - rect_left,
        y: y - rect_top,
        time: now_ms,
    })
}

/// One continuous pointer-down-to-up motion. Sealed (never mutated) once it
/// has been appended to a [`Signature`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn traced_distance(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| {
                let dx = pair[1].x - pair[0].x;
                let dy = pair[1].y - pair[0].y;
                (dx * dx + dy * dy).sqrt()
            })
            .sum()
    }
}

pub fn total_points(strokes: &[Stroke]) -> usize {
    strokes.iter().map(|stroke| stroke.points.len()).sum()
}

pub fn total_distance(strokes: &[Stroke]) -> f64 {
    strokes.iter().map(Stroke::traced_distance).sum()
}

/// Validator over the full stroke list. Zero strokes is always invalid.
pub fn is_complex_enough(strokes: &[Stroke]) -> bool {
    total_points(strokes) >= MIN_POINTS && total_distance(strokes) >= MIN_DISTANCE
}

/// The full set of sealed strokes captured in one signing session, with the
/// derived values recomputed once per mutation. Mutation is limited to
/// appending a sealed stroke or clearing to empty; everyone else reads.
#[derive(Clone, Debug, Default)]
pub struct Signature {
    strokes: Vec<Stroke>,
    is_valid: bool,
    path_string: String,
    duration_seconds: f64,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn path_string(&self) -> &str {
        &self.path_string
    }

    pub fn duration_seconds(&self) -> f64 {
        self.duration_seconds
    }

    /// Appends a sealed stroke. Empty strokes are never committed, so an
    /// empty argument is a no-op.
    pub fn push_stroke(&mut self, stroke: Stroke) {
        if stroke.points.is_empty() {
            return;
        }
        self.strokes.push(stroke);
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.strokes.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.is_valid = is_complex_enough(&self.strokes);
        self.path_string = build_path(&self.strokes);
        self.duration_seconds = self.capture_span_ms() / 1000.0;
    }

    fn capture_span_ms(&self) -> f64 {
        let mut min_time = f64::INFINITY;
        let mut max_time = f64::NEG_INFINITY;
        for stroke in &self.strokes {
            for point in &stroke.points {
                min_time = min_time.min(point.time);
                max_time = max_time.max(point.time);
            }
        }
        if min_time.is_finite() && max_time.is_finite() {
            max_time - min_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stroke(points: &[(f64, f64, f64)]) -> Stroke {
        Stroke {
            points: points
                .iter()
                .map(|&(x, y, time)| Point { x, y, time })
                .collect(),
        }
    }

    /// One stroke along the x axis: `count` points spaced `step` apart.
    fn line_stroke(count: usize, step: f64) -> Stroke {
        Stroke {
            points: (0..count)
                .map(|i| Point {
                    x: i as f64 * step,
                    y: 0.0,
                    time: i as f64 * 10.0,
                })
                .collect(),
        }
    }

    #[test]
    fn sample_point_is_surface_relative() {
        let point = sample_point(Some(120.0), Some(80.0), 100.0, 50.0, 5.0).unwrap();
        assert_eq!(point.x, 20.0);
        assert_eq!(point.y, 30.0);
        assert_eq!(point.time, 5.0);
    }

    #[test]
    fn sample_point_drops_missing_or_bad_coordinates() {
        assert!(sample_point(None, Some(1.0), 0.0, 0.0, 0.0).is_none());
        assert!(sample_point(Some(1.0), None, 0.0, 0.0, 0.0).is_none());
        assert!(sample_point(Some(f64::NAN), Some(1.0), 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn empty_signature_is_invalid() {
        let signature = Signature::new();
        assert!(!signature.is_valid());
        assert_eq!(signature.path_string(), "");
        assert_eq!(signature.duration_seconds(), 0.0);
    }

    #[test]
    fn exact_thresholds_are_inclusive() {
        // 30 points covering 80 distance plus 20 points covering 70 distance:
        // exactly 50 points and 150.0 total distance.
        let first = line_stroke(30, 80.0 / 29.0);
        let second = line_stroke(20, 70.0 / 19.0);
        let strokes = vec![first, second];
        assert_eq!(total_points(&strokes), 50);
        assert!((total_distance(&strokes) - 150.0).abs() < 1e-9);
        assert!(is_complex_enough(&strokes));
    }

    #[test]
    fn below_either_threshold_is_invalid() {
        // 49 points, plenty of distance.
        assert!(!is_complex_enough(&[line_stroke(49, 10.0)]));
        // 60 points, distance just short of 150.
        assert!(!is_complex_enough(&[line_stroke(60, 149.999 / 59.0)]));
    }

    #[test]
    fn validity_is_monotone_under_additional_strokes() {
        let mut signature = Signature::new();
        signature.push_stroke(line_stroke(60, 5.0));
        assert!(signature.is_valid());
        signature.push_stroke(stroke(&[(0.0, 0.0, 600.0), (1.0, 0.0, 610.0)]));
        assert!(signature.is_valid());
    }

    #[test]
    fn empty_strokes_are_never_committed() {
        let mut signature = Signature::new();
        signature.push_stroke(Stroke::default());
        assert!(signature.is_empty());
    }

    #[test]
    fn duration_spans_first_to_last_point() {
        let mut signature = Signature::new();
        signature.push_stroke(stroke(&[(0.0, 0.0, 1000.0), (1.0, 1.0, 1400.0)]));
        signature.push_stroke(stroke(&[(2.0, 2.0, 2000.0), (3.0, 3.0, 3500.0)]));
        assert!((signature.duration_seconds() - 2.5).abs() < 1e-9);
    }

    #[test]
    fn clear_resets_everything() {
        let mut signature = Signature::new();
        signature.push_stroke(line_stroke(60, 5.0));
        assert!(signature.is_valid());
        signature.clear();
        assert!(signature.is_empty());
        assert!(!signature.is_valid());
        assert_eq!(signature.path_string(), "");
        assert_eq!(signature.duration_seconds(), 0.0);
        // A fresh stroke after clear behaves like first use.
        signature.push_stroke(line_stroke(60, 5.0));
        assert!(signature.is_valid());
    }
}
