use web_sys::CanvasRenderingContext2d;

use signbook_shared::{GestureState, Point, ReplayFrame};

use crate::state::{State, INK_COLOR, INK_WIDTH};

fn clear_surface(state: &State) {
    state
        .ctx
        .clear_rect(0.0, 0.0, state.surface_width, state.surface_height);
}

fn begin_ink(ctx: &CanvasRenderingContext2d) {
    ctx.set_stroke_style_str(INK_COLOR);
    ctx.set_fill_style_str(INK_COLOR);
    ctx.set_line_width(INK_WIDTH);
}

fn draw_dot(ctx: &CanvasRenderingContext2d, x: f64, y: f64) {
    ctx.begin_path();
    let _ = ctx.arc(x, y, INK_WIDTH / 2.0, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill();
}

fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point]) {
    if points.is_empty() {
        return;
    }
    if points.len() == 1 {
        draw_dot(ctx, points[0].x, points[0].y);
        return;
    }
    ctx.begin_path();
    ctx.move_to(points[0].x, points[0].y);
    for point in &points[1..] {
        ctx.line_to(point.x, point.y);
    }
    ctx.stroke();
}

/// Full raster pass over the drawing: committed strokes plus whatever stroke
/// is in progress. Runs every animation frame while recording and once more
/// when a stroke seals.
pub fn redraw_drawing(state: &State) {
    clear_surface(state);
    begin_ink(&state.ctx);
    for stroke in state.recorder.signature().strokes() {
        draw_polyline(&state.ctx, &stroke.points);
    }
    if let Some(stroke) = state.recorder.in_progress() {
        draw_polyline(&state.ctx, &stroke.points);
    }
}

// A subpath holding a single point would stroke to nothing, so it gets the
// same dot treatment as a single-point stroke in drawing mode.
fn close_subpath(ctx: &CanvasRenderingContext2d, points: usize, at: (f64, f64)) {
    match points {
        0 => {}
        1 => draw_dot(ctx, at.0, at.1),
        _ => ctx.stroke(),
    }
}

fn draw_frames(ctx: &CanvasRenderingContext2d, frames: &[ReplayFrame]) {
    begin_ink(ctx);
    let mut subpath = 0;
    let mut start = (0.0, 0.0);
    for frame in frames {
        if frame.is_new_stroke {
            close_subpath(ctx, subpath, start);
            ctx.begin_path();
            ctx.move_to(frame.x, frame.y);
            start = (frame.x, frame.y);
            subpath = 1;
        } else if subpath > 0 {
            ctx.line_to(frame.x, frame.y);
            subpath += 1;
        }
    }
    close_subpath(ctx, subpath, start);
}

/// Redraws the replay at the gesture's current position: the frame prefix
/// whose relative time has been reached, with a new subpath per stroke.
pub fn redraw_replay(state: &State) {
    let Some(track) = state.gesture.track() else {
        return;
    };
    let upto = track.frames_through(state.gesture.progress() * track.duration_seconds());
    clear_surface(state);
    draw_frames(&state.ctx, &track.frames()[..upto]);
}

/// Freezes the replay at the complete signature (commit).
pub fn redraw_replay_full(state: &State) {
    let Some(track) = state.gesture.track() else {
        return;
    };
    clear_surface(state);
    draw_frames(&state.ctx, track.frames());
}

/// Redraw after a resize: whichever of the two surface owners is active
/// repaints; they are mutually exclusive by state.
pub fn redraw_surface(state: &State) {
    match state.gesture.state() {
        GestureState::Holding | GestureState::Reversing => redraw_replay(state),
        GestureState::Committed => redraw_replay_full(state),
        GestureState::Idle => redraw_drawing(state),
    }
}
