use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use signbook_shared::{GestureController, StrokeRecorder};

pub const INK_COLOR: &str = "#1f1f1f";
pub const INK_WIDTH: f64 = 2.5;

/// Input source that began the active stroke. Pointer-event browsers fire
/// touch events for the same contact as well; tracking the source keeps a
/// stroke fed by exactly one event stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawSource {
    Pointer(i32),
    Touch,
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub recorder: StrokeRecorder,
    pub gesture: GestureController,
    pub surface_width: f64,
    pub surface_height: f64,
    pub draw_source: Option<DrawSource>,
    /// Live animation-frame handles. Held so stroke end, clear, and page
    /// teardown can cancel whichever loop is running.
    pub draw_raf: Option<i32>,
    pub hold_raf: Option<i32>,
    pub debug: bool,
}
