use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent, Window};

use signbook_shared::payload::view_box_string;
use signbook_shared::{sample_point, Point};

use crate::render::redraw_surface;
use crate::state::State;

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

/// Point sampler. Mouse-style events (pointer events included) carry
/// `clientX`/`clientY` on themselves, touch-style events on `touches[0]`;
/// anything else produces no sample and the caller treats that as a no-op.
pub fn event_to_point(canvas: &HtmlCanvasElement, event: &Event) -> Option<Point> {
    let rect = canvas.get_bounding_client_rect();
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return None;
    }
    let (client_x, client_y) = if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        (
            Some(mouse.client_x() as f64),
            Some(mouse.client_y() as f64),
        )
    } else if let Some(touch_event) = event.dyn_ref::<TouchEvent>() {
        match touch_event.touches().get(0) {
            Some(touch) => (
                Some(touch.client_x() as f64),
                Some(touch.client_y() as f64),
            ),
            None => (None, None),
        }
    } else {
        (None, None)
    };
    sample_point(client_x, client_y, rect.left(), rect.top(), js_sys::Date::now())
}

/// The commit payload's viewBox: the surface's rendered size in CSS pixels.
/// None when the surface is detached or degenerate; a commit must not fire
/// without one.
pub fn surface_view_box(canvas: &HtmlCanvasElement) -> Option<String> {
    let rect = canvas.get_bounding_client_rect();
    view_box_string(rect.width(), rect.height())
}

pub fn resize_canvas(window: &Window, state: &mut State) {
    let rect = state.canvas.get_bounding_client_rect();
    let dpr = window.device_pixel_ratio();
    state.canvas.set_width((rect.width() * dpr) as u32);
    state.canvas.set_height((rect.height() * dpr) as u32);
    let _ = state.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    state.ctx.set_line_cap("round");
    state.ctx.set_line_join("round");
    state.surface_width = rect.width();
    state.surface_height = rect.height();
    redraw_surface(state);
}

pub fn set_hint(hint: &HtmlElement, text: &str) {
    hint.set_text_content(Some(text));
}

pub fn set_progress(bar: &HtmlElement, fraction: f64) {
    let percent = (fraction.clamp(0.0, 1.0) * 100.0).round();
    let _ = bar.style().set_property("width", &format!("{percent}%"));
}
