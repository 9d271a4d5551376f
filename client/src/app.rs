use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement,
    HtmlTextAreaElement, PointerEvent, TouchEvent, Window,
};

use signbook_shared::{GestureController, GestureTick, SignaturePayload, StrokeRecorder};

use crate::dom::{
    event_to_point, get_element, resize_canvas, set_hint, set_progress, surface_view_box,
};
use crate::net::submit_signature;
use crate::render::{redraw_drawing, redraw_replay, redraw_replay_full};
use crate::state::{DrawSource, State};

type RafCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1") || search.contains("debug=true")
}

fn log(debug: bool, message: &str) {
    if debug {
        web_sys::console::log_1(&message.into());
    }
}

/// Which kind of input started the active stroke. Browsers that implement
/// pointer events fire them alongside touch events for the same contact, so
/// move/stop handlers only act on events from the source that began.
fn event_source(event: &Event) -> Option<DrawSource> {
    if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
        return Some(DrawSource::Pointer(pointer.pointer_id()));
    }
    if event.dyn_ref::<TouchEvent>().is_some() {
        return Some(DrawSource::Touch);
    }
    None
}

fn schedule_frame(window: &Window, callback: &RafCallback) -> Option<i32> {
    let callback = callback.borrow();
    let closure = callback.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

fn cancel_frames(window: &Window, state: &mut State) {
    if let Some(handle) = state.draw_raf.take() {
        let _ = window.cancel_animation_frame(handle);
    }
    if let Some(handle) = state.hold_raf.take() {
        let _ = window.cancel_animation_frame(handle);
    }
}

fn hint_text(state: &State, name: &str) -> &'static str {
    if state.gesture.is_committed() {
        "Signed. Thank you!"
    } else if !state.recorder.signature().is_valid() {
        "Sign with your finger"
    } else if name.trim().is_empty() {
        "Enter your name"
    } else {
        "Hold the button to confirm"
    }
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let debug = debug_enabled(&window);

    let canvas: HtmlCanvasElement = get_element(&document, "pad")?;
    let ctx = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("Missing canvas context"))?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()?;

    let name_input: HtmlInputElement = get_element(&document, "name")?;
    let message_input: HtmlTextAreaElement = get_element(&document, "message")?;
    let confirm_button: HtmlButtonElement = get_element(&document, "confirm")?;
    let clear_button: HtmlButtonElement = get_element(&document, "clear")?;
    let hint: HtmlElement = get_element(&document, "hint")?;
    let progress_bar: HtmlElement = get_element(&document, "progress")?;

    let state = Rc::new(RefCell::new(State {
        canvas: canvas.clone(),
        ctx,
        recorder: StrokeRecorder::new(),
        gesture: GestureController::new(),
        surface_width: 0.0,
        surface_height: 0.0,
        draw_source: None,
        draw_raf: None,
        hold_raf: None,
        debug,
    }));

    resize_canvas(&window, &mut state.borrow_mut());
    set_hint(&hint, hint_text(&state.borrow(), &name_input.value()));
    set_progress(&progress_bar, 0.0);

    // Raster redraw loop: runs only between stroke begin and end.
    let draw_loop: RafCallback = Rc::new(RefCell::new(None));
    {
        let loop_state = state.clone();
        let loop_window = window.clone();
        let loop_self = draw_loop.clone();
        *draw_loop.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_now: f64| {
            let mut state_ref = loop_state.borrow_mut();
            if !state_ref.recorder.is_recording() {
                state_ref.draw_raf = None;
                return;
            }
            redraw_drawing(&state_ref);
            state_ref.draw_raf = schedule_frame(&loop_window, &loop_self);
        }));
    }

    // Gesture tick loop: runs only while holding or reversing.
    let hold_loop: RafCallback = Rc::new(RefCell::new(None));
    {
        let loop_state = state.clone();
        let loop_window = window.clone();
        let loop_self = hold_loop.clone();
        let loop_hint = hint.clone();
        let loop_progress = progress_bar.clone();
        let loop_name = name_input.clone();
        let loop_message = message_input.clone();
        *hold_loop.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            let mut state_ref = loop_state.borrow_mut();
            match state_ref.gesture.tick(now) {
                GestureTick::Quiet => {
                    state_ref.hold_raf = None;
                }
                GestureTick::Progress(fraction) => {
                    redraw_replay(&state_ref);
                    set_progress(&loop_progress, fraction);
                    state_ref.hold_raf = schedule_frame(&loop_window, &loop_self);
                }
                GestureTick::HoldComplete => {
                    state_ref.hold_raf = None;
                    match surface_view_box(&state_ref.canvas) {
                        Some(view_box) if state_ref.gesture.commit() => {
                            redraw_replay_full(&state_ref);
                            set_progress(&loop_progress, 1.0);
                            let payload = SignaturePayload {
                                path: state_ref.recorder.signature().path_string().to_string(),
                                view_box,
                                name: loop_name.value().trim().to_string(),
                                message: loop_message.value().trim().to_string(),
                            };
                            let debug = state_ref.debug;
                            set_hint(&loop_hint, hint_text(&state_ref, &loop_name.value()));
                            drop(state_ref);
                            log(debug, "Signature committed, submitting");
                            submit_signature(&loop_window, &payload);
                        }
                        _ => {
                            // Surface gone at viewBox capture time: no commit,
                            // back to idle with the drawn strokes intact.
                            state_ref.gesture.reset();
                            redraw_drawing(&state_ref);
                            set_progress(&loop_progress, 0.0);
                            set_hint(&loop_hint, hint_text(&state_ref, &loop_name.value()));
                        }
                    }
                }
                GestureTick::ReversedToStart => {
                    state_ref.hold_raf = None;
                    redraw_drawing(&state_ref);
                    set_progress(&loop_progress, 0.0);
                    set_hint(&loop_hint, hint_text(&state_ref, &loop_name.value()));
                }
            }
        }));
    }

    {
        let start_state = state.clone();
        let start_canvas = canvas.clone();
        let start_window = window.clone();
        let start_draw_loop = draw_loop.clone();
        let onstart = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut state_ref = start_state.borrow_mut();
            // Drawing is frozen once committed and while the replay owns
            // the surface.
            if state_ref.gesture.is_active() || state_ref.gesture.is_committed() {
                return;
            }
            let Some(source) = event_source(&event) else {
                return;
            };
            let Some(point) = event_to_point(&start_canvas, &event) else {
                return;
            };
            event.prevent_default();
            if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
                let _ = start_canvas.set_pointer_capture(pointer.pointer_id());
            }
            if state_ref.recorder.begin(point) {
                state_ref.draw_source = Some(source);
                redraw_drawing(&state_ref);
                if state_ref.draw_raf.is_none() {
                    state_ref.draw_raf = schedule_frame(&start_window, &start_draw_loop);
                }
            }
        });
        canvas.add_event_listener_with_callback("pointerdown", onstart.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("touchstart", onstart.as_ref().unchecked_ref())?;
        onstart.forget();
    }

    {
        let move_state = state.clone();
        let move_canvas = canvas.clone();
        let onmove = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut state_ref = move_state.borrow_mut();
            if !state_ref.recorder.is_recording() {
                return;
            }
            if event_source(&event) != state_ref.draw_source {
                return;
            }
            event.prevent_default();
            // A sample without coordinates is dropped silently.
            if let Some(point) = event_to_point(&move_canvas, &event) {
                state_ref.recorder.extend(point);
            }
        });
        canvas.add_event_listener_with_callback("pointermove", onmove.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("touchmove", onmove.as_ref().unchecked_ref())?;
        onmove.forget();
    }

    {
        let stop_state = state.clone();
        let stop_canvas = canvas.clone();
        let stop_window = window.clone();
        let stop_hint = hint.clone();
        let stop_name = name_input.clone();
        let onstop = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut state_ref = stop_state.borrow_mut();
            if let Some(pointer) = event.dyn_ref::<PointerEvent>() {
                if stop_canvas.has_pointer_capture(pointer.pointer_id()) {
                    let _ = stop_canvas.release_pointer_capture(pointer.pointer_id());
                }
            }
            if !state_ref.recorder.is_recording() {
                return;
            }
            if event_source(&event) != state_ref.draw_source {
                return;
            }
            state_ref.draw_source = None;
            state_ref.recorder.end();
            if let Some(handle) = state_ref.draw_raf.take() {
                let _ = stop_window.cancel_animation_frame(handle);
            }
            redraw_drawing(&state_ref);
            set_hint(&stop_hint, hint_text(&state_ref, &stop_name.value()));
        });
        canvas.add_event_listener_with_callback("pointerup", onstop.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("pointercancel", onstop.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("pointerleave", onstop.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("touchend", onstop.as_ref().unchecked_ref())?;
        canvas.add_event_listener_with_callback("touchcancel", onstop.as_ref().unchecked_ref())?;
        onstop.forget();
    }

    {
        let hold_state = state.clone();
        let hold_window = window.clone();
        let hold_loop_cb = hold_loop.clone();
        let hold_name = name_input.clone();
        let hold_hint = hint.clone();
        let onhold = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            let mut guard = hold_state.borrow_mut();
            let state_ref = &mut *guard;
            if state_ref.recorder.is_recording() {
                return;
            }
            let name = hold_name.value();
            if state_ref
                .gesture
                .press(state_ref.recorder.signature(), &name)
            {
                set_hint(&hold_hint, "Keep holding...");
                if state_ref.hold_raf.is_none() {
                    state_ref.hold_raf = schedule_frame(&hold_window, &hold_loop_cb);
                }
            } else {
                log(state_ref.debug, "Hold ignored: preconditions not met");
            }
        });
        confirm_button
            .add_event_listener_with_callback("pointerdown", onhold.as_ref().unchecked_ref())?;
        confirm_button
            .add_event_listener_with_callback("touchstart", onhold.as_ref().unchecked_ref())?;
        onhold.forget();
    }

    {
        let release_state = state.clone();
        let onrelease = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            // Safe to call from every exit event; a no-op unless holding.
            release_state.borrow_mut().gesture.release();
        });
        for event_name in [
            "pointerup",
            "pointercancel",
            "pointerleave",
            "touchend",
            "touchcancel",
        ] {
            confirm_button
                .add_event_listener_with_callback(event_name, onrelease.as_ref().unchecked_ref())?;
        }
        onrelease.forget();
    }

    {
        let clear_state = state.clone();
        let clear_window = window.clone();
        let clear_hint = hint.clone();
        let clear_progress = progress_bar.clone();
        let clear_name = name_input.clone();
        let onclick = Closure::<dyn FnMut(Event)>::new(move |_| {
            let mut state_ref = clear_state.borrow_mut();
            cancel_frames(&clear_window, &mut state_ref);
            state_ref.recorder.clear();
            state_ref.gesture.reset();
            state_ref.draw_source = None;
            redraw_drawing(&state_ref);
            set_progress(&clear_progress, 0.0);
            set_hint(&clear_hint, hint_text(&state_ref, &clear_name.value()));
        });
        clear_button.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }

    {
        let input_state = state.clone();
        let input_hint = hint.clone();
        let input_name = name_input.clone();
        let oninput = Closure::<dyn FnMut(Event)>::new(move |_| {
            let state_ref = input_state.borrow();
            set_hint(&input_hint, hint_text(&state_ref, &input_name.value()));
        });
        name_input.add_event_listener_with_callback("input", oninput.as_ref().unchecked_ref())?;
        oninput.forget();
    }

    {
        let resize_state = state.clone();
        let resize_window = window.clone();
        let onresize = Closure::<dyn FnMut()>::new(move || {
            resize_canvas(&resize_window, &mut resize_state.borrow_mut());
        });
        window.add_event_listener_with_callback("resize", onresize.as_ref().unchecked_ref())?;
        onresize.forget();
    }

    {
        // Teardown: never leave a frame callback writing to a detached
        // surface.
        let hide_state = state.clone();
        let hide_window = window.clone();
        let onpagehide = Closure::<dyn FnMut(Event)>::new(move |_| {
            cancel_frames(&hide_window, &mut hide_state.borrow_mut());
        });
        window.add_event_listener_with_callback("pagehide", onpagehide.as_ref().unchecked_ref())?;
        onpagehide.forget();
    }

    log(debug, "Signbook pad ready");
    Ok(())
}
