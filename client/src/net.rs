use wasm_bindgen::prelude::*;
use web_sys::{Request, RequestInit, Window};

use signbook_shared::SignaturePayload;

/// Fire-and-forget submission of the committed signature. The engine's
/// contract ends at handing over a valid payload; delivery failures are
/// logged and never surfaced back into gesture state.
pub fn submit_signature(window: &Window, payload: &SignaturePayload) {
    let body = match serde_json::to_string(payload) {
        Ok(body) => body,
        Err(_) => return,
    };
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_body(&JsValue::from_str(&body));
    let request = match Request::new_with_str_and_init("/api/signatures", &init) {
        Ok(request) => request,
        Err(_) => return,
    };
    let _ = request.headers().set("content-type", "application/json");

    let promise = window.fetch_with_request(&request);
    let on_ok = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {});
    let on_err = Closure::<dyn FnMut(JsValue)>::new(move |err: JsValue| {
        web_sys::console::warn_2(&"Signature submission failed".into(), &err);
    });
    let _ = promise.then2(&on_ok, &on_err);
    on_ok.forget();
    on_err.forget();
}
