use wasm_bindgen::JsValue;

use crate::dom;
use crate::error::NavError;

const SCOPE_KEY: &str = "partialScope";

/// Whether a swap records a new history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    Push,
    /// Restoring an entry that already exists (back/forward)
    Keep,
}

/// Push `url` remembering which scope it belongs to
pub fn push(url: &str, scope: u64) -> Result<(), NavError> {
    let history = dom::window()?.history().map_err(NavError::dom)?;
    let state = js_sys::Object::new();
    js_sys::Reflect::set(&state, &SCOPE_KEY.into(), &JsValue::from_f64(scope as f64))
        .map_err(NavError::dom)?;

    history
        .push_state_with_url(&state, "", Some(url))
        .map_err(NavError::dom)
}

/// Scope recorded by [`push`] in a history entry's state
pub fn scope_from_state(state: &JsValue) -> Option<u64> {
    if !state.is_object() {
        return None;
    }

    js_sys::Reflect::get(state, &SCOPE_KEY.into())
        .ok()?
        .as_f64()
        .map(|scope| scope as u64)
}
