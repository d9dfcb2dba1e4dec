//! Attachment of the page's third-party widgets.
//!
//! Each widget is a global JS constructor loaded by the page. A missing global
//! means the page does not use that widget, so it is skipped.

use wasm_bindgen::{JsCast, JsValue};

mod calendar;
mod editor;
mod tags;

pub use calendar::{CalendarOptions, attach_calendars};
pub use editor::{BREAK_MARKER, EditorOptions, attach_markdown_editor};
pub use tags::attach_tags_input;

/// Global JS function or object `name`, if the page loaded it
pub(crate) fn global(name: &str) -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = js_sys::Reflect::get(&window, &JsValue::from_str(name)).ok()?;

    if value.is_undefined() || value.is_null() {
        tracing::debug!(%name, "widget not loaded");
        return None;
    }

    Some(value)
}

/// Call `target[method](...args)`
pub(crate) fn call_method(target: &JsValue, method: &str, args: &js_sys::Array) -> Result<JsValue, JsValue> {
    let function = js_sys::Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into::<js_sys::Function>()?;

    function.apply(target, args)
}

/// Serialize `options` into a plain JS object
pub(crate) fn to_js<T: serde::Serialize>(options: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}

/// Attach every widget present on the page
pub fn attach_all() {
    if let Err(err) = attach_calendars() {
        tracing::error!(error = ?err, "cannot attach calendars");
    }

    if let Err(err) = attach_tags_input() {
        tracing::error!(error = ?err, "cannot attach tags input");
    }

    if let Err(err) = attach_markdown_editor() {
        tracing::error!(error = ?err, "cannot attach markdown editor");
    }
}
