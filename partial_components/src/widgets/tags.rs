use wasm_bindgen::JsValue;

use super::{call_method, global};

pub fn attach_tags_input() -> Result<(), JsValue> {
    let Some(tags_input) = global("bulmaTagsinput") else {
        return Ok(());
    };

    call_method(&tags_input, "attach", &js_sys::Array::new())?;

    Ok(())
}
