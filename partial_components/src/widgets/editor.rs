use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::{call_method, global, to_js};

/// Marker the server splits posts on to build the summary
pub const BREAK_MARKER: &str = "<!--aka-break-->";

const EDITOR_TEXTAREAS: &str = "#content, #personal_bio";
const BREAK_BUTTON: &str = "break";

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ToolbarItem {
    Builtin(&'static str),
    Custom {
        name: &'static str,
        #[serde(rename = "className")]
        class_name: &'static str,
        title: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    pub auto_download_font_awesome: bool,
    pub spell_checker: bool,
    pub preview_class: Vec<&'static str>,
    pub force_sync: bool,
    pub tab_size: u32,
    pub toolbar: Vec<ToolbarItem>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        use ToolbarItem::Builtin;

        Self {
            auto_download_font_awesome: false,
            spell_checker: false,
            preview_class: vec!["editor-preview", "content"],
            force_sync: true,
            tab_size: 4,
            toolbar: vec![
                Builtin("bold"),
                Builtin("italic"),
                Builtin("heading"),
                Builtin("|"),
                Builtin("code"),
                Builtin("quote"),
                Builtin("unordered-list"),
                Builtin("ordered-list"),
                Builtin("|"),
                Builtin("link"),
                Builtin("image"),
                Builtin("table"),
                Builtin("horizontal-rule"),
                ToolbarItem::Custom {
                    name: BREAK_BUTTON,
                    class_name: "fas fa-level-down-alt",
                    title: "Break",
                },
                Builtin("|"),
                Builtin("preview"),
                Builtin("side-by-side"),
                Builtin("fullscreen"),
                Builtin("guide"),
            ],
        }
    }
}

/// Attach the markdown editor to the first content textarea on the page
pub fn attach_markdown_editor() -> Result<(), JsValue> {
    let Some(textarea) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.query_selector(EDITOR_TEXTAREAS).ok().flatten())
    else {
        return Ok(());
    };

    let Some(constructor) = global("EasyMDE") else {
        return Ok(());
    };
    let constructor = constructor.dyn_into::<js_sys::Function>()?;

    let options = to_js(&EditorOptions::default())?;
    js_sys::Reflect::set(&options, &"element".into(), &textarea)?;
    install_break_action(&options)?;

    js_sys::Reflect::construct(&constructor, &js_sys::Array::of1(&options))?;

    Ok(())
}

fn install_break_action(options: &JsValue) -> Result<(), JsValue> {
    let toolbar = js_sys::Reflect::get(options, &"toolbar".into())?.dyn_into::<js_sys::Array>()?;

    for item in toolbar.iter() {
        if !item.is_object() {
            continue;
        }

        let name = js_sys::Reflect::get(&item, &"name".into())?;
        if name.as_string().as_deref() != Some(BREAK_BUTTON) {
            continue;
        }

        let action = Closure::<dyn Fn(JsValue)>::new(insert_break);
        js_sys::Reflect::set(&item, &"action".into(), action.as_ref())?;
        action.forget();
    }

    Ok(())
}

fn insert_break(editor: JsValue) {
    let result = js_sys::Reflect::get(&editor, &"codemirror".into()).and_then(|codemirror| {
        call_method(
            &codemirror,
            "replaceSelection",
            &js_sys::Array::of1(&BREAK_MARKER.into()),
        )?;
        call_method(&codemirror, "focus", &js_sys::Array::new())
    });

    if let Err(err) = result {
        tracing::error!(error = ?err, "cannot insert break marker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toolbar_mixes_builtin_names_and_custom_buttons() {
        let json = serde_json::to_value(EditorOptions::default()).expect("serializable");
        let toolbar = json["toolbar"].as_array().expect("array");

        assert_eq!(toolbar[0], "bold");
        assert_eq!(
            toolbar[13],
            serde_json::json!({"name": "break", "className": "fas fa-level-down-alt", "title": "Break"})
        );
        assert_eq!(toolbar.last(), Some(&serde_json::json!("guide")));
    }

    #[test]
    fn editor_flags_match_admin_forms() {
        let json = serde_json::to_value(EditorOptions::default()).expect("serializable");

        assert_eq!(json["forceSync"], true);
        assert_eq!(json["spellChecker"], false);
        assert_eq!(json["autoDownloadFontAwesome"], false);
        assert_eq!(json["tabSize"], 4);
    }
}
