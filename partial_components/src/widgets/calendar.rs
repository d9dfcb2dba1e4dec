use serde::Serialize;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::{call_method, global, to_js};

/// Calendar flavours, each attached to `.calendar-{kind}` inputs
pub const CALENDAR_KINDS: [&str; 3] = ["datetime", "date", "time"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarOptions {
    #[serde(rename = "type")]
    pub kind: String,
    pub date_format: &'static str,
    pub time_format: &'static str,
    pub minute_steps: u32,
    /// 1 = Monday
    pub week_start: u32,
    pub display_mode: &'static str,
    pub validate_label: &'static str,
    pub today_label: &'static str,
    pub clear_label: &'static str,
    pub cancel_label: &'static str,
}

impl CalendarOptions {
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_owned(),
            date_format: "YYYY-MM-DD",
            time_format: "HH:mm",
            minute_steps: 1,
            week_start: 1,
            display_mode: "dialog",
            validate_label: r#"<span class="icon"><i class="fas fa-check fa-lg"></i></span>"#,
            today_label: r#"<span class="icon"><i class="fas fa-calendar-day fa-lg"></i></span>"#,
            clear_label: r#"<span class="icon"><i class="fas fa-eraser fa-lg"></i></span>"#,
            cancel_label: r#"<span class="icon"><i class="fas fa-times fa-lg"></i></span>"#,
        }
    }
}

pub fn attach_calendars() -> Result<(), JsValue> {
    let Some(calendar) = global("bulmaCalendar") else {
        return Ok(());
    };

    for kind in CALENDAR_KINDS {
        let options = to_js(&CalendarOptions::new(kind))?;

        let on_ready = Closure::<dyn Fn(JsValue)>::new(keep_clear_button_from_submitting);
        js_sys::Reflect::set(&options, &"onReady".into(), on_ready.as_ref())?;
        on_ready.forget();

        let selector = JsValue::from_str(&format!(".calendar-{kind}"));
        call_method(&calendar, "attach", &js_sys::Array::of2(&selector, &options))?;
    }

    Ok(())
}

/// The picker renders its clear button as a submit button inside our forms.
fn keep_clear_button_from_submitting(instance: JsValue) {
    let id = js_sys::Reflect::get(&instance, &"data".into())
        .and_then(|data| js_sys::Reflect::get(&data, &"_id".into()))
        .ok()
        .and_then(|id| id.as_string());

    let button = id.and_then(|id| {
        web_sys::window()?
            .document()?
            .get_element_by_id(&id)?
            .query_selector(".datetimepicker-clear-button")
            .ok()?
    });

    if let Some(button) = button {
        let _ = button.set_attribute("type", "button");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_use_widget_field_names() {
        let json = serde_json::to_value(CalendarOptions::new("date")).expect("serializable");

        assert_eq!(json["type"], "date");
        assert_eq!(json["dateFormat"], "YYYY-MM-DD");
        assert_eq!(json["timeFormat"], "HH:mm");
        assert_eq!(json["minuteSteps"], 1);
        assert_eq!(json["weekStart"], 1);
        assert_eq!(json["displayMode"], "dialog");
    }
}
