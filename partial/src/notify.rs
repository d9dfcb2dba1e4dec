use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Alert,
    Success,
    Warning,
    Error,
    Info,
}

/// A floating on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub text: String,
    /// Milliseconds before the message disappears
    pub timeout: u32,
}

impl Notification {
    pub fn new(kind: NotificationKind, text: impl Into<String>, timeout: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            timeout,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Shows notifications through the page's global `Noty` constructor, falling
/// back to the console when it is not loaded.
#[derive(Debug, Default, Clone, Copy)]
pub struct NotyNotifier;

impl Notifier for NotyNotifier {
    fn notify(&self, notification: Notification) {
        if let Err(err) = show_noty(&notification) {
            tracing::warn!(error = ?err, text = %notification.text, "cannot show notification");
            web_sys::console::log_1(&format!("[{:?}] {}", notification.kind, notification.text).into());
        }
    }
}

fn show_noty(notification: &Notification) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No global window object")?;
    let constructor = js_sys::Reflect::get(&window, &"Noty".into())?;
    let constructor = constructor
        .dyn_ref::<js_sys::Function>()
        .ok_or("Noty is not loaded")?;

    let json = serde_json::to_string(notification).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let params = js_sys::JSON::parse(&json)?;

    let instance = js_sys::Reflect::construct(constructor, &js_sys::Array::of1(&params))?;
    let show = js_sys::Reflect::get(&instance, &"show".into())?;
    let show = show.dyn_ref::<js_sys::Function>().ok_or("Noty has no show()")?;
    show.call0(&instance)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_noty_shape() {
        let notification = Notification::new(NotificationKind::Error, "ERROR", 10_000);
        let json = serde_json::to_value(&notification).expect("serializable");

        assert_eq!(
            json,
            serde_json::json!({"type": "error", "text": "ERROR", "timeout": 10000})
        );
    }
}
