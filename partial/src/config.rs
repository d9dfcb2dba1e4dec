//! Runtime configuration.
//!
//! The server may embed a JSON object in
//! `<script id="partial-config" type="application/json">`; missing fields keep
//! their defaults.

use serde::{Deserialize, Serialize};

/// Id of the script element holding the configuration
pub const CONFIG_SCRIPT_ID: &str = "partial-config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Selector of the element whose content a partial load replaces
    pub container_selector: String,
    /// Header marking a request as partial
    pub partial_header: String,
    /// `name` of the meta tag holding the CSRF token
    pub csrf_meta_name: String,
    /// Header carrying the CSRF token
    pub csrf_header: String,
    pub notification_timeout_ms: u32,
    pub modal_id: String,
    pub modal_content_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_selector: ".page-items".to_owned(),
            partial_header: "x-akamatsu-partial".to_owned(),
            csrf_meta_name: "csrf-token".to_owned(),
            csrf_header: "X-CSRFToken".to_owned(),
            notification_timeout_ms: 10_000,
            modal_id: "global-modal".to_owned(),
            modal_content_id: "global-modal-content".to_owned(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the configuration embedded in the current document.
    pub fn load() -> Self {
        let Some(script) = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(CONFIG_SCRIPT_ID))
        else {
            return Self::default();
        };

        let json = script.text_content().unwrap_or_default();

        match Self::from_json(&json) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "invalid partial configuration, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_defaults() {
        let config = Config::from_json(r#"{"container_selector": ".listing"}"#).expect("valid");

        assert_eq!(config.container_selector, ".listing");
        assert_eq!(config.partial_header, "x-akamatsu-partial");
        assert_eq!(config.notification_timeout_ms, 10_000);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").expect("valid"), Config::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(Config::from_json("{container_selector:").is_err());
    }
}
