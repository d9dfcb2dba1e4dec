use wasm_bindgen::JsValue;

/// Text shown to the user for any failed interaction
pub const GENERIC_ERROR_TEXT: &str = "ERROR";
/// Text shown when the page carries no CSRF token
pub const CSRF_ERROR_TEXT: &str = "ERROR - CSRF";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("cannot find page container matching '{selector}'")]
    ContainerNotFound { selector: String },

    #[error("request failed with status {status}")]
    RequestFailed { status: u16, body: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("missing CSRF meta tag")]
    CsrfTokenMissing,

    #[error("server response did not include a redirect")]
    MissingRedirect,

    #[error("cannot decode server response: {0}")]
    Decode(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl NavError {
    /// Message surfaced through the notification layer
    pub fn user_message(&self) -> &'static str {
        match self {
            NavError::CsrfTokenMissing => CSRF_ERROR_TEXT,
            _ => GENERIC_ERROR_TEXT,
        }
    }

    /// Wrap a JS exception raised by a DOM call
    pub fn dom(err: JsValue) -> Self {
        NavError::Dom(describe(&err))
    }

    pub fn network(err: JsValue) -> Self {
        NavError::Network(describe(&err))
    }
}

impl From<NavError> for JsValue {
    fn from(err: NavError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csrf_has_its_own_message() {
        assert_eq!(NavError::CsrfTokenMissing.user_message(), "ERROR - CSRF");
        assert_eq!(
            NavError::RequestFailed {
                status: 500,
                body: String::new()
            }
            .user_message(),
            "ERROR"
        );
    }

    #[test]
    fn display_names_the_selector() {
        let err = NavError::ContainerNotFound {
            selector: ".page-items".to_owned(),
        };

        assert_eq!(err.to_string(), "cannot find page container matching '.page-items'");
    }
}
