//! The network seam. The controller only talks to a [`Fetcher`]; the browser
//! implementation sits on `window.fetch`.

use futures_util::future::LocalBoxFuture;
use partial_router::{FetchRequest, FetchResponse};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::error::NavError;

pub trait Fetcher {
    /// Perform `request` and read the whole body.
    ///
    /// Non-2xx statuses are *not* errors at this level.
    fn fetch(&self, request: FetchRequest) -> LocalBoxFuture<'static, Result<FetchResponse, NavError>>;
}

/// `window.fetch` backed implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct WebFetcher;

impl Fetcher for WebFetcher {
    fn fetch(&self, request: FetchRequest) -> LocalBoxFuture<'static, Result<FetchResponse, NavError>> {
        Box::pin(async move {
            let window = web_sys::window().ok_or_else(|| NavError::Dom("no global window".to_owned()))?;

            let headers = web_sys::Headers::new().map_err(NavError::dom)?;
            for (name, value) in &request.headers {
                headers.set(name, value).map_err(NavError::dom)?;
            }

            let init = web_sys::RequestInit::new();
            init.set_method(request.method.as_str());
            init.set_headers(&headers);

            let js_request =
                web_sys::Request::new_with_str_and_init(&request.url, &init).map_err(NavError::dom)?;

            let response = JsFuture::from(window.fetch_with_request(&js_request))
                .await
                .map_err(NavError::network)?
                .dyn_into::<web_sys::Response>()
                .map_err(NavError::dom)?;

            let text = JsFuture::from(response.text().map_err(NavError::dom)?)
                .await
                .map_err(NavError::network)?;

            Ok(FetchResponse::new(
                response.status(),
                text.as_string().unwrap_or_default(),
            ))
        })
    }
}
