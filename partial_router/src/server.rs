//! Server-side counterpart of partial navigation.
//!
//! Handlers render only the fragment that belongs inside a container. When the
//! request carries the partial-request header the fragment is returned as is;
//! otherwise it is wrapped in the page layout so the same URL also works as a
//! full page load, a bookmark or a history restore.

use matchit::Router;
use std::{collections::HashMap, future::Future, pin::Pin};

use crate::query::QueryParams;

/// Header the client sets on every partial request.
pub const DEFAULT_PARTIAL_HEADER: &str = "x-akamatsu-partial";

/// Everything a fragment handler gets to see about the request
#[derive(Debug, Clone, Default)]
pub struct RouteRequest {
    /// Path parameters captured by the route pattern
    pub params: HashMap<String, String>,
    /// Decoded query string
    pub query: QueryParams,
    /// Whether only the fragment will be sent back
    pub partial: bool,
}

/// Boxed fragment handler.
pub type PartialHandler =
    Box<dyn Fn(RouteRequest) -> Pin<Box<dyn Future<Output = String> + Send>> + Send + Sync>;

type Layout = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Routes fragment requests and wraps full-page requests in a layout
pub struct PartialServerRouter {
    router: Router<PartialHandler>,
    layout: Layout,
    partial_header: String,
}

impl std::fmt::Debug for PartialServerRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartialServerRouter")
            .field("router", &"<Router<PartialHandler>>")
            .field("partial_header", &self.partial_header)
            .finish()
    }
}

impl PartialServerRouter {
    /// Creates a router wrapping full-page responses with `layout`
    pub fn new<L>(layout: L) -> Self
    where
        L: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self {
            router: Router::new(),
            layout: Box::new(layout),
            partial_header: DEFAULT_PARTIAL_HEADER.to_owned(),
        }
    }

    /// Use `name` instead of [`DEFAULT_PARTIAL_HEADER`]
    pub fn with_partial_header(mut self, name: &str) -> Self {
        name.clone_into(&mut self.partial_header);
        self
    }

    /// Registers a fragment handler for `path` (matchit syntax, e.g. `/posts/{id}`).
    ///
    /// # Panics
    ///
    /// Panics if the pattern conflicts with an existing route.
    pub fn route<F, Fut>(mut self, path: &str, handler: F) -> Self
    where
        F: Fn(RouteRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = String> + Send + 'static,
    {
        let boxed: PartialHandler = Box::new(move |request| Box::pin(handler(request)));

        if let Err(e) = self.router.insert(path, boxed) {
            panic!("Failed to insert route '{path}': {e}");
        }

        self
    }

    /// Whether the request asks for a fragment only
    pub fn is_partial_request(&self, headers: &http::HeaderMap) -> bool {
        headers
            .get(self.partial_header.as_str())
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Renders `path`, returning `None` when no route matches.
    pub async fn handle_request(
        &self,
        path: &str,
        query: &str,
        headers: &http::HeaderMap,
    ) -> Option<String> {
        let matched = self.router.at(path).ok()?;
        let partial = self.is_partial_request(headers);

        let request = RouteRequest {
            params: matched
                .params
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect(),
            query: QueryParams::parse(query),
            partial,
        };

        let fragment = (matched.value)(request).await;

        if partial {
            Some(fragment)
        } else {
            Some((self.layout)(&fragment))
        }
    }
}
