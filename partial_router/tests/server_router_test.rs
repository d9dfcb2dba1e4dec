#![allow(missing_docs)]
#![cfg(not(target_arch = "wasm32"))]

use http::{HeaderMap, HeaderValue};
use partial_router::{PartialServerRouter, RouteRequest};

fn layout(fragment: &str) -> String {
    format!("<html><body><div class=\"page-items\">{fragment}</div></body></html>")
}

fn router() -> PartialServerRouter {
    PartialServerRouter::new(layout)
        .route("/posts", |request: RouteRequest| async move {
            let page = request.query.get("page").unwrap_or("1").to_owned();
            format!("<p>page {page}</p>")
        })
        .route("/posts/{id}/delete", |request: RouteRequest| async move {
            let id = request.params.get("id").cloned().unwrap_or_default();
            format!("<p>delete {id}?</p>")
        })
}

fn partial_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("x-akamatsu-partial", HeaderValue::from_static("true"));
    headers
}

#[tokio::test]
async fn test_partial_request_gets_fragment_only() {
    let router = router();

    let result = router.handle_request("/posts", "page=3", &partial_headers()).await;
    assert_eq!(result, Some("<p>page 3</p>".to_owned()));
}

#[tokio::test]
async fn test_plain_request_gets_full_page() {
    let router = router();

    let result = router.handle_request("/posts", "page=3", &HeaderMap::new()).await;
    assert_eq!(
        result,
        Some("<html><body><div class=\"page-items\"><p>page 3</p></div></body></html>".to_owned())
    );
}

#[tokio::test]
async fn test_path_parameters_reach_handler() {
    let router = router();

    let result = router
        .handle_request("/posts/42/delete", "", &partial_headers())
        .await;
    assert_eq!(result, Some("<p>delete 42?</p>".to_owned()));
}

#[tokio::test]
async fn test_unknown_route_is_none() {
    let router = router();

    assert_eq!(router.handle_request("/nope", "", &HeaderMap::new()).await, None);
}

#[tokio::test]
async fn test_custom_partial_header() {
    let router = router().with_partial_header("x-fragment");
    let mut headers = HeaderMap::new();
    headers.insert("x-fragment", HeaderValue::from_static("TRUE"));

    assert!(router.is_partial_request(&headers));
    assert!(!router.is_partial_request(&partial_headers()));
}
