#![allow(missing_docs)]

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode, body::Incoming as IncomingBody};
use hyper_util::rt::TokioIo;
use lazy_static::lazy_static;
use listing::{DeletionReply, LISTING_PATH, PostStore};
use partial_router::PartialServerRouter;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

type BoxBody = http_body_util::combinators::BoxBody<Bytes, hyper::Error>;

const CSRF_HEADER: &str = "x-csrftoken";

lazy_static! {
    static ref STORE: Mutex<PostStore> = Mutex::new(PostStore::seeded());
    static ref CSRF_TOKEN: String = {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        format!("{:x}{:x}", std::process::id(), nanos)
    };
}

fn full<T: Into<Bytes>>(chunk: T) -> BoxBody {
    Full::new(chunk.into())
        .map_err(|never| match never {})
        .boxed()
}

fn respond(status: StatusCode, content_type: &str, body: impl Into<Bytes>) -> Response<BoxBody> {
    let mut response = Response::new(full(body));
    *response.status_mut() = status;

    if let Ok(value) = http::HeaderValue::from_str(content_type) {
        response.headers_mut().insert(http::header::CONTENT_TYPE, value);
    }

    response
}

fn serve_static(path: &str) -> Response<BoxBody> {
    let file_path = format!("static{path}");
    let file = Path::new(&file_path);

    if path.contains("..") || !file.exists() {
        return respond(StatusCode::NOT_FOUND, "text/plain", "File not found");
    }

    match fs::read(file) {
        Ok(content) => {
            let content_type = match file.extension().and_then(|s| s.to_str()) {
                Some("html") => "text/html",
                Some("css") => "text/css",
                Some("js") => "application/javascript",
                Some("wasm") => "application/wasm",
                Some("svg") => "image/svg+xml",
                _ => "application/octet-stream",
            };

            respond(StatusCode::OK, content_type, content)
        }
        Err(err) => {
            tracing::error!(%file_path, error = %err, "cannot read static file");
            respond(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "Error reading file")
        }
    }
}

fn lock_store() -> std::sync::MutexGuard<'static, PostStore> {
    STORE.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn build_router() -> PartialServerRouter {
    let listing = |request: partial_router::RouteRequest| async move {
        listing::render_listing(&lock_store(), &request.query)
    };

    PartialServerRouter::new(|fragment| listing::render_layout(fragment, &CSRF_TOKEN))
        .route("/", listing)
        .route(LISTING_PATH, listing)
        .route("/posts/{id}/delete", |request| async move {
            let post = request
                .params
                .get("id")
                .and_then(|id| id.parse().ok())
                .and_then(|id| lock_store().get(id).cloned());

            match post {
                Some(post) => listing::render_delete_modal(&post),
                None => listing::render_missing_post(),
            }
        })
}

/// `POST /posts/{id}/delete`: answers with where the client should go next
fn confirm_deletion(req: &Request<IncomingBody>, id: u64) -> Response<BoxBody> {
    let token = req
        .headers()
        .get(CSRF_HEADER)
        .and_then(|value| value.to_str().ok());

    if token != Some(CSRF_TOKEN.as_str()) {
        tracing::warn!(id, "deletion rejected: bad CSRF token");
        return respond(StatusCode::FORBIDDEN, "text/plain", "CSRF token missing or incorrect");
    }

    if !lock_store().delete(id) {
        return respond(StatusCode::NOT_FOUND, "text/plain", "No such post");
    }

    tracing::info!(id, "post deleted");

    match serde_json::to_string(&DeletionReply {
        redirect: LISTING_PATH,
    }) {
        Ok(body) => respond(StatusCode::OK, "application/json", body),
        Err(err) => {
            tracing::error!(error = %err, "cannot encode deletion reply");
            respond(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "Error encoding reply")
        }
    }
}

async fn handle_request(
    req: Request<IncomingBody>,
    router: Arc<PartialServerRouter>,
) -> Result<Response<BoxBody>, hyper::Error> {
    let path = req.uri().path().to_owned();
    let query = req.uri().query().unwrap_or_default().to_owned();

    tracing::debug!(method = %req.method(), %path, %query, "request");

    if let Some(file) = path.strip_prefix("/static") {
        return Ok(serve_static(file));
    }

    if req.method() == Method::POST {
        return Ok(match listing::deletion_id(&path) {
            Some(id) => confirm_deletion(&req, id),
            None => respond(StatusCode::METHOD_NOT_ALLOWED, "text/plain", "Method Not Allowed"),
        });
    }

    match router.handle_request(&path, &query, req.headers()).await {
        Some(content) => Ok(respond(StatusCode::OK, "text/html", content)),
        None => Ok(respond(StatusCode::NOT_FOUND, "text/plain", "Not Found")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let router = Arc::new(build_router());

    let listener = TcpListener::bind("0.0.0.0:9999").await?;
    tracing::info!("Server running on http://0.0.0.0:9999");

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let router = Arc::clone(&router);

        tokio::task::spawn(async move {
            let service = service_fn(move |req| {
                let router = Arc::clone(&router);
                async move { handle_request(req, router).await }
            });

            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                tracing::error!(error = ?err, "error serving connection");
            }
        });
    }
}
