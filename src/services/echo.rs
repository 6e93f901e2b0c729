//! HTTP echo fixture
//!
//! A tiny server that reflects request content back at the caller, used as
//! a predictable endpoint in browser and network tests. The response body
//! is the `content` query parameter when present, otherwise the raw request
//! body; the response carries the request's `Content-Type` header, falling
//! back to `text/plain`.

use axum::Router;
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use std::collections::HashMap;

pub const DEFAULT_CONTENT_TYPE: &str = "text/plain";

/// The reflected content and the content type to serve it under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoResponse {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Decide what to echo. Pure so the behavior is testable without a socket.
#[must_use]
pub fn echo_response(
    content_param: Option<&str>,
    request_content_type: Option<&str>,
    body: &[u8],
) -> EchoResponse {
    let body = match content_param {
        Some(content) => content.as_bytes().to_vec(),
        None => body.to_vec(),
    };
    EchoResponse {
        content_type: request_content_type.unwrap_or(DEFAULT_CONTENT_TYPE).to_string(),
        body,
    }
}

async fn echo_handler(
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let echoed = echo_response(
        params.get("content").map(String::as_str),
        content_type.as_deref(),
        &body,
    );
    ([(CONTENT_TYPE, echoed.content_type)], echoed.body).into_response()
}

/// Router serving the echo handler on `/echo` for every method
#[must_use]
pub fn router() -> Router {
    Router::new().route("/echo", any(echo_handler))
}
