//! Echo server used to observe what the client puts on the wire.
//!
//! Any request is answered with a JSON description of itself, except for
//! `/status/{code}`, which answers with that status, `/redirect/{n}`,
//! which redirects `n` times before echoing, `/bytes/{n}`, which answers
//! with `n` bytes, and `/binary`, whose body is not valid UTF-8.

use std::collections::BTreeMap;

use axum::{
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

/// Body of `/binary`: two bytes that never start a UTF-8 sequence, then `ok`.
pub const BINARY_BODY: &[u8] = &[0xFF, 0xFE, b'o', b'k'];

/// What the server received, as returned to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl Echo {
    pub fn from_parts(method: &Method, uri: &Uri, headers: &HeaderMap, body: String) -> Self {
        let headers = headers
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        Self {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers,
            body,
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route("/status/{code}", any(status))
        .route("/redirect/{hops}", any(redirect))
        .route("/bytes/{len}", any(bytes))
        .route("/binary", any(binary))
        .fallback(echo)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn echo(method: Method, uri: Uri, headers: HeaderMap, body: String) -> Json<Echo> {
    debug!(%method, %uri, "echo");
    Json(Echo::from_parts(&method, &uri, &headers, body))
}

async fn bytes(Path(len): Path<usize>) -> Vec<u8> {
    vec![b'a'; len]
}

async fn binary() -> &'static [u8] {
    BINARY_BODY
}

async fn status(Path(code): Path<u16>) -> Response {
    match StatusCode::from_u16(code) {
        Ok(status) => (status, format!("status {code}")).into_response(),
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code").into_response(),
    }
}

async fn redirect(
    Path(hops): Path<u32>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    if hops == 0 {
        return echo(method, uri, headers, body).await.into_response();
    }
    Redirect::temporary(&format!("/redirect/{}", hops - 1)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_collects_request_parts() {
        let uri: Uri = "/user?id=1".parse().unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("x-token", "abc".parse().unwrap());
        let echo = Echo::from_parts(&Method::DELETE, &uri, &headers, String::new());

        assert_eq!(echo.method, "DELETE");
        assert_eq!(echo.path, "/user");
        assert_eq!(echo.query.as_deref(), Some("id=1"));
        assert_eq!(echo.headers.get("x-token").map(String::as_str), Some("abc"));
        assert!(echo.body.is_empty());
    }

    #[test]
    fn echo_without_query() {
        let uri: Uri = "/user/1".parse().unwrap();
        let echo = Echo::from_parts(&Method::GET, &uri, &HeaderMap::new(), String::new());
        assert_eq!(echo.query, None);
        assert!(echo.headers.is_empty());
    }

    #[test]
    fn echo_roundtrips_through_json() {
        let uri: Uri = "/a".parse().unwrap();
        let body = "name=Kayla".to_string();
        let echo = Echo::from_parts(&Method::POST, &uri, &HeaderMap::new(), body);
        let json = serde_json::to_string(&echo).unwrap();
        let back: Echo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, echo);
    }
}
