//! Stateful REST client with chainable configuration.
//!
//! # Design
//! `HttpClient` holds a base host, a list of header lines and the outcome of
//! the last request. Building a request (`url_for`, `request_for`) is pure;
//! `perform` hands the built request to the `Transport` and records what came
//! back. A transport failure never becomes an `Err` of the verb method: it is
//! logged, stored in `last_response()` and the method returns `None`.

use tracing::{debug, warn};
use url::form_urlencoded;

use crate::error::{ClientError, TransportError};
use crate::http::{parse_header_line, HttpMethod, HttpRequest};
use crate::transport::{Transport, UreqTransport};
use crate::types::{LastResponse, Params};

/// Blocking REST client.
///
/// One instance is meant to be used sequentially by a single owner.
/// Host and headers persist across requests until changed or cleared.
#[derive(Debug)]
pub struct HttpClient<T: Transport = UreqTransport> {
    transport: T,
    host: Option<String>,
    headers: Option<Vec<String>>,
    last_response: Option<LastResponse>,
}

impl HttpClient<UreqTransport> {
    /// Create a client using the default ureq transport.
    pub fn new(host: Option<&str>) -> Result<Self, ClientError> {
        Self::with_transport(UreqTransport::default(), host)
    }

    /// Create a client bound to `host`.
    pub fn at(host: &str) -> Result<Self, ClientError> {
        Self::new(Some(host))
    }
}

impl<T: Transport> HttpClient<T> {
    /// Create a client on top of `transport`, failing if the transport
    /// cannot run in this environment.
    pub fn with_transport(transport: T, host: Option<&str>) -> Result<Self, ClientError> {
        transport.ensure_available()?;
        let mut client = Self {
            transport,
            host: None,
            headers: None,
            last_response: None,
        };
        if let Some(host) = host.filter(|h| !h.is_empty()) {
            client.set_host(host);
        }
        Ok(client)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Prefix prepended verbatim to every route.
    pub fn set_host(&mut self, host: impl Into<String>) -> &mut Self {
        self.host = Some(host.into());
        self
    }

    pub fn clear_host(&mut self) -> &mut Self {
        self.host = None;
        self
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.headers.as_deref()
    }

    /// Replace the header lines (`"Name: value"`) sent with every request.
    pub fn set_headers<I, S>(&mut self, headers: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    pub fn clear_headers(&mut self) -> &mut Self {
        self.headers = None;
        self
    }

    pub fn options(&mut self, route: &str, params: Params<'_>) -> Option<String> {
        self.perform(HttpMethod::Options, route, params)
    }

    pub fn get(&mut self, route: &str, params: Params<'_>) -> Option<String> {
        self.perform(HttpMethod::Get, route, params)
    }

    pub fn post(&mut self, route: &str, params: Params<'_>) -> Option<String> {
        self.perform(HttpMethod::Post, route, params)
    }

    pub fn put(&mut self, route: &str, params: Params<'_>) -> Option<String> {
        self.perform(HttpMethod::Put, route, params)
    }

    pub fn delete(&mut self, route: &str, params: Params<'_>) -> Option<String> {
        self.perform(HttpMethod::Delete, route, params)
    }

    /// Status code of the last request, if it produced one.
    pub fn last_status(&self) -> Option<u16> {
        self.last_response.as_ref().and_then(|r| r.status)
    }

    pub fn last_response_body(&self) -> Option<&str> {
        self.last_response.as_ref().and_then(|r| r.body.as_deref())
    }

    pub fn last_response(&self) -> Option<&LastResponse> {
        self.last_response.as_ref()
    }

    /// Transport failure of the last request, if any.
    pub fn last_error(&self) -> Option<&TransportError> {
        self.last_response.as_ref().and_then(|r| r.error.as_ref())
    }

    /// Build the final URL for a request.
    ///
    /// GET and DELETE append non-empty `params` as a query string; other
    /// verbs leave the route untouched. The host, when set, is prepended
    /// without any separator handling.
    pub fn url_for(&self, method: HttpMethod, route: &str, params: Params<'_>) -> String {
        let mut url = String::new();
        if let Some(host) = &self.host {
            url.push_str(host);
        }
        url.push_str(route);
        if method.params_in_query() && !params.is_empty() {
            url.push('?');
            url.push_str(&encode_params(params));
        }
        url
    }

    /// Build the request `perform` would send, without sending it.
    pub fn request_for(
        &self,
        method: HttpMethod,
        route: &str,
        params: Params<'_>,
    ) -> HttpRequest {
        let headers = self
            .headers
            .iter()
            .flatten()
            .filter_map(|line| parse_header_line(line))
            .collect();
        let body = method.has_body().then(|| encode_params(params));
        HttpRequest {
            method,
            url: self.url_for(method, route, params),
            headers,
            body,
        }
    }

    /// Send one request and record its outcome.
    ///
    /// Returns the response body, or `None` when the transport failed.
    pub fn perform(
        &mut self,
        method: HttpMethod,
        route: &str,
        params: Params<'_>,
    ) -> Option<String> {
        let request = self.request_for(method, route, params);
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let recorded = match self.transport.perform(&request) {
            Ok(response) => {
                debug!(status = response.status, "request completed");
                LastResponse {
                    status: Some(response.status),
                    body: Some(response.body),
                    error: None,
                }
            }
            Err(err) => {
                warn!(
                    method = %request.method,
                    url = %request.url,
                    error = %err,
                    "request failed"
                );
                LastResponse {
                    status: err.status,
                    body: None,
                    error: Some(err),
                }
            }
        };
        let body = recorded.body.clone();
        self.last_response = Some(recorded);
        body
    }
}

fn encode_params(params: Params<'_>) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}
