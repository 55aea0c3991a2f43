//! The network boundary of the client.
//!
//! # Design
//! `Transport` is the single primitive the client needs: execute one
//! `HttpRequest` and report what came back. `UreqTransport` is the default
//! implementation; tests substitute a recording fake. Each `perform` call
//! builds its own ureq agent and drops it before returning, so no
//! connection outlives the request that opened it.
//!
//! Response bodies are read in full with no size cap. Bytes that are not
//! valid UTF-8 are replaced rather than failing the request.

use tracing::debug;
use ureq::tls::TlsConfig;
use ureq::Agent;

use crate::error::{ClientError, TransportError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::TransportOptions;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Executes requests on behalf of `HttpClient`.
pub trait Transport {
    /// Send `request` and block until a response or a failure.
    ///
    /// HTTP error statuses are responses, not failures.
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Checked once when a client is constructed.
    fn ensure_available(&self) -> Result<(), ClientError> {
        Ok(())
    }
}

/// Blocking transport backed by `ureq`.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport {
    options: TransportOptions,
}

impl UreqTransport {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &TransportOptions {
        &self.options
    }

    fn agent(&self) -> Agent {
        Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(self.options.max_redirects)
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(!self.options.verify_tls)
                    .build(),
            )
            .build()
            .new_agent()
    }

    fn headers_for<'a>(&'a self, request: &'a HttpRequest) -> Vec<(&'a str, &'a str)> {
        let mut headers: Vec<(&str, &str)> = request
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        if let Some(agent) = &self.options.user_agent {
            if request.header("user-agent").is_none() {
                headers.push(("User-Agent", agent.as_str()));
            }
        }
        headers
    }
}

impl Transport for UreqTransport {
    fn perform(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent();
        let headers = self.headers_for(request);
        let url = request.url.as_str();
        debug!(method = %request.method, url, "sending request");

        let result = match request.method {
            HttpMethod::Get => apply_headers(agent.get(url), &headers).call(),
            HttpMethod::Delete => apply_headers(agent.delete(url), &headers).call(),
            HttpMethod::Options => apply_headers(agent.options(url), &headers).call(),
            HttpMethod::Post | HttpMethod::Put => {
                let builder = if request.method == HttpMethod::Post {
                    agent.post(url)
                } else {
                    agent.put(url)
                };
                let mut builder = apply_headers(builder, &headers);
                match &request.body {
                    Some(body) => {
                        if request.header("content-type").is_none() {
                            builder = builder.content_type(FORM_CONTENT_TYPE);
                        }
                        builder.send(body.as_bytes())
                    }
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| TransportError::new(e.to_string()).with_status(status))?;
        let body = String::from_utf8_lossy(&bytes).into_owned();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn apply_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(&str, &str)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(headers: Vec<(&str, &str)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://localhost/".to_string(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: None,
        }
    }

    #[test]
    fn default_transport_uses_default_options() {
        let transport = UreqTransport::default();
        assert_eq!(transport.options(), &TransportOptions::default());
        assert!(transport.ensure_available().is_ok());
    }

    #[test]
    fn configured_user_agent_is_appended() {
        let transport = UreqTransport::new(TransportOptions {
            user_agent: Some("rest-core/0.1".to_string()),
            ..TransportOptions::default()
        });
        let req = request(vec![("Accept", "text/plain")]);
        assert_eq!(
            transport.headers_for(&req),
            vec![("Accept", "text/plain"), ("User-Agent", "rest-core/0.1")]
        );
    }

    #[test]
    fn caller_user_agent_wins_over_configured_one() {
        let transport = UreqTransport::new(TransportOptions {
            user_agent: Some("rest-core/0.1".to_string()),
            ..TransportOptions::default()
        });
        let req = request(vec![("user-agent", "custom")]);
        assert_eq!(transport.headers_for(&req), vec![("user-agent", "custom")]);
    }

    #[test]
    fn refused_connection_is_a_transport_error() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let err = UreqTransport::default()
            .perform(&HttpRequest {
                method: HttpMethod::Get,
                url: format!("http://{addr}/"),
                headers: Vec::new(),
                body: None,
            })
            .unwrap_err();
        assert!(err.status.is_none());
        assert!(!err.message.is_empty());
    }
}
