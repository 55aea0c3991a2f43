//! Small blocking client for REST-style APIs.
//!
//! # Overview
//! `HttpClient` joins a base host and a route, adds query parameters or a
//! form body depending on the verb, attaches configured header lines and
//! sends the request through a `Transport`. The status and body of the last
//! request stay available for inspection afterwards.
//!
//! # Design
//! - Request building is pure (`url_for`, `request_for`); only
//!   `Transport::perform` does I/O.
//! - Transport failures are logged with `tracing` and recorded in the last
//!   response instead of being returned as errors.
//! - `UreqTransport` opens a fresh agent for every request; nothing is
//!   pooled between calls.
//!
//! ```no_run
//! use rest_core::HttpClient;
//!
//! let mut client = HttpClient::at("https://api.example.com")?;
//! client.set_headers(["Accept: application/json"]);
//! let body = client.get("/user", &[("id", "1")]);
//! println!("{:?} {:?}", client.last_status(), body);
//! # Ok::<(), rest_core::ClientError>(())
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

pub use client::HttpClient;
pub use error::{ClientError, TransportError, CAPABILITY_MISSING_EXIT_CODE};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::TransportOptions;
pub use transport::{Transport, UreqTransport};
pub use types::{LastResponse, Params};
