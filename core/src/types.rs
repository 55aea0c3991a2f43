//! Values exposed by `HttpClient` to its callers.

use crate::error::TransportError;

/// Ordered key/value pairs sent as a query string or a form body.
pub type Params<'a> = &'a [(&'a str, &'a str)];

/// Outcome of the most recent request.
///
/// Replaced wholesale after every dispatched request. On a transport
/// failure `body` is `None`, `error` is set and `status` carries whatever
/// the transport reported, usually nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastResponse {
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<TransportError>,
}

impl LastResponse {
    /// True when the server answered and the body was read.
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.status.is_some()
    }
}
