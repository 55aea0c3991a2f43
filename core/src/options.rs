//! Transport options applied to every request.

use serde::{Deserialize, Serialize};

/// Options handed to the transport for each request.
///
/// The defaults follow redirects up to five hops and skip TLS certificate
/// verification. Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// Maximum redirect hops; `0` disables redirect following.
    pub max_redirects: u32,
    pub verify_tls: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            max_redirects: 5,
            verify_tls: false,
            user_agent: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_five_redirects_without_tls_verification() {
        let opts = TransportOptions::default();
        assert_eq!(opts.max_redirects, 5);
        assert!(!opts.verify_tls);
        assert!(opts.user_agent.is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let opts: TransportOptions = serde_json::from_str(r#"{"verify_tls":true}"#).unwrap();
        assert!(opts.verify_tls);
        assert_eq!(opts.max_redirects, 5);
    }

    #[test]
    fn redirect_limit_is_configurable() {
        let opts: TransportOptions = serde_json::from_str(r#"{"max_redirects":0}"#).unwrap();
        assert_eq!(opts.max_redirects, 0);
        assert!(!opts.verify_tls);
    }
}
