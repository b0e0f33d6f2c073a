// ── Archive connection configuration ──
//
// Everything needed to reach one backend. Built by `ccro-config` from the
// TOML profile, or directly by tests.

use std::time::Duration;

use ccro_api::TransportConfig;
use url::Url;

use crate::store::DEFAULT_LOG_LIMIT;

/// Configuration for an [`Archive`](crate::Archive).
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Backend base URL, e.g. `http://localhost:3001/api`.
    pub server: Url,
    /// Optional request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Accept self-signed certificates.
    pub accept_invalid_certs: bool,
    /// How many activity entries a log load fetches.
    pub log_limit: u32,
}

impl ArchiveConfig {
    pub fn new(server: Url) -> Self {
        Self {
            server,
            timeout: None,
            accept_invalid_certs: false,
            log_limit: DEFAULT_LOG_LIMIT,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
            ..TransportConfig::default()
        }
    }
}
