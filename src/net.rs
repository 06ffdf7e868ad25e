// gittty: Git lifeline for the TTY
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Connectivity probe over HTTP.
//!
//! ```text
//! HttpConnectivity::new(probe_url, timeout)
//!   has_internet()
//!     HEAD probe_url (timeout)
//!       any HTTP response      -> true
//!       connect/DNS/timeout    -> false
//!
//! Global client: OnceLock, connection pool, keep-alive
//!   shared with `hosting`
//! ```
//!
//! The answer is only a hint for error classification and never blocks a
//! clone.

use std::sync::OnceLock;
use std::time::Duration;

use futures_util::future::BoxFuture;
use reqwest::Client;
use tracing::debug;

use crate::workflow::probe::ConnectivityProbe;

/// Default endpoint for the probe.
pub const DEFAULT_PROBE_URL: &str = "https://github.com";

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Global HTTP client, initialized once.
/// Falls back to a basic client if custom configuration fails.
pub(crate) fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("gittty/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Asks a well-known host whether the network is up.
#[derive(Debug, Clone)]
pub struct HttpConnectivity {
    url: String,
    timeout: Duration,
}

impl Default for HttpConnectivity {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_URL, DEFAULT_PROBE_TIMEOUT)
    }
}

impl HttpConnectivity {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends the probe request.
    ///
    /// Any status code counts as connected: a 404 or 503 still proves the
    /// network path works.
    pub async fn probe(&self) -> bool {
        match global_client()
            .head(&self.url)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => {
                debug!(url = %self.url, status = %response.status(), "connectivity probe answered");
                true
            }
            Err(e) => {
                debug!(url = %self.url, error = %e, "connectivity probe failed");
                false
            }
        }
    }
}

impl ConnectivityProbe for HttpConnectivity {
    fn has_internet(&self) -> BoxFuture<'_, bool> {
        Box::pin(self.probe())
    }
}
