//! HTTP basic-auth readiness probe.
//!
//! The backend exposes an authenticated `GET /api/defaults`; a 200
//! response means the server is up and its configuration store is
//! initialized. Any transport error or non-200 status counts as not
//! ready, since during startup connection-refused is the expected
//! answer.

use crate::config::HealthConfig;
use crate::health::base::ReadinessProbe;
use async_trait::async_trait;
use std::time::Duration;
use tracing::trace;

/// Probe that issues authenticated GET requests against one endpoint.
pub struct HttpProbe {
    url: String,
    username: String,
    password: String,
    client: reqwest::Client,
}

impl HttpProbe {
    /// Build a probe from the health section of the configuration.
    ///
    /// # Arguments
    ///
    /// * `health` - Endpoint path, credentials and request timeout
    /// * `port` - Port of the service instance being probed
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be
    /// constructed.
    pub fn from_config(health: &HealthConfig, port: u16) -> Result<Self, reqwest::Error> {
        Self::new(
            health.url_for_port(port),
            &health.username,
            &health.password,
            health.request_timeout(),
        )
    }

    /// Build a probe for an explicit URL.
    pub fn new(
        url: String,
        username: &str,
        password: &str,
        request_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            url,
            username: username.to_string(),
            password: password.to_string(),
            client,
        })
    }
}

#[async_trait]
impl ReadinessProbe for HttpProbe {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn check(&self) -> bool {
        let response = self
            .client
            .get(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await;

        match response {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(e) => {
                trace!(url = %self.url, error = %e, "probe attempt failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_describe_is_url() {
        let probe = HttpProbe::new(
            "http://localhost:9091/api/defaults".to_string(),
            "lich",
            "123123",
            Duration::from_secs(1),
        )
        .expect("client should build");

        assert_eq!(probe.describe(), "http://localhost:9091/api/defaults");
    }

    #[tokio::test]
    async fn test_probe_against_closed_port_is_not_ready() {
        // Nothing listens on this port; connection refused means not ready.
        let probe = HttpProbe::new(
            "http://127.0.0.1:1/api/defaults".to_string(),
            "lich",
            "123123",
            Duration::from_millis(200),
        )
        .expect("client should build");

        assert!(!probe.check().await);
    }
}
