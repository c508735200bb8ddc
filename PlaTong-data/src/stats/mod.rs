use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::errors::StatsError;
use crate::models::stats::SiteStats;

/// Source of the aggregate counters shown on the home page
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch the current counters
    async fn fetch(&self) -> Result<SiteStats, StatsError>;

    /// Human-readable description of where the counters come from
    fn describe(&self) -> String;
}

/// Reads the counters from a remote JSON endpoint
#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    client: Client,
    endpoint: Url,
}

impl HttpStatsSource {
    /// Create a client for `endpoint` that gives up after `timeout`
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, StatsError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self) -> Result<SiteStats, StatsError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await?
            .error_for_status()?;

        // Decode separately so a bad body is reported as malformed, not as transport
        let body = response.bytes().await?;
        let stats: SiteStats = serde_json::from_slice(&body)?;

        debug!(
            total_users = stats.total_users,
            total_bp_logs = stats.total_bp_logs,
            total_appointments = stats.total_appointments,
            "Fetched site stats"
        );
        Ok(stats)
    }

    fn describe(&self) -> String {
        self.endpoint.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn source_for(server: &MockServer) -> HttpStatsSource {
        let endpoint = Url::parse(&server.url("/stats")).unwrap();
        HttpStatsSource::new(endpoint, Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_parses_counters() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/stats");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(serde_json::json!({
                        "totalUsers": 1520,
                        "totalBPLogs": 20811,
                        "totalAppointments": 734
                    }));
            })
            .await;

        let stats = source_for(&server).fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(stats.total_users, 1520);
        assert_eq!(stats.total_bp_logs, 20811);
        assert_eq!(stats.total_appointments, 734);
    }

    #[tokio::test]
    async fn test_server_error_is_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stats");
                then.status(502);
            })
            .await;

        let result = source_for(&server).fetch().await;
        assert!(matches!(result, Err(StatsError::Http(_))));
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/stats");
                then.status(200).body(r#"{"users": "lots"}"#);
            })
            .await;

        let result = source_for(&server).fetch().await;
        assert!(matches!(result, Err(StatsError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        // Port 9 (discard) is not served by anything in the test environment
        let endpoint = Url::parse("http://127.0.0.1:9/stats").unwrap();
        let source = HttpStatsSource::new(endpoint, Duration::from_millis(500)).unwrap();

        let result = source.fetch().await;
        assert!(matches!(result, Err(StatsError::Http(_))));
    }
}
