use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

use super::{StatsError, StatsResult};

/// Source of per-user problem-solving statistics
#[async_trait]
pub trait StatsClient: Send + Sync {
    /// Fetches stats for one external username. No retries are attempted.
    async fn fetch(&self, username: &str) -> Result<StatsResult, StatsError>;
}

/// Provider body: the stats fields plus an optional status envelope
#[derive(Debug, Deserialize)]
struct ProviderBody {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    stats: StatsResult,
}

/// Stats client for an HTTP provider answering `GET <base>/<username>`
pub struct HttpStatsClient {
    base_url: Url,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpStatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StatsError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StatsError::Configuration(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StatsError::Configuration(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StatsError::Configuration(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    /// Builds `<base>/<username>` with the username as a single encoded path segment
    fn user_url(&self, username: &str) -> Result<Url, StatsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StatsError::Configuration(format!("{} has no path", self.base_url)))?
            .pop_if_empty()
            .push(username);
        Ok(url)
    }
}

#[async_trait]
impl StatsClient for HttpStatsClient {
    #[instrument(skip(self))]
    async fn fetch(&self, username: &str) -> Result<StatsResult, StatsError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StatsError::MissingUsername);
        }

        let url = self.user_url(username)?;
        debug!(%url, "Fetching external stats");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                StatsError::unavailable(
                    username,
                    format!("request timed out after {:?}", self.timeout),
                )
            } else {
                StatsError::unavailable(username, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::unavailable(
                username,
                format!("provider responded with {status}"),
            ));
        }

        let body: ProviderBody = response
            .json()
            .await
            .map_err(|e| StatsError::unavailable(username, format!("malformed body: {e}")))?;

        if body.status.as_deref() == Some("error") {
            return Err(StatsError::unavailable(
                username,
                body.message
                    .unwrap_or_else(|| "provider reported an error".to_string()),
            ));
        }

        debug!(
            total_solved = body.stats.total_solved,
            ranking = body.stats.ranking,
            "External stats fetched"
        );
        Ok(body.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::Path, http::StatusCode, response::IntoResponse, routing::get, Router};
    use serde_json::json;

    async fn provider(Path(username): Path<String>) -> axum::response::Response {
        match username.as_str() {
            "alice" => axum::Json(json!({
                "status": "success",
                "totalSolved": 16,
                "easySolved": 10,
                "mediumSolved": 5,
                "hardSolved": 1,
                "acceptanceRate": 48.2,
                "ranking": 5000,
                "reputation": 9
            }))
            .into_response(),
            "john doe" => axum::Json(json!({ "easySolved": 2 })).into_response(),
            "ghost" => axum::Json(json!({
                "status": "error",
                "message": "user does not exist"
            }))
            .into_response(),
            "garbled" => (StatusCode::OK, "<html>oops</html>").into_response(),
            "sleepy" => {
                tokio::time::sleep(Duration::from_secs(2)).await;
                axum::Json(json!({ "easySolved": 1 })).into_response()
            }
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }

    async fn spawn_provider() -> String {
        let app = Router::new().route("/api/:username", get(provider));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/api")
    }

    async fn client() -> HttpStatsClient {
        HttpStatsClient::new(&spawn_provider().await, Duration::from_millis(500)).unwrap()
    }

    fn assert_unavailable(result: Result<StatsResult, StatsError>, expected_username: &str) {
        match result {
            Err(StatsError::Unavailable { username, .. }) => {
                assert_eq!(username, expected_username)
            }
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn fetches_and_decodes_stats() {
        let stats = client().await.fetch("alice").await.unwrap();

        assert_eq!(stats.total_solved, 16);
        assert_eq!(stats.easy_solved, 10);
        assert_eq!(stats.medium_solved, 5);
        assert_eq!(stats.hard_solved, 1);
        assert_eq!(stats.acceptance_rate, 48.2);
        assert_eq!(stats.ranking, 5000);
    }

    #[tokio::test]
    async fn encodes_username_as_one_path_segment() {
        let stats = client().await.fetch("john doe").await.unwrap();
        assert_eq!(stats.easy_solved, 2);
        assert_eq!(stats.total_solved, 0);
    }

    #[tokio::test]
    async fn empty_username_short_circuits() {
        // Unroutable base: any network attempt would fail differently
        let client = HttpStatsClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.fetch("   ").await,
            Err(StatsError::MissingUsername)
        ));
    }

    #[tokio::test]
    async fn non_success_status_is_unavailable() {
        assert_unavailable(client().await.fetch("nobody").await, "nobody");
    }

    #[tokio::test]
    async fn provider_error_envelope_is_unavailable() {
        assert_unavailable(client().await.fetch("ghost").await, "ghost");
    }

    #[tokio::test]
    async fn malformed_body_is_unavailable() {
        assert_unavailable(client().await.fetch("garbled").await, "garbled");
    }

    #[tokio::test]
    async fn timeout_is_unavailable() {
        assert_unavailable(client().await.fetch("sleepy").await, "sleepy");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            HttpStatsClient::new("not a url", Duration::from_secs(1)),
            Err(StatsError::Configuration(_))
        ));
        assert!(matches!(
            HttpStatsClient::new("mailto:someone@example.com", Duration::from_secs(1)),
            Err(StatsError::Configuration(_))
        ));
    }
}
