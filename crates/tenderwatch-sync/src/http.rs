//! HTTP client for the Find a Tender OCDS release-package endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::info;

/// Find a Tender's public OCDS release-package endpoint.
pub const FIND_A_TENDER_FEED: &str =
    "https://www.find-tender.service.gov.uk/api/1.0/ocdsReleasePackages";

/// Upper bound on one feed request, connect to last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Anything that can produce the full list of raw releases.
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch every release currently published. One attempt, no retry.
    async fn fetch_releases(&self) -> Result<Vec<Value>, SyncError>;
}

/// Release package envelope; only `releases` is read.
#[derive(Deserialize)]
struct ReleasePackage {
    releases: Vec<Value>,
}

/// HTTP client for an OCDS release-package feed.
pub struct FeedClient {
    client: reqwest::Client,
    feed_url: String,
}

impl FeedClient {
    /// Create a client for `feed_url` whose requests give up after `timeout`.
    pub fn new(feed_url: impl Into<String>, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            feed_url: feed_url.into(),
        })
    }

    /// Client for the public Find a Tender feed with the default timeout.
    pub fn find_a_tender() -> Result<Self, SyncError> {
        Self::new(FIND_A_TENDER_FEED, DEFAULT_TIMEOUT)
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }
}

#[async_trait]
impl ReleaseSource for FeedClient {
    async fn fetch_releases(&self) -> Result<Vec<Value>, SyncError> {
        info!(url = %self.feed_url, "fetching release feed");
        let resp = self.client.get(&self.feed_url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SyncError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let package: ReleasePackage = serde_json::from_slice(&bytes)?;
        info!(count = package.releases.len(), "fetched releases");
        Ok(package.releases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Json;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn upstream() -> Router {
        Router::new()
            .route(
                "/feed",
                get(|| async {
                    Json(json!({
                        "uri": "https://example.test/package",
                        "releases": [
                            { "id": "r1", "tag": ["tender"] },
                            { "id": "r2", "tag": ["award"] }
                        ]
                    }))
                }),
            )
            .route(
                "/down",
                get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "maintenance window") }),
            )
            .route("/html", get(|| async { "<html>not json</html>" }))
            .route("/no-releases", get(|| async { Json(json!({ "uri": "x" })) }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Json(json!({ "releases": [] }))
                }),
            )
    }

    fn client(base: &str, path: &str) -> FeedClient {
        FeedClient::new(format!("{base}{path}"), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn fetches_release_list() {
        let base = serve(upstream()).await;
        let releases = client(&base, "/feed").fetch_releases().await.unwrap();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[0]["id"], "r1");
    }

    #[tokio::test]
    async fn non_success_status_is_server_error() {
        let base = serve(upstream()).await;
        let err = client(&base, "/down").fetch_releases().await.unwrap_err();
        match err {
            SyncError::Server { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance window");
            }
            other => panic!("expected server error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_body_is_json_error() {
        let base = serve(upstream()).await;
        let err = client(&base, "/html").fetch_releases().await.unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
    }

    #[tokio::test]
    async fn body_without_releases_is_json_error() {
        let base = serve(upstream()).await;
        let err = client(&base, "/no-releases").fetch_releases().await.unwrap_err();
        assert!(matches!(err, SyncError::Json(_)));
    }

    #[tokio::test]
    async fn timeout_is_http_error() {
        let base = serve(upstream()).await;
        let slow = FeedClient::new(format!("{base}/slow"), Duration::from_millis(200)).unwrap();
        let err = slow.fetch_releases().await.unwrap_err();
        assert!(matches!(err, SyncError::Http(ref e) if e.is_timeout()));
    }

    #[tokio::test]
    async fn unreachable_host_is_http_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{addr}"), "/feed")
            .fetch_releases()
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Http(_)));
    }

    #[test]
    fn default_client_targets_find_a_tender() {
        let client = FeedClient::find_a_tender().unwrap();
        assert_eq!(
            client.feed_url(),
            "https://www.find-tender.service.gov.uk/api/1.0/ocdsReleasePackages"
        );
    }
}
