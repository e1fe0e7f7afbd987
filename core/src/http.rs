//! HTTP transport types and the `Transport` seam.
//!
//! # Design
//! Requests and responses are plain data. `PokeClient` builds `HttpRequest`
//! values and parses `HttpResponse` values without touching the network; a
//! `Transport` executes the round-trip in between. The aggregators are generic
//! over `Transport`, so tests swap in fakes that resolve in any order while
//! production uses `ReqwestTransport`.
//!
//! Only `GET` is ever issued against PokéAPI, so requests carry no method.

use async_trait::async_trait;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// An HTTP GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data. Response headers are dropped:
/// status and body are all `PokeClient` interprets.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes one request. Non-200 statuses are returned as data, not `Err`;
/// status interpretation belongs to `PokeClient`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Production transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let transport_error = |e: reqwest::Error| ApiError::Transport {
            url: request.url.clone(),
            message: e.to_string(),
        };

        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let response = builder.send().await.map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!(url = %request.url, status, "fetched");

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_with_timeout() {
        let config = ClientConfig::new().with_timeout(std::time::Duration::from_secs(1));
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Grab a free port, then release it so nothing is listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let err = transport
            .execute(HttpRequest {
                url: format!("http://127.0.0.1:{port}/pokemon"),
                headers: Vec::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn non_200_status_is_returned_as_data() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(mock_server::run(listener));

        let transport = ReqwestTransport::new(&ClientConfig::default()).unwrap();
        let found = transport
            .execute(HttpRequest {
                url: format!("http://{addr}/type/normal"),
                headers: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(found.status, 200);
        assert!(found.body.contains("fighting"));

        let missing = transport
            .execute(HttpRequest {
                url: format!("http://{addr}/type/shadow"),
                headers: Vec::new(),
            })
            .await
            .unwrap();
        assert_eq!(missing.status, 404);
        assert!(missing.body.is_empty());
    }
}
