//! HTTP transport for `_count` endpoints

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, ClientBuilder as ReqwestClientBuilder};
use serde::{Deserialize, Serialize};
use url::Url;

use super::Transport;
use crate::error::{SearchError, TransportError};
use crate::request::CountRequest;
use crate::response::CountResponse;

/// Connection settings for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Base URL of the cluster
    pub url: String,
    /// TCP connect timeout, in seconds
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds; unbounded when unset
    pub request_timeout_secs: Option<u64>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: None,
        }
    }
}

/// [`Transport`] speaking to an Elasticsearch-style `_count` API.
///
/// Requests go to `<url>/<collections>/<types>/_count`, with empty segments
/// left out. A query is sent as a `POST` body `{"query": ...}`; without one
/// the request is a plain `GET`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    client: ReqwestClient,
}

impl HttpTransport {
    /// Build a transport from `config`.
    pub fn new(config: &TransportConfig) -> Result<Self, SearchError> {
        let base = Url::parse(&config.url)
            .map_err(|e| SearchError::Config(format!("url '{}': {e}", config.url)))?;
        if base.cannot_be_a_base() {
            return Err(SearchError::Config(format!(
                "url '{}' cannot carry a path",
                config.url
            )));
        }

        let mut builder = ReqwestClientBuilder::new()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SearchError::Config(format!("http client: {e}")))?;

        Ok(Self { base, client })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Endpoint `request` is sent to.
    pub fn count_url(&self, request: &CountRequest) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| TransportError::Other(format!("url '{}' cannot carry a path", self.base)))?;
            segments.pop_if_empty();
            if !request.collections().is_empty() {
                segments.push(&request.collections().join(","));
            }
            if !request.types().is_empty() {
                segments.push(&request.types().join(","));
            }
            segments.push("_count");
        }

        let mut params = Vec::new();
        if let Some(min_score) = request.min_score() {
            params.push(("min_score", min_score.to_string()));
        }
        if let Some(routing) = request.routing() {
            params.push(("routing", routing.to_owned()));
        }
        if let Some(preference) = request.preference() {
            params.push(("preference", preference.to_owned()));
        }
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn count(&self, request: &CountRequest) -> Result<CountResponse, TransportError> {
        let url = self.count_url(request)?;
        tracing::debug!(url = %url, has_query = request.query().is_some(), "sending count request");

        let builder = match request.query() {
            Some(query) => self
                .client
                .post(url)
                .json(&serde_json::json!({ "query": query })),
            None => self.client.get(url),
        };

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
