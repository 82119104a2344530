//! Thin authenticated HTTP layer over the Plex API.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::debug;
use url::Url;

use plextags_shared::{PlexTagsError, Result};

use crate::models::{Envelope, MediaContainer};

/// User-Agent string for Plex requests.
const USER_AGENT: &str = concat!("plextags/", env!("CARGO_PKG_VERSION"));

/// Product name announced to the server.
const PRODUCT: &str = "plextags";

/// A configured client bound to one server. Cheap to clone.
#[derive(Debug, Clone)]
pub(crate) struct PlexHttp {
    client: Client,
    base_url: Url,
}

impl PlexHttp {
    pub(crate) fn new(base_url: Url, token: &str, timeout_secs: u64) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(token)
            .map_err(|_| PlexTagsError::config("Plex token contains invalid characters"))?;
        headers.insert("x-plex-token", token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-plex-product", HeaderValue::from_static(PRODUCT));
        headers.insert(
            "x-plex-version",
            HeaderValue::from_static(env!("CARGO_PKG_VERSION")),
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PlexTagsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub(crate) fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.as_str().trim_end_matches('/'))
    }

    /// GET `path` and decode the `MediaContainer` payload.
    pub(crate) async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<MediaContainer> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| PlexTagsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlexTagsError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PlexTagsError::Network(format!("{url}: failed to read body: {e}")))?;

        let envelope: Envelope = serde_json::from_str(&body)
            .map_err(|e| PlexTagsError::parse(format!("{url}: unexpected response: {e}")))?;

        Ok(envelope.media_container)
    }

    /// PUT `path` with query parameters; the body of the response is ignored.
    pub(crate) async fn put(&self, path: &str, query: &[(String, String)]) -> Result<()> {
        let url = self.endpoint(path);
        debug!(%url, ?query, "PUT");

        let response = self
            .client
            .put(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| PlexTagsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlexTagsError::Network(format!("{url}: HTTP {status}")));
        }

        Ok(())
    }
}
