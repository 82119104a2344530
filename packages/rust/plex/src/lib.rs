//! Plex Media Server client.
//!
//! Connects to a server with a token, lists library sections, and exposes a
//! section as a [`Catalog`](plextags_shared::Catalog) the reconciliation core
//! can search and tag.

mod http;
mod models;
mod section;

use tracing::{info, instrument, warn};

use plextags_shared::{PlexTagsError, Result, ServerConfig};

use crate::http::PlexHttp;

pub use section::LibrarySection;

/// Summary of a library section as listed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Section key used in API paths.
    pub key: String,
    /// Title shown in Plex.
    pub title: String,
    /// Section type (`show`, `movie`, `artist`, ...).
    pub kind: String,
}

/// A connected Plex server.
#[derive(Debug, Clone)]
pub struct PlexServer {
    http: PlexHttp,
    /// Server's friendly name, if it reported one.
    pub name: Option<String>,
    /// Server version, if it reported one.
    pub version: Option<String>,
}

impl PlexServer {
    /// Connect to the server and verify the token with a request to `/`.
    #[instrument(skip_all, fields(url = %config.url))]
    pub async fn connect(config: &ServerConfig, token: &str) -> Result<Self> {
        if config.is_default_url() {
            warn!(
                "using the default Plex server URL; set server.url in the config \
                 or pass --server-url if your server lives elsewhere"
            );
        }

        let http = PlexHttp::new(config.base_url()?, token, config.timeout_secs)?;
        info!(url = %http.base_url(), "connecting to Plex server");

        let identity = http.get("/", &[]).await.map_err(|e| {
            PlexTagsError::Network(format!(
                "could not connect to Plex server at {}: {e}\n\
                 Possible issues:\n\
                 1. Incorrect Plex token\n\
                 2. Plex server is not running\n\
                 3. Incorrect server URL\n\
                 4. Network connectivity issues",
                config.url
            ))
        })?;

        info!(
            name = identity.friendly_name.as_deref().unwrap_or("unknown"),
            version = identity.version.as_deref().unwrap_or("unknown"),
            "connected"
        );

        Ok(Self {
            http,
            name: identity.friendly_name,
            version: identity.version,
        })
    }

    /// List every library section on the server.
    pub async fn sections(&self) -> Result<Vec<SectionInfo>> {
        let container = self.http.get("/library/sections", &[]).await?;
        Ok(container
            .directories
            .into_iter()
            .map(|d| SectionInfo {
                key: d.key,
                title: d.title,
                kind: d.kind,
            })
            .collect())
    }

    /// Look up a library section by its title.
    ///
    /// Fails with [`PlexTagsError::LibraryNotFound`] listing the available
    /// sections when no title matches.
    #[instrument(skip(self))]
    pub async fn section(&self, name: &str) -> Result<LibrarySection> {
        info!("accessing library");
        let sections = self.sections().await?;

        match sections.iter().find(|s| s.title == name) {
            Some(found) => Ok(LibrarySection::new(
                self.http.clone(),
                found.key.clone(),
                found.title.clone(),
            )),
            None => Err(PlexTagsError::LibraryNotFound {
                name: name.to_string(),
                available: sections
                    .iter()
                    .map(|s| format!("{} (type: {})", s.title, s.kind))
                    .collect(),
            }),
        }
    }
}
