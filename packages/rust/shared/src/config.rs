//! Application configuration for plextags.
//!
//! User config lives at `~/.plextags/plextags.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::encoding::TextEncoding;
use crate::error::{PlexTagsError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "plextags.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".plextags";

/// Server URL used when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:32400";

/// Where users are sent to find their token.
const TOKEN_HELP_URL: &str =
    "https://support.plex.tv/articles/204059436-finding-an-authentication-token-x-plex-token/";

// ---------------------------------------------------------------------------
// Config structs (matching plextags.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Plex server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Which library section to work on.
    #[serde(default)]
    pub library: LibraryConfig,

    /// CSV import/export settings.
    #[serde(default)]
    pub csv: CsvConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the Plex server.
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Name of the env var holding the token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServerConfig {
    /// Parse the configured URL.
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url)
            .map_err(|e| PlexTagsError::config(format!("invalid server URL '{}': {e}", self.url)))
    }

    /// Whether the URL is still the out-of-the-box localhost default.
    pub fn is_default_url(&self) -> bool {
        self.url.trim_end_matches('/') == DEFAULT_SERVER_URL
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.into()
}
fn default_token_env() -> String {
    "PLEX_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[library]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Title of the TV show library section.
    #[serde(default = "default_library_name")]
    pub name: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            name: default_library_name(),
        }
    }
}

fn default_library_name() -> String {
    "TV Shows".into()
}

/// `[csv]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Encodings tried in order when reading an import file.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<String>,

    /// Default export file name.
    #[serde(default = "default_export_file")]
    pub export_file: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            encodings: default_encodings(),
            export_file: default_export_file(),
        }
    }
}

impl CsvConfig {
    /// Parse the configured encoding labels, preserving order.
    pub fn text_encodings(&self) -> Result<Vec<TextEncoding>> {
        if self.encodings.is_empty() {
            return Err(PlexTagsError::config("csv.encodings must list at least one encoding"));
        }
        self.encodings.iter().map(|label| label.parse()).collect()
    }
}

fn default_encodings() -> Vec<String> {
    TextEncoding::DEFAULT_ORDER
        .iter()
        .map(|e| e.label().to_string())
        .collect()
}
fn default_export_file() -> String {
    "plex_tv_shows.csv".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.plextags/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PlexTagsError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.plextags/plextags.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PlexTagsError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PlexTagsError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PlexTagsError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PlexTagsError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PlexTagsError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the Plex token from the env var named in the config.
pub fn resolve_token(config: &AppConfig) -> Result<String> {
    let var_name = &config.server.token_env;
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Ok(val.trim().to_string()),
        _ => Err(PlexTagsError::config(format!(
            "Plex token is not configured. Set the {var_name} environment variable.\n\
             You can find your token by following the instructions at:\n{TOKEN_HELP_URL}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("http://localhost:32400"));
        assert!(toml_str.contains("PLEX_TOKEN"));
        assert!(toml_str.contains("TV Shows"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[server]
url = "http://plex.lan:32400"

[csv]
encodings = ["cp1252"]
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.server.url, "http://plex.lan:32400");
        assert_eq!(config.server.token_env, "PLEX_TOKEN");
        assert_eq!(config.server.timeout_secs, 30);
        assert_eq!(config.library.name, "TV Shows");
        assert_eq!(config.csv.export_file, "plex_tv_shows.csv");
        assert_eq!(config.csv.text_encodings().unwrap(), vec![TextEncoding::Cp1252]);
    }

    #[test]
    fn default_encodings_in_order() {
        let encodings = CsvConfig::default().text_encodings().unwrap();
        assert_eq!(encodings, TextEncoding::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn unknown_or_empty_encodings_rejected() {
        let mut csv = CsvConfig::default();
        csv.encodings = vec!["utf-8".into(), "klingon".into()];
        assert!(csv.text_encodings().is_err());

        csv.encodings.clear();
        assert!(csv.text_encodings().is_err());
    }

    #[test]
    fn default_url_detection() {
        let mut server = ServerConfig::default();
        assert!(server.is_default_url());
        server.url = "http://localhost:32400/".into();
        assert!(server.is_default_url());
        server.url = "https://plex.example.com".into();
        assert!(!server.is_default_url());
        assert_eq!(server.base_url().unwrap().host_str(), Some("plex.example.com"));
    }

    #[test]
    fn invalid_url_is_config_error() {
        let server = ServerConfig {
            url: "not a url".into(),
            ..ServerConfig::default()
        };
        assert!(matches!(server.base_url(), Err(PlexTagsError::Config { .. })));
    }

    #[test]
    fn token_validation() {
        let mut config = AppConfig::default();
        // Use a unique env var name to avoid interfering with other tests
        config.server.token_env = "PLEXTAGS_TEST_NONEXISTENT_TOKEN_12345".into();
        let result = resolve_token(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("token is not configured"));
    }
}
