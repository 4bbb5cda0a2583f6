//! Site configuration loading and config file resolution

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

use crate::sitemap::{default_static_pages, StaticPage};
use crate::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "FOLIO_CONFIG";

/// Which backend holds the content records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sqlite,
    Json,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(SourceKind::Sqlite),
            "json" => Ok(SourceKind::Json),
            other => Err(format!("unknown source kind '{}' (expected sqlite or json)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub kind: SourceKind,
    /// SQLite database file, or directory of `{type}.json` files
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::Sqlite,
            path: PathBuf::from("data/content.db"),
        }
    }
}

/// Site-wide settings from `config.toml`
///
/// Every field has a default, so a partial (or absent) file still yields a
/// usable configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public origin used to build absolute URLs, without trailing slash
    pub site_url: String,
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    /// Cap on items per feed; `None` serves every record
    pub feed_item_limit: Option<usize>,
    /// Listen address for the HTTP service
    pub bind: String,
    pub source: SourceConfig,
    /// Root of `{type}/{category}/{slug}.mdx` bodies for the content registry
    pub content_root: Option<PathBuf>,
    pub static_pages: Vec<StaticPage>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:5780".to_string(),
            title: "Folio".to_string(),
            description: "Essays, papers, notes and verse".to_string(),
            author: "Folio Author".to_string(),
            language: "en".to_string(),
            feed_item_limit: None,
            bind: "127.0.0.1:5780".to_string(),
            source: SourceConfig::default(),
            content_root: None,
            static_pages: default_static_pages(),
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }
}

/// Config file resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. Platform config directory (`~/.config/folio/config.toml` on Linux)
///
/// Returns `None` when no candidate applies; callers fall back to defaults.
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_file().filter(|path| path.exists())
}

fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("folio").join("config.toml"))
}

/// Resolve and load the site configuration
///
/// A missing config file is not fatal: it logs a warning and returns the
/// compiled defaults. A file that exists but does not parse is an error.
pub fn load_site_config(cli_arg: Option<&Path>, env_var_name: &str) -> Result<SiteConfig> {
    let Some(path) = resolve_config_path(cli_arg, env_var_name) else {
        info!("No config file found, using defaults");
        return Ok(SiteConfig::default());
    };

    if !path.exists() {
        warn!("Config file {} not found, using defaults", path.display());
        return Ok(SiteConfig::default());
    }

    let config = SiteConfig::load(&path)?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SiteConfig::from_toml_str("").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            site_url = "https://example.org"
            feed_item_limit = 20

            [source]
            kind = "json"
            path = "content"
            "#,
        )
        .unwrap();

        assert_eq!(config.site_url, "https://example.org");
        assert_eq!(config.feed_item_limit, Some(20));
        assert_eq!(config.source.kind, SourceKind::Json);
        assert_eq!(config.source.path, PathBuf::from("content"));
        assert_eq!(config.language, "en");
        assert!(!config.static_pages.is_empty());
    }

    #[test]
    fn test_static_pages_override() {
        let config = SiteConfig::from_toml_str(
            r#"
            [[static_pages]]
            path = "/"
            priority = 1.0

            [[static_pages]]
            path = "/now"
            "#,
        )
        .unwrap();
        assert_eq!(config.static_pages.len(), 2);
        assert_eq!(config.static_pages[1].path, "/now");
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = SiteConfig::from_toml_str("site_url = [");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("JSON".parse::<SourceKind>(), Ok(SourceKind::Json));
        assert_eq!("sqlite".parse::<SourceKind>(), Ok(SourceKind::Sqlite));
        assert!("postgres".parse::<SourceKind>().is_err());
    }

    #[test]
    #[serial]
    fn test_cli_arg_beats_env() {
        env::set_var("FOLIO_TEST_CONFIG", "/from/env.toml");
        let resolved = resolve_config_path(Some(Path::new("/from/cli.toml")), "FOLIO_TEST_CONFIG");
        env::remove_var("FOLIO_TEST_CONFIG");
        assert_eq!(resolved, Some(PathBuf::from("/from/cli.toml")));
    }

    #[test]
    #[serial]
    fn test_env_used_without_cli_arg() {
        env::set_var("FOLIO_TEST_CONFIG", "/from/env.toml");
        let resolved = resolve_config_path(None, "FOLIO_TEST_CONFIG");
        env::remove_var("FOLIO_TEST_CONFIG");
        assert_eq!(resolved, Some(PathBuf::from("/from/env.toml")));
    }

    #[test]
    #[serial]
    fn test_missing_config_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = load_site_config(Some(&missing), "FOLIO_TEST_CONFIG").unwrap();
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    #[serial]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "title = \"Marginalia\"\n").unwrap();
        let config = load_site_config(Some(&path), "FOLIO_TEST_CONFIG").unwrap();
        assert_eq!(config.title, "Marginalia");
    }
}
