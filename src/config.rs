//! Configuration management for booklens using the prefer crate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisConfig;
use crate::catalog::CatalogConfig;
use crate::llm::LlmConfig;
use crate::repository::BookDbContext;

/// Default database filename.
pub const DEFAULT_DATABASE_FILENAME: &str = "booklens.db";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base data directory.
    pub data_dir: PathBuf,
    /// Database filename.
    pub database_filename: String,
    /// Database URL (overrides data_dir/database_filename if set).
    /// Set via DATABASE_URL env var.
    pub database_url: Option<String>,
    /// User agent for catalog requests.
    pub user_agent: String,
    /// Catalog request timeout in seconds.
    pub request_timeout: u64,
    /// Catalog endpoints.
    pub catalog: CatalogConfig,
    /// Completion service.
    pub llm: LlmConfig,
    /// Analysis limits.
    pub analysis: AnalysisConfig,
}

impl Default for Settings {
    fn default() -> Self {
        // Falls back gracefully: local data dir -> Home dir -> Current dir
        let data_dir = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("booklens");

        Self {
            data_dir,
            database_filename: DEFAULT_DATABASE_FILENAME.to_string(),
            database_url: None,
            user_agent: format!("booklens/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: 30,
            catalog: CatalogConfig::default(),
            llm: LlmConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Settings {
    /// Create settings with a custom data directory.
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Default::default()
        }
    }

    /// Get the database URL, constructing from path if not explicitly set.
    pub fn database_url(&self) -> String {
        if let Some(ref url) = self.database_url {
            url.clone()
        } else {
            format!("sqlite:{}", self.database_path().display())
        }
    }

    /// Get the full path to the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_filename)
    }

    /// Ensure the data directory exists.
    pub fn ensure_directories(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create data directory '{}': {}",
                    self.data_dir.display(),
                    e
                ),
            )
        })
    }

    /// Create a database context using the configured database URL or path.
    pub fn create_db_context(&self) -> BookDbContext {
        BookDbContext::from_url(&self.database_url())
    }
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Data directory path.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "target")]
    pub data_dir: Option<String>,
    /// Database filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// User agent string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "CatalogConfig::is_default")]
    pub catalog: CatalogConfig,
    #[serde(default, skip_serializing_if = "LlmConfig::is_default")]
    pub llm: LlmConfig,
    #[serde(default, skip_serializing_if = "AnalysisConfig::is_default")]
    pub analysis: AnalysisConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers booklens config files in standard locations.
    pub async fn load() -> Self {
        // Use prefer for file discovery, then parse with serde
        let discovered = match prefer::load("booklens").await {
            Ok(pref_config) => pref_config.source_path().map(|p| p.to_path_buf()),
            Err(_) => None,
        };

        match discovered {
            Some(path) => match Self::load_from_path(&path).await {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("{}", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML and YAML based on file extension.
    pub async fn load_from_path(path: &Path) -> Result<Self, String> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let mut config = Self::parse(&contents, path)?;
        config.source_path = Some(path.to_path_buf());

        // Environment takes precedence over the file
        config.catalog = config.catalog.with_env_overrides();
        config.llm = config.llm.with_env_overrides();
        config.analysis = config.analysis.with_env_overrides();
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self, String> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

        match ext {
            "toml" => {
                toml::from_str(contents).map_err(|e| format!("Failed to parse TOML config: {}", e))
            }
            "yaml" | "yml" => serde_yaml::from_str(contents)
                .map_err(|e| format!("Failed to parse YAML config: {}", e)),
            _ => serde_json::from_str(contents)
                .map_err(|e| format!("Failed to parse JSON config: {}", e)),
        }
    }

    /// Get the base directory for resolving relative paths.
    /// Returns the config file's parent directory if available, otherwise None.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a path that may be relative to the config file.
    /// - Absolute paths are returned as-is
    /// - Paths starting with ~ are expanded
    /// - Relative paths are resolved relative to `base_dir`
    pub fn resolve_path(&self, path_str: &str, base_dir: &Path) -> PathBuf {
        let expanded = shellexpand::tilde(path_str);
        let path = Path::new(expanded.as_ref());

        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base_dir.join(path)
        }
    }

    /// Apply configuration to settings.
    /// `base_dir` is used to resolve relative paths (typically config file dir or CWD).
    pub fn apply_to_settings(&self, settings: &mut Settings, base_dir: &Path) {
        if let Some(ref data_dir) = self.data_dir {
            settings.data_dir = self.resolve_path(data_dir, base_dir);
        }
        if let Some(ref database) = self.database {
            settings.database_filename = database.clone();
        }
        if let Some(ref user_agent) = self.user_agent {
            settings.user_agent = user_agent.clone();
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout = timeout;
        }
        settings.catalog = self.catalog.clone();
        settings.llm = self.llm.clone();
        settings.analysis = self.analysis.clone();
    }
}

/// Options for loading settings.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
    /// Data directory or database file (--target flag).
    /// Can be a directory containing booklens.db or a .db file directly.
    pub target: Option<PathBuf>,
}

/// Whether a path names a SQLite file rather than a directory.
fn is_db_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "db" || ext == "sqlite" || ext == "sqlite3")
        || path.is_file()
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    }
}

/// Load settings with explicit options.
/// Returns (Settings, Config) tuple.
pub async fn load_settings_with_options(options: LoadOptions) -> (Settings, Config) {
    let config = match options.config_path {
        Some(ref path) => Config::load_from_path(path).await.unwrap_or_else(|e| {
            tracing::warn!("{}", e);
            Config::default()
        }),
        None => Config::load().await,
    };

    let mut settings = Settings::default();

    let base_dir = config
        .base_dir()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    config.apply_to_settings(&mut settings, &base_dir);

    // --target takes precedence over the config file
    if let Some(ref target) = options.target {
        let target = absolute(target);
        if is_db_file(&target) {
            if let Some(name) = target.file_name().and_then(|n| n.to_str()) {
                settings.database_filename = name.to_string();
            }
            settings.data_dir = target
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
        } else {
            settings.data_dir = target;
        }
    }

    // DATABASE_URL environment variable takes highest precedence
    if let Some(database_url) = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()) {
        tracing::debug!("Using DATABASE_URL from environment: {}", database_url);
        settings.database_url = Some(database_url);
    }

    (settings, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_database_url_from_path() {
        let settings = Settings::with_data_dir(PathBuf::from("/tmp/books"));
        assert_eq!(settings.database_url(), "sqlite:/tmp/books/booklens.db");
    }

    #[test]
    fn test_explicit_database_url_wins() {
        let mut settings = Settings::with_data_dir(PathBuf::from("/tmp/books"));
        settings.database_url = Some("sqlite:/srv/other.db".to_string());
        assert_eq!(settings.database_url(), "sqlite:/srv/other.db");
    }

    #[test]
    fn test_parse_by_extension() {
        let toml = r#"
            data_dir = "data"
            request_timeout = 10

            [analysis]
            max_chars = 500
        "#;
        let config = Config::parse(toml, Path::new("booklens.toml")).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("data"));
        assert_eq!(config.request_timeout, Some(10));
        assert_eq!(config.analysis.max_chars, 500);

        let yaml = "target: ./library\nllm:\n  model: tiny\n";
        let config = Config::parse(yaml, Path::new("booklens.yaml")).unwrap();
        assert_eq!(config.data_dir.as_deref(), Some("./library"));
        assert_eq!(config.llm.model, "tiny");

        let json = r#"{"user_agent": "test-agent"}"#;
        let config = Config::parse(json, Path::new("booklens.json")).unwrap();
        assert_eq!(config.user_agent.as_deref(), Some("test-agent"));
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = Config::parse("not = [valid", Path::new("x.toml")).unwrap_err();
        assert!(err.contains("TOML"));
    }

    #[tokio::test]
    async fn test_relative_data_dir_resolves_against_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("booklens.json");
        std::fs::write(&path, r#"{"data_dir": "library", "database": "cache.db"}"#).unwrap();

        let config = Config::load_from_path(&path).await.unwrap();
        let mut settings = Settings::default();
        config.apply_to_settings(&mut settings, &config.base_dir().unwrap());

        assert_eq!(settings.data_dir, dir.path().join("library"));
        assert_eq!(settings.database_path(), dir.path().join("library/cache.db"));
    }

    #[tokio::test]
    async fn test_target_db_file_sets_dir_and_filename() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("empty.json");
        std::fs::write(&config_path, "{}").unwrap();
        let db = dir.path().join("shelf.sqlite");

        let (settings, _) = load_settings_with_options(LoadOptions {
            config_path: Some(config_path),
            target: Some(db),
        })
        .await;

        assert_eq!(settings.data_dir, dir.path());
        assert_eq!(settings.database_filename, "shelf.sqlite");
    }

    #[test]
    fn test_ensure_directories() {
        let dir = tempdir().unwrap();
        let settings = Settings::with_data_dir(dir.path().join("a/b"));
        settings.ensure_directories().unwrap();
        assert!(settings.data_dir.is_dir());
    }
}
