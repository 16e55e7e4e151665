//! Configuration file handling.
//!
//! The configuration file is stored at `$HFIN_HOME/config.json` and contains the backend's base
//! URL, the session lifetime, the default page size, the hospital's UTC offset and the location
//! of the token file.

use crate::model::date;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "hfin";
const CONFIG_VERSION: u8 = 1;
const SESSION_DAYS: u32 = 1;
const PAGE_SIZE: u32 = 10;
const SECRETS: &str = ".secrets";
const TOKEN_JSON: &str = "token.json";
const CONFIG_JSON: &str = "config.json";
const TEST_BACKEND_JSON: &str = "test_backend.json";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$HFIN_HOME` and from there it loads `$HFIN_HOME/config.json`. It provides paths to
/// other items that are expected in a certain location within the home directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    secrets: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    base_url: Url,
}

impl Config {
    /// Creates the home directory, its `.secrets` subdirectory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/hfin`
    /// - `base_url` - The base URL of the ledger backend, e.g. `https://keuangan.example.org`
    ///
    /// # Errors
    /// - Returns an error if `base_url` is not a valid http(s) URL.
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>, base_url: &str) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the hfin home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let secrets = root.join(SECRETS);
        utils::make_dir(&secrets).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile {
            base_url: base_url.to_string(),
            ..ConfigFile::default()
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            secrets,
            config_path,
            config_file,
            base_url,
        })
    }

    /// This will
    /// - validate that `hfin_home` exists and that the config file exists
    /// - load and validate the config file
    /// - validate that the secrets directory exists
    pub async fn load(hfin_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = hfin_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The hfin home directory is missing, run 'hfin init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let base_url = parse_base_url(&config_file.base_url)
            .with_context(|| format!("Invalid base_url in {}", config_path.display()))?;
        config_file
            .validate()
            .with_context(|| format!("Invalid settings in {}", config_path.display()))?;

        let config = Self {
            secrets: root.join(SECRETS),
            root,
            config_path,
            config_file,
            base_url,
        };
        if !config.secrets.is_dir() {
            bail!(
                "The secrets directory is missing '{}'",
                config.secrets.display()
            )
        }
        date::set_local_offset(config.utc_offset());
        Ok(config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn secrets(&self) -> &Path {
        &self.secrets
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// How long a login stays valid.
    pub fn session_days(&self) -> u32 {
        self.config_file.session_days
    }

    /// Rows per page for list commands that are not given `--limit`.
    pub fn page_size(&self) -> u32 {
        self.config_file.page_size
    }

    /// The offset of the hospital's local time. Backend timestamps are read in this offset before
    /// their calendar date is taken.
    pub fn utc_offset(&self) -> FixedOffset {
        offset_of(self.config_file.utc_offset_minutes).unwrap_or_else(date::default_offset)
    }

    /// Returns the stored `token_path` if it is absolute, otherwise resolves the relative path.
    pub fn token_path(&self) -> PathBuf {
        let p = self.config_file.token_path();
        if p.is_absolute() {
            return p;
        }
        self.root.join(p)
    }

    /// Where the in-memory backend keeps its state between runs in test mode.
    pub fn test_backend_path(&self) -> PathBuf {
        self.root.join(TEST_BACKEND_JSON)
    }

    /// Changes the session lifetime and page size, then saves `config.json`.
    pub async fn set_preferences(
        &mut self,
        session_days: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<()> {
        if let Some(days) = session_days {
            ensure!(days > 0, "session_days must be at least 1");
            self.config_file.session_days = days;
        }
        if let Some(size) = page_size {
            ensure!(size > 0, "page_size must be at least 1");
            self.config_file.page_size = size;
        }
        self.config_file.save(&self.config_path).await
    }
}

fn offset_of(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

fn parse_base_url(s: &str) -> Result<Url> {
    let url = Url::parse(s).with_context(|| format!("'{s}' is not a valid URL"))?;
    ensure!(
        matches!(url.scheme(), "http" | "https"),
        "The base URL must use http or https, got '{}'",
        url.scheme()
    );
    Ok(url)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "hfin",
///   "config_version": 1,
///   "base_url": "https://keuangan.example.org/",
///   "session_days": 1,
///   "page_size": 10,
///   "utc_offset_minutes": 420,
///   "token_path": ".secrets/token.json"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "hfin"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the ledger backend
    base_url: String,

    /// Number of days a login stays valid
    #[serde(default = "default_session_days")]
    session_days: u32,

    /// Default rows per page
    #[serde(default = "default_page_size")]
    page_size: u32,

    /// Minutes east of UTC of the hospital's local time
    #[serde(default = "default_utc_offset_minutes")]
    utc_offset_minutes: i32,

    /// Path to the session token file (optional, relative to the home directory or absolute)
    /// Defaults to $HFIN_HOME/.secrets/token.json if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    token_path: Option<PathBuf>,
}

fn default_session_days() -> u32 {
    SESSION_DAYS
}

fn default_page_size() -> u32 {
    PAGE_SIZE
}

fn default_utc_offset_minutes() -> i32 {
    date::DEFAULT_OFFSET_MINUTES
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            base_url: String::new(),
            session_days: SESSION_DAYS,
            page_size: PAGE_SIZE,
            utc_offset_minutes: date::DEFAULT_OFFSET_MINUTES,
            token_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Checks the values a hand-edited file could get wrong.
    fn validate(&self) -> Result<()> {
        ensure!(self.session_days > 0, "session_days must be at least 1");
        ensure!(self.page_size > 0, "page_size must be at least 1");
        ensure!(
            offset_of(self.utc_offset_minutes).is_some(),
            "utc_offset_minutes must be within a day, got {}",
            self.utc_offset_minutes
        );
        Ok(())
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }

    /// Gets the token path.
    ///
    /// If the path is relative, it should be interpreted as relative to the home directory.
    /// If None, defaults to $HFIN_HOME/.secrets/token.json
    pub fn token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SECRETS).join(TOKEN_JSON))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_config_create() {
        let dir = TempDir::new().unwrap();
        let home_dir = dir.path().join("hfin_home");

        let config = Config::create(&home_dir, "https://keuangan.example.org")
            .await
            .unwrap();

        assert_eq!(config.base_url().as_str(), "https://keuangan.example.org/");
        assert_eq!(config.session_days(), 1);
        assert_eq!(config.page_size(), 10);
        assert!(config.secrets().is_dir());
        assert!(config.config_path().is_file());
        assert_eq!(
            config.token_path(),
            config.root().join(SECRETS).join(TOKEN_JSON)
        );
    }

    #[tokio::test]
    async fn test_config_create_then_load() {
        let dir = TempDir::new().unwrap();
        let mut created = Config::create(dir.path(), "http://localhost:8000")
            .await
            .unwrap();
        created.set_preferences(Some(3), Some(25)).await.unwrap();

        let loaded = Config::load(dir.path()).await.unwrap();
        assert_eq!(loaded.base_url().as_str(), "http://localhost:8000/");
        assert_eq!(loaded.session_days(), 3);
        assert_eq!(loaded.page_size(), 25);
    }

    #[tokio::test]
    async fn test_config_rejects_bad_url() {
        let dir = TempDir::new().unwrap();
        assert!(Config::create(dir.path(), "not a url").await.is_err());
        assert!(Config::create(dir.path(), "ftp://example.org").await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_missing_home() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(dir.path().join("nope")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_config_set_preferences_validates() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::create(dir.path(), "http://localhost").await.unwrap();
        assert!(config.set_preferences(Some(0), None).await.is_err());
        assert!(config.set_preferences(None, Some(0)).await.is_err());
    }

    #[tokio::test]
    async fn test_config_load_rejects_hand_edited_zeros() {
        let dir = TempDir::new().unwrap();
        Config::create(dir.path(), "http://localhost").await.unwrap();
        let config_path = dir.path().join(CONFIG_JSON);
        for (key, value) in [("session_days", 0), ("page_size", 0), ("utc_offset_minutes", 1440)] {
            let mut json = serde_json::json!({
                "app_name": "hfin",
                "config_version": 1,
                "base_url": "http://localhost"
            });
            json[key] = value.into();
            utils::write(&config_path, json.to_string()).await.unwrap();
            let err = Config::load(dir.path()).await.unwrap_err();
            assert!(format!("{err:#}").contains(key), "{key}: {err:#}");
        }
    }

    #[tokio::test]
    async fn test_config_utc_offset() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::create(dir.path(), "http://localhost").await.unwrap();
        assert_eq!(config.utc_offset(), FixedOffset::east_opt(7 * 3600).unwrap());
        config.config_file.utc_offset_minutes = -300;
        assert_eq!(config.utc_offset(), FixedOffset::west_opt(5 * 3600).unwrap());
    }

    #[tokio::test]
    async fn test_config_file_load_with_minimal_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "hfin",
            "config_version": 1,
            "base_url": "http://localhost:8000"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let config = ConfigFile::load(&config_path).await.unwrap();
        assert_eq!(config.session_days, SESSION_DAYS);
        assert_eq!(config.page_size, PAGE_SIZE);
        assert_eq!(config.token_path(), PathBuf::from(SECRETS).join(TOKEN_JSON));
    }

    #[tokio::test]
    async fn test_config_file_load_invalid_app_name() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.json");
        let json = r#"{
            "app_name": "ledger",
            "config_version": 1,
            "base_url": "http://localhost:8000"
        }"#;
        utils::write(&config_path, json).await.unwrap();

        let result = ConfigFile::load(&config_path).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid app_name"));
    }

    #[test]
    fn test_config_file_serialization_omits_none_fields() {
        let json = serde_json::to_string(&ConfigFile::default()).unwrap();
        assert!(!json.contains("token_path"));
    }
}
