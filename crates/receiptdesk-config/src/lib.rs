//! Configuration management for receiptdesk
//!
//! This module handles loading, validation, and management of
//! receiptdesk configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub use error::{ConfigError, ConfigErrorSeverity, ConfigResult};

// ==================== Configuration Types ====================

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the receipt backend, without trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Local persistent storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the local storage and cookie files
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
    /// Key-value store file name
    #[serde(default = "default_local_file")]
    pub local_file: String,
    /// Cookie jar file name
    #[serde(default = "default_cookie_file")]
    pub cookie_file: String,
    /// Lifetime of fallback cookies
    #[serde(default = "default_cookie_max_age_days")]
    pub cookie_max_age_days: i64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
            local_file: default_local_file(),
            cookie_file: default_cookie_file(),
            cookie_max_age_days: default_cookie_max_age_days(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from("./.receiptdesk")
}

fn default_local_file() -> String {
    "local_storage.json".to_string()
}

fn default_cookie_file() -> String {
    "cookies.json".to_string()
}

fn default_cookie_max_age_days() -> i64 {
    365
}

/// Notification display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Auto-dismiss delay in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
        }
    }
}

fn default_duration_ms() -> u64 {
    5000
}

/// QuickBooks session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickBooksConfig {
    /// Path of the OAuth entry point, relative to the base URL
    #[serde(default = "default_auth_path")]
    pub auth_path: String,
    /// How many times to poll the status endpoint after authorizing
    #[serde(default = "default_poll_attempts")]
    pub status_poll_attempts: u32,
    /// Delay between status polls
    #[serde(default = "default_poll_interval_ms")]
    pub status_poll_interval_ms: u64,
}

impl Default for QuickBooksConfig {
    fn default() -> Self {
        Self {
            auth_path: default_auth_path(),
            status_poll_attempts: default_poll_attempts(),
            status_poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_auth_path() -> String {
    "/api/quickbooks/auth".to_string()
}

fn default_poll_attempts() -> u32 {
    10
}

fn default_poll_interval_ms() -> u64 {
    1000
}

/// Logo upload limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Maximum file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Maximum image width in pixels
    #[serde(default = "default_max_dimension")]
    pub max_width: u32,
    /// Maximum image height in pixels
    #[serde(default = "default_max_dimension")]
    pub max_height: u32,
    /// Maximum filename length
    #[serde(default = "default_max_filename_len")]
    pub max_filename_len: usize,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            max_width: default_max_dimension(),
            max_height: default_max_dimension(),
            max_filename_len: default_max_filename_len(),
        }
    }
}

fn default_max_file_size() -> u64 {
    5 * 1024 * 1024
}

fn default_max_dimension() -> u32 {
    2048
}

fn default_max_filename_len() -> usize {
    255
}

/// Receipt table settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Narrowest width a column can be dragged to
    #[serde(default = "default_min_column_width")]
    pub min_column_width: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            min_column_width: default_min_column_width(),
        }
    }
}

fn default_min_column_width() -> u32 {
    50
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Local storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// QuickBooks session settings
    #[serde(default)]
    pub quickbooks: QuickBooksConfig,
    /// Logo upload limits
    #[serde(default)]
    pub logo: LogoConfig,
    /// Table settings
    #[serde(default)]
    pub table: TableConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::IoError)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let config: Config =
            serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidYaml {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> ConfigResult<()> {
        let base_url = self.server.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "server.base_url".to_string(),
            });
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "server.base_url".to_string(),
                reason: "Base URL must start with http:// or https://".to_string(),
            });
        }

        if self.server.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.timeout_secs".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.storage.cookie_max_age_days <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "storage.cookie_max_age_days".to_string(),
                reason: "Cookie lifetime must be at least one day".to_string(),
            });
        }

        if self.logo.max_file_size == 0 || self.logo.max_width == 0 || self.logo.max_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "logo".to_string(),
                reason: "Logo limits must be greater than 0".to_string(),
            });
        }

        if self.quickbooks.status_poll_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quickbooks.status_poll_attempts".to_string(),
                reason: "At least one status poll is required".to_string(),
            });
        }

        if self.table.min_column_width == 0 {
            return Err(ConfigError::InvalidValue {
                field: "table.min_column_width".to_string(),
                reason: "Minimum column width must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Full path of the local key-value store
    pub fn local_storage_path(&self) -> PathBuf {
        self.storage.dir.join(&self.storage.local_file)
    }

    /// Full path of the cookie jar
    pub fn cookie_jar_path(&self) -> PathBuf {
        self.storage.dir.join(&self.storage.cookie_file)
    }

    /// Absolute URL of the QuickBooks authorization entry point
    pub fn quickbooks_auth_url(&self) -> String {
        format!(
            "{}{}",
            self.server.base_url.trim_end_matches('/'),
            self.quickbooks.auth_path
        )
    }
}

// ==================== Tests ====================
