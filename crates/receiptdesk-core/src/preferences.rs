//! Preference persistence with a server → local storage → cookie fallback
//!
//! The "show welcome screen" preference has to survive before the user has a
//! server session. Writes that cannot reach the server land in local storage
//! with a pending marker; `flush_pending` pushes them once a session exists
//! and clears the marker only after the server accepted the value.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::{CoreError, CoreResult};

pub const SHOW_WELCOME_KEY: &str = "showOpeningScreenPreference";
pub const SHOW_WELCOME_PENDING_KEY: &str = "showOpeningScreenPreferencePending";
pub const TOS_AGREED_KEY: &str = "tosAgreed";
pub const WELCOME_SHOWN_FLAG: &str = "welcomeDialogShown";

/// Server-side key-value option store
#[async_trait]
pub trait OptionStore: Send + Sync {
    /// `Ok(None)` when the option has never been stored
    async fn get_option(&self, name: &str) -> CoreResult<Option<serde_json::Value>>;
    async fn set_option(&self, name: &str, value: serde_json::Value) -> CoreResult<()>;
}

/// Client-side string storage
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> CoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove(&self, key: &str) -> CoreResult<()>;
}

fn storage_error(error: impl std::fmt::Display) -> CoreError {
    CoreError::StorageError {
        message: error.to_string(),
    }
}

// ==================== Storage backends ====================

/// In-memory storage, gone with the process
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let values = self.values.read().map_err(storage_error)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut values = self.values.write().map_err(storage_error)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut values = self.values.write().map_err(storage_error)?;
        values.remove(key);
        Ok(())
    }
}

/// Local persistent storage: a JSON object in a file
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> CoreResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(storage_error)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(storage_error)
    }

    fn store(&self, values: &BTreeMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_error)?;
            }
        }
        let content = serde_json::to_string_pretty(values).map_err(storage_error)?;
        std::fs::write(&self.path, content).map_err(storage_error)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        self.store(&values)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut values = self.load()?;
        if values.remove(key).is_some() {
            self.store(&values)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Cookie {
    value: String,
    expires: DateTime<Utc>,
}

/// Cookie fallback: values with an expiry, persisted to a file
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
    max_age: Duration,
}

impl CookieJar {
    pub fn new(path: impl Into<PathBuf>, max_age_days: i64) -> Self {
        Self {
            path: path.into(),
            max_age: Duration::days(max_age_days),
        }
    }

    fn load(&self) -> CoreResult<BTreeMap<String, Cookie>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(storage_error)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(storage_error)
    }

    fn store(&self, cookies: &BTreeMap<String, Cookie>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage_error)?;
            }
        }
        let content = serde_json::to_string_pretty(cookies).map_err(storage_error)?;
        std::fs::write(&self.path, content).map_err(storage_error)
    }

    /// Expiry a cookie written now would get
    pub fn expiry_from(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + self.max_age
    }
}

impl KeyValueStorage for CookieJar {
    fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let now = Utc::now();
        Ok(self
            .load()?
            .get(key)
            .filter(|cookie| cookie.expires > now)
            .map(|cookie| cookie.value.clone()))
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut cookies = self.load()?;
        let now = Utc::now();
        cookies.retain(|_, cookie| cookie.expires > now);
        cookies.insert(
            key.to_string(),
            Cookie {
                value: value.to_string(),
                expires: self.expiry_from(now),
            },
        );
        self.store(&cookies)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut cookies = self.load()?;
        if cookies.remove(key).is_some() {
            self.store(&cookies)?;
        }
        Ok(())
    }
}

// ==================== Session-scoped flags ====================

/// Flags that last for one session only
#[derive(Debug, Clone, Default)]
pub struct SessionFlags {
    flags: HashSet<String>,
}

impl SessionFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn set(&mut self, flag: &str) {
        self.flags.insert(flag.to_string());
    }

    pub fn welcome_shown(&self) -> bool {
        self.is_set(WELCOME_SHOWN_FLAG)
    }

    pub fn mark_welcome_shown(&mut self) {
        self.set(WELCOME_SHOWN_FLAG);
    }
}

// ==================== Preference store ====================

/// Whether a server session is available for option reads and writes
#[derive(Clone, Copy)]
pub enum Session<'a> {
    Anonymous,
    Authenticated(&'a dyn OptionStore),
}

/// Which tier accepted a write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistTier {
    Server,
    Local,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    NothingPending,
    /// The pending value reached the server and the marker was cleared
    Flushed(bool),
    /// The server refused; the marker stays for the next attempt
    Failed(String),
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn option_to_bool(value: &serde_json::Value) -> Option<bool> {
    match value {
        serde_json::Value::Bool(b) => Some(*b),
        serde_json::Value::String(s) => parse_bool(s),
        serde_json::Value::Object(map) => map.get("value").and_then(option_to_bool),
        _ => None,
    }
}

pub struct PreferenceStore {
    local: Box<dyn KeyValueStorage>,
    cookies: Box<dyn KeyValueStorage>,
}

impl PreferenceStore {
    pub fn new(local: Box<dyn KeyValueStorage>, cookies: Box<dyn KeyValueStorage>) -> Self {
        Self { local, cookies }
    }

    /// File-backed store under the configured storage directory
    pub fn from_config(config: &receiptdesk_config::Config) -> Self {
        Self::new(
            Box::new(FileStorage::new(config.local_storage_path())),
            Box::new(CookieJar::new(
                config.cookie_jar_path(),
                config.storage.cookie_max_age_days,
            )),
        )
    }

    /// Write locally, falling back to a cookie when local storage fails
    fn local_set(&self, key: &str, value: &str) -> CoreResult<PersistTier> {
        match self.local.set(key, value) {
            Ok(()) => Ok(PersistTier::Local),
            Err(error) => {
                log::warn!("Local storage write failed ({}), using cookie", error);
                self.cookies.set(key, value)?;
                Ok(PersistTier::Cookie)
            }
        }
    }

    /// Read locally, consulting the cookie jar when local storage fails or
    /// has nothing
    fn local_get(&self, key: &str) -> Option<String> {
        match self.local.get(key) {
            Ok(Some(value)) => return Some(value),
            Ok(None) => {}
            Err(error) => log::warn!("Local storage read failed ({}), using cookie", error),
        }
        self.cookies.get(key).ok().flatten()
    }

    fn local_remove(&self, key: &str) {
        if let Err(error) = self.local.remove(key) {
            log::warn!("Could not remove {} from local storage: {}", key, error);
        }
        if let Err(error) = self.cookies.remove(key) {
            log::warn!("Could not remove {} cookie: {}", key, error);
        }
    }

    pub fn has_pending(&self) -> bool {
        self.local_get(SHOW_WELCOME_PENDING_KEY)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(false)
    }

    /// Persist the "show welcome screen" preference
    pub async fn save_show_welcome(&self, session: Session<'_>, show: bool) -> CoreResult<PersistTier> {
        let text = show.to_string();

        if let Session::Authenticated(server) = session {
            match server.set_option(SHOW_WELCOME_KEY, serde_json::json!(show)).await {
                Ok(()) => {
                    if let Err(error) = self.local_set(SHOW_WELCOME_KEY, &text) {
                        log::debug!("Could not mirror preference locally: {}", error);
                    }
                    self.local_remove(SHOW_WELCOME_PENDING_KEY);
                    return Ok(PersistTier::Server);
                }
                Err(error) => {
                    log::warn!("Saving preference to server failed, keeping it locally: {}", error);
                }
            }
        }

        let tier = self.local_set(SHOW_WELCOME_KEY, &text)?;
        self.local_set(SHOW_WELCOME_PENDING_KEY, "true")?;
        Ok(tier)
    }

    /// Read the "show welcome screen" preference; defaults to `true`
    pub async fn load_show_welcome(&self, session: Session<'_>) -> bool {
        if let Session::Authenticated(server) = session {
            match server.get_option(SHOW_WELCOME_KEY).await {
                Ok(Some(value)) => return option_to_bool(&value).unwrap_or(true),
                Ok(None) => return true,
                Err(error) => {
                    log::warn!("Reading preference from server failed, using local value: {}", error);
                }
            }
        }

        self.local_get(SHOW_WELCOME_KEY)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(true)
    }

    /// Push a locally pending preference to the server
    pub async fn flush_pending(&self, server: &dyn OptionStore) -> FlushOutcome {
        if !self.has_pending() {
            return FlushOutcome::NothingPending;
        }

        let Some(value) = self.local_get(SHOW_WELCOME_KEY).and_then(|v| parse_bool(&v)) else {
            self.local_remove(SHOW_WELCOME_PENDING_KEY);
            return FlushOutcome::NothingPending;
        };

        match server.set_option(SHOW_WELCOME_KEY, serde_json::json!(value)).await {
            Ok(()) => {
                self.local_remove(SHOW_WELCOME_PENDING_KEY);
                log::info!("Pending welcome preference synced to server");
                FlushOutcome::Flushed(value)
            }
            Err(error) => {
                log::warn!("Pending preference flush failed, will retry later: {}", error);
                FlushOutcome::Failed(error.to_string())
            }
        }
    }

    /// Record that the terms of service were accepted
    pub async fn record_tos_agreement(&self, session: Session<'_>) -> CoreResult<PersistTier> {
        let tier = self.local_set(TOS_AGREED_KEY, "true")?;
        if let Session::Authenticated(server) = session {
            server
                .set_option(TOS_AGREED_KEY, serde_json::json!(true))
                .await?;
            return Ok(PersistTier::Server);
        }
        Ok(tier)
    }

    pub async fn tos_agreed(&self, session: Session<'_>) -> bool {
        if self
            .local_get(TOS_AGREED_KEY)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(false)
        {
            return true;
        }
        if let Session::Authenticated(server) = session {
            if let Ok(Some(value)) = server.get_option(TOS_AGREED_KEY).await {
                return option_to_bool(&value).unwrap_or(false);
            }
        }
        false
    }
}

// ==================== Tests ====================
