// src/store/media.rs
//! Key/value storage media behind the job store.
//!
//! `CookieJar` is the size-limited primary, `LocalStorage` the unlimited
//! secondary. `TieredWriter` tries them in that fixed order.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::core::FsOps;

pub trait StorageMedium {
    fn name(&self) -> &str;
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieOptions {
    pub expires_days: Option<i64>,
    pub same_site: Option<SameSite>,
    pub max_bytes: usize,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            expires_days: Some(365),
            same_site: None,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CookieEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    same_site: Option<SameSite>,
}

impl CookieEntry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }
}

/// Cookie-style medium persisted as one JSON file. Several jars with
/// different options may share the file; each write is read-modify-write.
#[derive(Debug, Clone)]
pub struct CookieJar {
    path: PathBuf,
    options: CookieOptions,
}

impl CookieJar {
    pub fn new(path: impl Into<PathBuf>, options: CookieOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, CookieEntry>> {
        match FsOps::read_optional(&self.path)? {
            Some(raw) if !raw.trim().is_empty() => serde_json::from_str(&raw)
                .with_context(|| format!("Corrupt cookie file: {}", self.path.display())),
            _ => Ok(BTreeMap::new()),
        }
    }

    fn store(&self, entries: &BTreeMap<String, CookieEntry>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries).context("Failed to serialize cookies")?;
        FsOps::write_file_safe(&self.path, &raw)
    }
}

impl StorageMedium for CookieJar {
    fn name(&self) -> &str {
        "cookie"
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.load()?;
        let now = Utc::now();
        Ok(entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.value.clone()))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        let size = key.len() + 1 + encoded_cookie_len(value);
        if size > self.options.max_bytes {
            anyhow::bail!(
                "Cookie {} is {} bytes, over the {} byte quota",
                key,
                size,
                self.options.max_bytes
            );
        }

        // An unreadable jar is replaced rather than blocking every write
        let mut entries = self.load().unwrap_or_else(|e| {
            warn!("Discarding unreadable cookie jar: {:#}", e);
            BTreeMap::new()
        });

        let now = Utc::now();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.insert(
            key.to_string(),
            CookieEntry {
                value: value.to_string(),
                expires: self.options.expires_days.map(|days| now + Duration::days(days)),
                same_site: self.options.same_site,
            },
        );
        self.store(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.store(&entries)?;
        }
        Ok(())
    }
}

/// Length of `value` after cookie encoding: URI-component escaping, minus the
/// punctuation that cookies carry verbatim.
pub fn encoded_cookie_len(value: &str) -> usize {
    value
        .bytes()
        .map(|b| {
            let verbatim = b.is_ascii_alphanumeric()
                || b"-_.!~*'()".contains(&b)
                || b"#$&+/:<=>?@[]^`{|}".contains(&b);
            if verbatim {
                1
            } else {
                3
            }
        })
        .sum()
}

/// Unlimited medium: one file per key, no expiry, no scoping
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(FsOps::key_file_name(key))
    }
}

impl StorageMedium for LocalStorage {
    fn name(&self) -> &str {
        "local storage"
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        FsOps::read_optional(&self.key_path(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        FsOps::write_file_safe(&self.key_path(key), value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        FsOps::remove_file(&self.key_path(key))
    }
}

/// Primary then secondary, for reads and writes alike
pub struct TieredWriter {
    primary: Box<dyn StorageMedium>,
    secondary: Box<dyn StorageMedium>,
}

impl TieredWriter {
    pub fn new(primary: Box<dyn StorageMedium>, secondary: Box<dyn StorageMedium>) -> Self {
        Self { primary, secondary }
    }

    /// First value found; medium errors are logged and skipped
    pub fn read(&self, key: &str) -> Option<String> {
        for medium in [&self.primary, &self.secondary] {
            match medium.read(key) {
                Ok(Some(value)) => return Some(value),
                Ok(None) => {}
                Err(e) => error!("Error reading {} from {}: {:#}", key, medium.name(), e),
            }
        }
        None
    }

    /// True when either medium accepted the value
    pub fn write(&mut self, key: &str, value: &str) -> bool {
        let primary_err = match self.primary.write(key, value) {
            Ok(()) => {
                // An older fallback copy must not resurface if the primary loses the key
                if let Err(e) = self.secondary.remove(key) {
                    warn!(
                        "Could not clear stale {} from {}: {:#}",
                        key,
                        self.secondary.name(),
                        e
                    );
                }
                return true;
            }
            Err(e) => e,
        };
        error!(
            "Error saving {} to {}: {:#}",
            key,
            self.primary.name(),
            primary_err
        );

        if let Err(e) = self.secondary.write(key, value) {
            error!("Error saving {} to {}: {:#}", key, self.secondary.name(), e);
            return false;
        }
        info!("Saved {} to {} instead", key, self.secondary.name());

        // The primary still holds the previous value, which would shadow this one
        if let Err(e) = self.primary.remove(key) {
            warn!("Could not clear stale {} from {}: {:#}", key, self.primary.name(), e);
        }
        true
    }
}
