// src/theme.rs
//! Light/dark display preference, persisted in the cookie jar

use std::fmt;
use std::path::Path;
use tracing::{error, warn};

use crate::core::config_manager::StorageSettings;
use crate::store::job_store::COOKIE_FILE;
use crate::store::media::{CookieJar, CookieOptions, StorageMedium};

pub const THEME_KEY: &str = "jobtrack_theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct ThemeStore {
    medium: Box<dyn StorageMedium>,
    current: Theme,
}

impl ThemeStore {
    /// Saved preference wins; otherwise the system color scheme decides
    pub fn new(medium: Box<dyn StorageMedium>, system_prefers_dark: bool) -> Self {
        let saved = match medium.read(THEME_KEY) {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Could not read theme preference: {:#}", e);
                None
            }
        };
        let current = match saved.as_deref() {
            Some(value) if value == "dark" => Theme::Dark,
            Some(_) => Theme::Light,
            None if system_prefers_dark => Theme::Dark,
            None => Theme::Light,
        };
        Self { medium, current }
    }

    pub fn open(data_dir: &Path, settings: &StorageSettings, system_prefers_dark: bool) -> Self {
        let jar = CookieJar::new(
            data_dir.join(COOKIE_FILE),
            CookieOptions {
                expires_days: Some(settings.cookie_expiry_days),
                same_site: None,
                max_bytes: settings.cookie_quota_bytes,
            },
        );
        Self::new(Box::new(jar), system_prefers_dark)
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    /// Flip and persist; the new theme applies even if the write fails
    pub fn toggle(&mut self) -> Theme {
        self.current = self.current.toggled();
        self.persist();
        self.current
    }

    pub fn persist(&mut self) -> bool {
        match self.medium.write(THEME_KEY, self.current.as_str()) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving theme: {:#}", e);
                false
            }
        }
    }
}

/// Best-effort read of the desktop color scheme from the environment
pub fn system_prefers_dark() -> bool {
    std::env::var("JOBTRACK_COLOR_SCHEME")
        .or_else(|_| std::env::var("COLORFGBG"))
        .map(|v| {
            let v = v.to_lowercase();
            // COLORFGBG is "fg;bg"; backgrounds 0-6 and 8 are dark
            v == "dark"
                || v.rsplit(';')
                    .next()
                    .and_then(|bg| bg.parse::<u8>().ok())
                    .is_some_and(|bg| bg <= 6 || bg == 8)
        })
        .unwrap_or(false)
}
