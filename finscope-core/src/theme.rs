//! Light/dark theme state with write-through persistence.
//!
//! `ThemeController::set` is the only mutation path: it updates the mode and
//! persists it under the `theme` key in the same call. Both the startup path
//! (`load`) and the toggle action go through it or read the same key.

use std::fmt;
use std::str::FromStr;

use tracing::{info, warn};

use crate::error::StorageError;
use crate::storage::Storage;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(ThemeMode::Dark),
            "light" => Ok(ThemeMode::Light),
            other => Err(format!("unknown theme '{other}' (expected dark or light)")),
        }
    }
}

pub struct ThemeController {
    mode: ThemeMode,
    storage: Box<dyn Storage>,
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeController").field("mode", &self.mode).finish()
    }
}

impl ThemeController {
    /// Restore the mode from storage. Only an exact `"dark"` selects dark.
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let mode = match storage.get(THEME_KEY).as_deref() {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        };
        Self { mode, storage }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Apply `mode` and persist it. The in-memory mode changes even if the
    /// write fails.
    pub fn set(&mut self, mode: ThemeMode) -> Result<(), StorageError> {
        self.mode = mode;
        info!(theme = %mode, "theme changed");
        self.storage.set(THEME_KEY, mode.as_str()).map_err(|e| {
            warn!(error = %e, "failed to persist theme");
            e
        })
    }

    pub fn toggle(&mut self) -> Result<ThemeMode, StorageError> {
        let next = self.mode.flipped();
        self.set(next)?;
        Ok(next)
    }

    pub fn persisted(&self) -> Option<String> {
        self.storage.get(THEME_KEY)
    }
}
