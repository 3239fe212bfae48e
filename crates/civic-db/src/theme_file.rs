// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use civic_app::{PersistedTheme, THEME_STORAGE_KEY, ThemeStore};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const THEME_FILE_NAME: &str = "civic-theme.json";

/// Where the theme mode lives between runs.
pub trait ThemePersistence {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<PersistedTheme>>;

    fn save(&mut self, theme: PersistedTheme) -> Result<()>;
}

/// `<state_dir>/civic-theme.json` holding `{"mode":"light"|"dark"}`.
#[derive(Debug, Clone)]
pub struct ThemeFile {
    path: PathBuf,
}

impl ThemeFile {
    pub fn in_dir(state_dir: &Path) -> Self {
        Self {
            path: state_dir.join(THEME_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemePersistence for ThemeFile {
    fn load(&self) -> Result<Option<PersistedTheme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("read theme file {}", self.path.display()))?;
        let theme = parse_theme(&raw)
            .with_context(|| format!("parse {THEME_STORAGE_KEY} from {}", self.path.display()))?;
        Ok(Some(theme))
    }

    fn save(&mut self, theme: PersistedTheme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create theme directory {}", parent.display()))?;
        }
        let body = serde_json::to_string(&theme).context("serialize theme")?;
        fs::write(&self.path, body)
            .with_context(|| format!("write theme file {}", self.path.display()))?;
        debug!(path = %self.path.display(), mode = theme.mode.as_str(), "theme saved");
        Ok(())
    }
}

/// In-process persistence keeping the raw JSON.
#[derive(Debug, Clone, Default)]
pub struct MemoryTheme {
    raw: Option<String>,
    writes: usize,
}

impl MemoryTheme {
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ThemePersistence for MemoryTheme {
    fn load(&self) -> Result<Option<PersistedTheme>> {
        self.raw.as_deref().map(parse_theme).transpose()
    }

    fn save(&mut self, theme: PersistedTheme) -> Result<()> {
        self.raw = Some(serde_json::to_string(&theme).context("serialize theme")?);
        self.writes += 1;
        Ok(())
    }
}

fn parse_theme(raw: &str) -> Result<PersistedTheme> {
    serde_json::from_str(raw)
        .context("theme must look like {\"mode\":\"light\"} or {\"mode\":\"dark\"}")
}

/// Applies the saved mode to `store`. Unreadable or malformed state keeps the
/// store's default mode.
pub fn hydrate_theme(store: &mut ThemeStore, persistence: &dyn ThemePersistence) {
    let persisted = match persistence.load() {
        Ok(persisted) => persisted,
        Err(error) => {
            warn!("ignoring saved theme: {error:#}");
            None
        }
    };
    store.hydrate(persisted);
}

#[cfg(test)]
mod tests {
    use super::{MemoryTheme, ThemePersistence, hydrate_theme};
    use civic_app::{ThemeMode, ThemeStore};

    #[test]
    fn corrupt_state_hydrates_to_default() {
        let persistence = MemoryTheme::with_raw("{\"mode\":\"sepia\"}");
        let mut store = ThemeStore::new(ThemeMode::Dark);
        hydrate_theme(&mut store, &persistence);
        assert!(store.is_hydrated());
        assert_eq!(store.mode(), ThemeMode::Dark);
    }

    #[test]
    fn toggle_round_trips_through_memory() -> anyhow::Result<()> {
        let mut persistence = MemoryTheme::default();
        let mut store = ThemeStore::new(ThemeMode::Light);
        hydrate_theme(&mut store, &persistence);

        persistence.save(store.toggle())?;
        assert_eq!(persistence.raw(), Some("{\"mode\":\"dark\"}"));
        assert_eq!(persistence.writes(), 1);

        let mut restarted = ThemeStore::new(ThemeMode::Light);
        hydrate_theme(&mut restarted, &persistence);
        assert_eq!(restarted.mode(), ThemeMode::Dark);
        Ok(())
    }
}
