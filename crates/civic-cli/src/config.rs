// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use civic_app::{Role, ThemeMode};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_FILE: &str = "civic.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            storage: Storage::default(),
            ui: Ui::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Storage {
    pub state_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ui {
    pub role: Option<String>,
    pub page_size: Option<usize>,
    pub theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some("info".to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CIVIC_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set CIVIC_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(civic_db::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = {CONFIG_VERSION}` and move values under [storage], [ui], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = {CONFIG_VERSION}",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(state_dir) = &self.storage.state_dir {
            civic_db::validate_state_dir(state_dir)?;
        }

        if let Some(role) = &self.ui.role
            && Role::parse(role).is_none()
        {
            bail!(
                "ui.role in {} must be one of admin, mla, staff, citizen; got {role:?}",
                path.display()
            );
        }

        if self.ui.page_size == Some(0) {
            bail!("ui.page_size in {} must be positive, got 0", path.display());
        }

        if let Some(theme) = &self.ui.theme
            && ThemeMode::parse(theme).is_none()
        {
            bail!(
                "ui.theme in {} must be light or dark; got {theme:?}",
                path.display()
            );
        }

        if let Some(level) = &self.log.level {
            parse_level(level).with_context(|| format!("invalid log.level in {}", path.display()))?;
        }

        Ok(())
    }

    pub fn state_dir(&self) -> Result<PathBuf> {
        civic_db::resolve_state_dir(self.storage.state_dir.as_deref().map(Path::new))
    }

    pub fn role(&self) -> Role {
        self.ui
            .role
            .as_deref()
            .and_then(Role::parse)
            .unwrap_or(Role::Admin)
    }

    pub fn page_size(&self) -> Option<usize> {
        self.ui.page_size
    }

    pub fn default_theme(&self) -> ThemeMode {
        self.ui
            .theme
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or(ThemeMode::Light)
    }

    pub fn log_level(&self) -> Result<Level> {
        parse_level(self.log.level.as_deref().unwrap_or("info"))
    }

    /// `[log].file` when set, otherwise `civic.log` inside the state directory.
    pub fn log_file(&self, state_dir: &Path) -> PathBuf {
        match &self.log.file {
            Some(file) => PathBuf::from(file),
            None => state_dir.join(DEFAULT_LOG_FILE),
        }
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# civic config\n# Place this file at: {}\n\nversion = {CONFIG_VERSION}\n\n[storage]\n# Optional. Default is the platform data dir (for example ~/.local/share/civic)\n# state_dir = \"/absolute/path/to/civic\"\n\n[ui]\n# admin, mla, staff, or citizen\nrole = \"admin\"\n# Optional. Overrides the per-screen page size\n# page_size = 10\n# light or dark; a saved toggle wins\ntheme = \"light\"\n\n[log]\n# error, warn, info, debug, or trace; RUST_LOG overrides\nlevel = \"info\"\n# Optional. Default is civic.log inside the state dir\n# file = \"/absolute/path/to/civic.log\"\n",
            path.display(),
        )
    }
}

fn parse_level(raw: &str) -> Result<Level> {
    raw.trim()
        .parse::<Level>()
        .map_err(|_| anyhow!("unknown log level {raw:?}; use error, warn, info, debug, or trace"))
}
