// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use civic_table::Tone;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Storage key the active mode is persisted under.
pub const THEME_STORAGE_KEY: &str = "civic-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Named colors the host screens draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTokens {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub border: Rgb,
    pub selection: Rgb,
    pub info: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
    pub danger: Rgb,
}

impl ThemeTokens {
    pub const fn tone(&self, tone: Tone) -> Rgb {
        match tone {
            Tone::Neutral => self.muted,
            Tone::Info => self.info,
            Tone::Success => self.success,
            Tone::Warning => self.warning,
            Tone::Danger => self.danger,
        }
    }
}

const LIGHT: ThemeTokens = ThemeTokens {
    background: Rgb(250, 250, 247),
    surface: Rgb(238, 240, 236),
    text: Rgb(28, 32, 36),
    muted: Rgb(104, 112, 118),
    accent: Rgb(0, 102, 153),
    border: Rgb(196, 202, 206),
    selection: Rgb(214, 232, 245),
    info: Rgb(0, 110, 180),
    success: Rgb(19, 128, 60),
    warning: Rgb(176, 104, 0),
    danger: Rgb(190, 30, 45),
};

const DARK: ThemeTokens = ThemeTokens {
    background: Rgb(18, 20, 24),
    surface: Rgb(30, 34, 40),
    text: Rgb(228, 230, 232),
    muted: Rgb(140, 148, 156),
    accent: Rgb(255, 153, 51),
    border: Rgb(62, 68, 76),
    selection: Rgb(48, 58, 72),
    info: Rgb(100, 180, 255),
    success: Rgb(92, 200, 120),
    warning: Rgb(240, 180, 60),
    danger: Rgb(255, 100, 100),
};

/// Tokens are always derived from the mode; only the mode is stored.
pub const fn tokens_for(mode: ThemeMode) -> ThemeTokens {
    match mode {
        ThemeMode::Light => LIGHT,
        ThemeMode::Dark => DARK,
    }
}

/// Persisted shape: `{"mode":"dark"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedTheme {
    pub mode: ThemeMode,
}

/// Active theme handed to the render root. Starts on the configured default
/// and flips `hydrated` once the persisted mode has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStore {
    mode: ThemeMode,
    tokens: ThemeTokens,
    hydrated: bool,
}

impl ThemeStore {
    pub fn new(default_mode: ThemeMode) -> Self {
        Self {
            mode: default_mode,
            tokens: tokens_for(default_mode),
            hydrated: false,
        }
    }

    /// Applies the persisted mode, if any. Later calls are ignored.
    pub fn hydrate(&mut self, persisted: Option<PersistedTheme>) {
        if self.hydrated {
            return;
        }
        if let Some(persisted) = persisted {
            self.apply(persisted.mode);
        }
        self.hydrated = true;
    }

    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn tokens(&self) -> &ThemeTokens {
        &self.tokens
    }

    /// Flips the mode and returns what should be persisted.
    pub fn toggle(&mut self) -> PersistedTheme {
        self.apply(self.mode.toggled());
        info!(mode = self.mode.as_str(), "theme toggled");
        PersistedTheme { mode: self.mode }
    }

    fn apply(&mut self, mode: ThemeMode) {
        self.mode = mode;
        self.tokens = tokens_for(mode);
    }
}
