use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use super::i18n::Language;

const LANGUAGE_KEY: &str = "language";
const THEME_KEY: &str = "theme";

/// Flat string key/value store persisted as JSON, the terminal counterpart of
/// a browser's local storage.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocalStore {
    entries: BTreeMap<String, String>,
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl LocalStore {
    /// An in-memory store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn load_or_create() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("tui-news-portal");

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).with_context(|| {
                format!("Failed to create config directory {}", config_dir.display())
            })?;
            info!(config_dir = %config_dir.display(), "Created config directory for local store");
        }

        Self::load_from(config_dir.join("local_storage.json"))
    }

    pub fn load_from(file_path: PathBuf) -> Result<Self> {
        match file_path.exists() {
            true => {
                let content =
                    fs::read_to_string(&file_path).context("Failed to read local store file")?;
                let mut store: LocalStore =
                    serde_json::from_str(&content).context("Failed to parse local store file")?;
                info!(file = %file_path.display(), entries = store.entries.len(), "Loaded local store");
                store.file_path = Some(file_path);
                Ok(store)
            }
            false => {
                info!(file = %file_path.display(), "No local store file found, starting empty");
                Ok(Self {
                    entries: BTreeMap::new(),
                    file_path: Some(file_path),
                })
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.file_path {
            let content =
                serde_json::to_string_pretty(self).context("Failed to serialize local store")?;
            fs::write(path, content).context("Failed to write local store file")?;
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Language and theme choices, backed by a [`LocalStore`].
#[derive(Debug, Clone)]
pub struct Preferences {
    store: LocalStore,
}

impl Preferences {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Load from the user's config directory, falling back to an in-memory
    /// store when that fails.
    pub fn load() -> Self {
        match LocalStore::load_or_create() {
            Ok(store) => Self::new(store),
            Err(e) => {
                tracing::error!("Failed to load local store, preferences will not persist: {e:#}");
                Self::new(LocalStore::in_memory())
            }
        }
    }

    pub fn language(&self) -> Language {
        self.store
            .get(LANGUAGE_KEY)
            .and_then(Language::from_code)
            .unwrap_or_default()
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(Theme::from_name)
            .unwrap_or_default()
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.store.set(LANGUAGE_KEY, language.code());
        self.store.save()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str());
        self.store.save()
    }
}
