use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{fs, path::PathBuf};

use crate::settings::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, SETTINGS_FILE};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    /// Base URL of the wedding frontend that invitation and album links
    /// point at.
    #[serde(rename = "frontendUrl")]
    pub frontend_url: Option<String>,
    /// Default monogram text, usually the couple's initials.
    #[serde(rename = "monogram")]
    pub monogram: Option<String>,
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

/// JSON settings file, either at an explicit path or in the platform config
/// directory:
///   - Windows:   %APPDATA%\<qualifier>\<org>\<app>\settings.json
///   - macOS:     ~/Library/Application Support/<app>/settings.json
///   - Linux:     ~/.config/<app>/settings.json
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;

        Ok(Self {
            path: project_dirs.config_dir().join(SETTINGS_FILE),
        })
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Ok(Settings::default()),
        };
        from_str(&content)
            .with_context(|| format!("Failed to deserialize settings: {}", self.path.display()))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(directory) = self.path.parent() {
            fs::create_dir_all(directory).with_context(|| {
                format!("Failed to create settings directory: {}", directory.display())
            })?;
        }
        fs::write(&self.path, to_string_pretty(settings)?)
            .with_context(|| format!("Failed to persist settings file: {}", self.path.display()))
    }
}
