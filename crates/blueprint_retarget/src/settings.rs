use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::LOG_TARGET;

/// Editor preferences for the retarget tool, stored as TOML in the user's
/// config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetargetSettings {
    /// Whether the class picker expands its default class list. The picker
    /// prompt collapses it for the duration of a retarget and restores the
    /// user's value afterwards.
    pub expand_class_picker_default_list: bool,
    /// Ids of warnings the user chose not to see again.
    pub suppressed_warnings: Vec<String>,
}

impl Default for RetargetSettings {
    fn default() -> Self {
        Self {
            expand_class_picker_default_list: true,
            suppressed_warnings: Vec::new(),
        }
    }
}

impl RetargetSettings {
    /// Load settings from the given path, or return default if not found or
    /// invalid.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to the given path, creating parent directories if
    /// needed.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml = toml::to_string_pretty(self).expect("Failed to serialize settings");
        fs::write(path, toml)
    }

    /// Default config file path in the user's app data directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "BlueprintTools", "BlueprintRetarget")
            .map(|proj| proj.config_dir().join("retarget.toml"))
    }
}

/// Shared settings store. Mutations persist immediately when the store is
/// backed by a file.
pub struct SettingsStore {
    inner: Mutex<RetargetSettings>,
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// In-memory store for hosts that persist preferences elsewhere.
    pub fn in_memory() -> Self {
        Self::with_settings(RetargetSettings::default())
    }

    pub fn with_settings(settings: RetargetSettings) -> Self {
        Self {
            inner: Mutex::new(settings),
            path: None,
        }
    }

    /// Store backed by a settings file, loading whatever is there now.
    pub fn at_path(path: PathBuf) -> Self {
        Self {
            inner: Mutex::new(RetargetSettings::load(&path)),
            path: Some(path),
        }
    }

    pub fn is_warning_suppressed(&self, warning_id: &str) -> bool {
        self.inner
            .lock()
            .suppressed_warnings
            .iter()
            .any(|id| id == warning_id)
    }

    pub fn suppress_warning(&self, warning_id: &str) {
        let mut settings = self.inner.lock();
        if !settings.suppressed_warnings.iter().any(|id| id == warning_id) {
            settings.suppressed_warnings.push(warning_id.to_string());
            self.persist(&settings);
        }
    }

    pub fn expand_class_picker_default_list(&self) -> bool {
        self.inner.lock().expand_class_picker_default_list
    }

    pub fn set_expand_class_picker_default_list(&self, value: bool) {
        let mut settings = self.inner.lock();
        if settings.expand_class_picker_default_list != value {
            settings.expand_class_picker_default_list = value;
            self.persist(&settings);
        }
    }

    pub fn snapshot(&self) -> RetargetSettings {
        self.inner.lock().clone()
    }

    fn persist(&self, settings: &RetargetSettings) {
        if let Some(path) = &self.path {
            if let Err(e) = settings.save(path) {
                tracing::warn!(target: LOG_TARGET, "Failed to write retarget settings: {e}");
            }
        }
    }
}
