use crate::app_dirs::AppDirs;
use crate::store::SessionConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Stored user preferences: the session configuration used when no flags
/// override it
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Preferences {
    #[serde(default)]
    pub session: SessionConfig,
}

impl From<&SessionConfig> for Preferences {
    fn from(config: &SessionConfig) -> Self {
        Self { session: *config }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Preferences;
    fn save(&self, prefs: &Preferences) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    /// Missing or unreadable files fall back to defaults
    fn load(&self) -> Preferences {
        let Ok(bytes) = fs::read(&self.path) else {
            return Preferences::default();
        };
        serde_json::from_slice::<Preferences>(&bytes).unwrap_or_else(|e| {
            log::warn!("ignoring invalid preferences {}: {e}", self.path.display());
            Preferences::default()
        })
    }

    fn save(&self, prefs: &Preferences) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(prefs)?;
        fs::write(&self.path, data)
    }
}
