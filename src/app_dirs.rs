use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "keycadence";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    /// Preferences file, or a file in the working directory when no home is known
    pub fn config_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(format!("{APP_NAME}_config.json")))
    }

    /// Log file under `$HOME/.local/state`, or the platform's local data dir
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join(format!("{APP_NAME}.log")))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join(format!("{APP_NAME}.log")))
        }
    }
}
