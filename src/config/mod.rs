use std::path::PathBuf;

use crate::errors::GoreadResult;

/// Environment variable naming an explicit catalog file.
pub const URLS_PATH_VAR: &str = "GOREAD_URLS_PATH";

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Explicit catalog location. `None` means the platform default.
    pub urls_path: Option<PathBuf>,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> GoreadResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let urls_path = std::env::var_os(URLS_PATH_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);

        Ok(Self { urls_path })
    }

    /// A command-line path takes precedence over the environment.
    pub fn with_override(mut self, urls_path: Option<PathBuf>) -> Self {
        if let Some(path) = urls_path.filter(|p| !p.as_os_str().is_empty()) {
            self.urls_path = Some(path);
        }
        self
    }
}
