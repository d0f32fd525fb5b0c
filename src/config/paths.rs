//! Where the annotator keeps its settings.
//!
//! `TEXT_ANNOTATOR_CONFIG_DIR` overrides the platform default, which the
//! `dirs` crate resolves to:
//!
//!   Windows: %APPDATA%\text-annotator\
//!   macOS:   ~/Library/Application Support/text-annotator/
//!   Linux:   ~/.config/text-annotator/

use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration directory.
pub const CONFIG_DIR_ENV: &str = "TEXT_ANNOTATOR_CONFIG_DIR";

const APP_NAME: &str = "text-annotator";
const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
}

impl AppPaths {
    /// Resolve from `TEXT_ANNOTATOR_CONFIG_DIR`, else the platform config
    /// dir, else the current directory.
    pub fn new() -> Self {
        let explicit = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::resolve(explicit, dirs::config_dir())
    }

    /// Paths rooted at `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let config_dir = dir.into();
        let settings_file = config_dir.join(SETTINGS_FILE);
        Self {
            config_dir,
            settings_file,
        }
    }

    fn resolve(explicit: Option<PathBuf>, platform: Option<PathBuf>) -> Self {
        match explicit {
            Some(dir) => Self::in_dir(dir),
            None => Self::in_dir(platform.unwrap_or_else(|| PathBuf::from(".")).join(APP_NAME)),
        }
    }

    /// Create `config_dir` if it does not exist yet.
    pub fn ensure_config_dir(&self) -> std::io::Result<&Path> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(&self.config_dir)
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_dir_gets_app_subdirectory() {
        let paths = AppPaths::resolve(None, Some(PathBuf::from("/home/u/.config")));
        assert_eq!(paths.config_dir, PathBuf::from("/home/u/.config/text-annotator"));
        assert_eq!(
            paths.settings_file,
            PathBuf::from("/home/u/.config/text-annotator/settings.toml")
        );
    }

    #[test]
    fn explicit_dir_is_used_as_is() {
        let paths = AppPaths::resolve(
            Some(PathBuf::from("/tmp/annotator")),
            Some(PathBuf::from("/home/u/.config")),
        );
        assert_eq!(paths, AppPaths::in_dir("/tmp/annotator"));
        assert!(paths.settings_file.starts_with(&paths.config_dir));
    }

    #[test]
    fn missing_platform_dir_falls_back_to_cwd() {
        let paths = AppPaths::resolve(None, None);
        assert_eq!(paths.config_dir, PathBuf::from("./text-annotator"));
    }

    #[test]
    fn ensure_config_dir_creates_nested_dirs() {
        let tmp = tempfile::tempdir().expect("temp dir");
        let paths = AppPaths::in_dir(tmp.path().join("a").join("b"));

        let dir = paths.ensure_config_dir().expect("create");
        assert!(dir.is_dir());
        // Idempotent.
        paths.ensure_config_dir().expect("second create");
    }
}
