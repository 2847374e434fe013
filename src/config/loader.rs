use std::path::{Path, PathBuf};

use crate::error::Result;

use super::Config;
use super::model::validate_config;

pub const CONFIG_FILE_NAME: &str = ".audit-guard.toml";

/// Trait for loading configuration from various sources.
pub trait ConfigLoader {
    /// Load configuration from the default search locations.
    ///
    /// # Errors
    /// Returns an error if a found config file cannot be read or parsed.
    fn load(&self) -> Result<Config>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn load_from_path(&self, path: &Path) -> Result<Config>;
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    fn current_dir(&self) -> std::io::Result<PathBuf>;

    /// Platform config directory for audit-guard (XDG and friends).
    fn config_dir(&self) -> Option<PathBuf>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn config_dir(&self) -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "audit-guard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Loads `.audit-guard.toml` from the working directory or any ancestor,
/// falling back to the per-user config directory, then to defaults.
pub struct FileConfigLoader<FS: FileSystem = RealFileSystem> {
    fs: FS,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fs: RealFileSystem,
        }
    }
}

impl Default for FileConfigLoader<RealFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<FS: FileSystem> FileConfigLoader<FS> {
    pub const fn with_fs(fs: FS) -> Self {
        Self { fs }
    }

    fn find_config_file(&self) -> Option<PathBuf> {
        let mut dir = self.fs.current_dir().ok()?;
        loop {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }

        let user_config = self.fs.config_dir()?.join("config.toml");
        self.fs.exists(&user_config).then_some(user_config)
    }

    fn parse(&self, path: &Path) -> Result<Config> {
        let content = self.fs.read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        validate_config(&config)?;
        Ok(config)
    }
}

impl<FS: FileSystem> ConfigLoader for FileConfigLoader<FS> {
    fn load(&self) -> Result<Config> {
        self.find_config_file()
            .map_or_else(|| Ok(Config::default()), |path| self.parse(&path))
    }

    fn load_from_path(&self, path: &Path) -> Result<Config> {
        self.parse(path)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
