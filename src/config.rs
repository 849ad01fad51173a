// File: ./src/config.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const TASK_FILE_ENV: &str = "TODOER_TASK_FILE";
pub const DEFAULT_TASK_FILE: &str = "task.txt";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub task_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let task_file = Self::project_dirs()
            .map(|proj| proj.data_dir().join(DEFAULT_TASK_FILE))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TASK_FILE));
        Self { task_file }
    }
}

impl Config {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "todoer", "todoer")
    }

    pub fn get_path() -> Option<PathBuf> {
        Self::project_dirs().map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Default config, overlaid by `config.toml` if present, then by the
    /// `TODOER_TASK_FILE` environment variable.
    pub fn load() -> Result<Self> {
        let mut config = match Self::get_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Ok(file) = env::var(TASK_FILE_ENV)
            && !file.trim().is_empty()
        {
            config.task_file = PathBuf::from(file);
        }
        Ok(config)
    }

    /// Parses a TOML config. A relative `task_file` is taken relative to the
    /// directory holding the config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let mut config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        if config.task_file.is_relative()
            && let Some(dir) = path.parent()
        {
            config.task_file = dir.join(&config.task_file);
        }
        tracing::debug!(config = %path.display(), task_file = %config.task_file.display(), "loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_from_file_resolves_relative_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "task_file = \"lists/mine.txt\"\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.task_file, dir.path().join("lists/mine.txt"));
    }

    #[test]
    fn test_from_file_keeps_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let target = dir.path().join("abs.txt");
        fs::write(&path, format!("task_file = {:?}\n", target.display().to_string())).unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.task_file, target);
    }

    #[test]
    fn test_empty_file_uses_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(config.task_file.ends_with(DEFAULT_TASK_FILE));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "task_file = [").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}
