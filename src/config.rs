use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Runtime settings, merged from defaults, the global config file, a local
/// `.spellint.toml`, and CLI overrides, in that order.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub generic_dictionary: PathBuf,
    pub project_dictionary: PathBuf,
    pub report_file: PathBuf,
    pub ignore_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generic_dictionary: PathBuf::from("data/dictionaries/generic_dictionary.txt"),
            project_dictionary: PathBuf::from("data/dictionaries/project_dictionary.txt"),
            report_file: PathBuf::from("spelling_errors.txt"),
            ignore_dirs: [
                ".git",
                "__pycache__",
                ".venv",
                "venv",
                "env",
                "node_modules",
                "data",
                "logs",
                "output",
                "build",
                "dist",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            ignore_files: Vec::new(),
            max_suggestions: 5,
        }
    }
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global
    /// config > defaults.
    pub fn load(
        generic_dict: Option<PathBuf>,
        project_dict: Option<PathBuf>,
        report_file: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global_config = Self::from_file(&global_path)?;
                config = config.merge(global_config);
            }
        }

        let local_path = PathBuf::from(".spellint.toml");
        if local_path.exists() {
            let local_config = Self::from_file(&local_path)?;
            config = config.merge(local_config);
        }

        if let Some(path) = generic_dict {
            config.generic_dictionary = path;
        }
        if let Some(path) = project_dict {
            config.project_dictionary = path;
        }
        if let Some(path) = report_file {
            config.report_file = path;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Field-wise merge: `other` wins wherever it differs from the defaults.
    fn merge(mut self, other: Self) -> Self {
        let defaults = Self::default();

        if other.generic_dictionary != defaults.generic_dictionary {
            self.generic_dictionary = other.generic_dictionary;
        }
        if other.project_dictionary != defaults.project_dictionary {
            self.project_dictionary = other.project_dictionary;
        }
        if other.report_file != defaults.report_file {
            self.report_file = other.report_file;
        }
        if other.ignore_dirs != defaults.ignore_dirs {
            self.ignore_dirs = other.ignore_dirs;
        }
        if !other.ignore_files.is_empty() {
            self.ignore_files = other.ignore_files;
        }
        if other.max_suggestions != defaults.max_suggestions {
            self.max_suggestions = other.max_suggestions;
        }

        self
    }

    /// Files skipped by exact name during the walk: the report file itself
    /// plus any configured extras.
    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.report_file.file_name().and_then(|n| n.to_str()) == Some(name)
            || self.ignore_files.iter().any(|f| f == name)
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spellint").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
