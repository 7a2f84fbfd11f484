//! Optional JSON configuration file.
//!
//! Every field is optional. Values found in the file serve as defaults that
//! explicit command-line flags override.
//!
//! ```json
//! {
//!   "extensions": [".rs", ".toml"],
//!   "ignore_patterns": ["target/*"],
//!   "format": "markdown",
//!   "tree": true
//! }
//! ```

use crate::error::{FilesToPromptError, Result};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub include_hidden: Option<bool>,
    pub include_binary: Option<bool>,
    pub ignore_patterns: Option<Vec<String>>,
    pub ignore_files_only: Option<bool>,
    pub ignore_gitignore: Option<bool>,
    pub concurrency: Option<usize>,
    pub tree: Option<bool>,
    pub format: Option<OutputFormat>,
    pub line_numbers: Option<bool>,
}
impl FileConfig {
    /// Overlays every value set in `other` onto `self`.
    pub fn merge(&mut self, other: FileConfig) {
        if other.extensions.is_some() {
            self.extensions = other.extensions;
        }
        if other.include_hidden.is_some() {
            self.include_hidden = other.include_hidden;
        }
        if other.include_binary.is_some() {
            self.include_binary = other.include_binary;
        }
        if other.ignore_patterns.is_some() {
            self.ignore_patterns = other.ignore_patterns;
        }
        if other.ignore_files_only.is_some() {
            self.ignore_files_only = other.ignore_files_only;
        }
        if other.ignore_gitignore.is_some() {
            self.ignore_gitignore = other.ignore_gitignore;
        }
        if other.concurrency.is_some() {
            self.concurrency = other.concurrency;
        }
        if other.tree.is_some() {
            self.tree = other.tree;
        }
        if other.format.is_some() {
            self.format = other.format;
        }
        if other.line_numbers.is_some() {
            self.line_numbers = other.line_numbers;
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| FilesToPromptError::Config(e.to_string()))
    }

    /// Reads the config at `path`; it must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| FilesToPromptError::io(path, e))?;
        Self::parse(&text).map_err(|e| match e {
            FilesToPromptError::Config(msg) => {
                FilesToPromptError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Reads the default config file if there is one.
    pub fn load_default() -> Result<Self> {
        let Some(path) = default_path() else {
            return Ok(Self::default());
        };
        match fs::metadata(&path) {
            Ok(_) => Self::load(&path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file at {}", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(FilesToPromptError::io(path, e)),
        }
    }
}

/// `<config dir>/files-to-prompt/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("files-to-prompt").join("config.json"))
}
