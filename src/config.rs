use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "mystery.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory of `level_*.toml` files replacing the built-in rooms.
    pub catalog_dir: Option<PathBuf>,
    pub clue_dir: PathBuf,
    pub base_url: String,
    pub environment: String,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            catalog_dir: None,
            clue_dir: PathBuf::from("public/clues"),
            base_url: "https://mystery-exe.vercel.app".to_string(),
            environment: "development".to_string(),
            log_file: PathBuf::from("mystery-exe.log"),
        }
    }
}

impl Config {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(path, &content)
    }

    /// Load `path` if given, else `mystery.toml` if present, else defaults.
    /// An explicitly named file must exist.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Where the clue image for a room's `/clues/<code>.jpg` path lives on disk.
    pub fn clue_path(&self, clue_image: &str) -> PathBuf {
        let file = clue_image.rsplit('/').next().unwrap_or(clue_image);
        self.clue_dir.join(file)
    }
}
