//! Global civicboard configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, BoardResult};
use crate::filter::SortKey;

static DEFAULT_DATA_DIR: &str = "~/civicboard";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_true() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

fn is_default_sort(sort: &SortKey) -> bool {
    *sort == SortKey::default()
}

/// Configuration at ~/.config/civicboard/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BoardConfig {
    /// Where the record collections are stored
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// Sort order for `list` when none is given
    #[serde(default, skip_serializing_if = "is_default_sort")]
    pub default_sort: SortKey,

    /// Add the sample events when the event collection is empty
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub seed_samples: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            data_dir: default_data_dir(),
            default_sort: SortKey::default(),
            seed_samples: true,
        }
    }
}

impl BoardConfig {
    pub fn config_path() -> BoardResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BoardError::Config("Could not determine config directory".into()))?
            .join("civicboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Write this config to `path`.
    pub fn save(&self, path: &Path) -> BoardResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| BoardError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| BoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BoardResult<()> {
        let contents = format!(
            "\
# civicboard configuration

# Where events and media are stored:
# data_dir = \"{}\"

# Sort order for listings (date-desc, date-asc, title-asc, title-desc):
# default_sort = \"date-desc\"

# Add sample events to an empty board:
# seed_samples = true
",
            DEFAULT_DATA_DIR
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BoardError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BoardError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
