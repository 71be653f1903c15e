//! The board root: configuration plus access to the record collections.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::config::BoardConfig;
use crate::error::{BoardError, BoardResult};
use crate::event::Event;
use crate::media::Media;
use crate::store::{JsonFileStore, RecordStore, seed_sample_events};

#[derive(Clone)]
pub struct Board {
    config: BoardConfig,
}

impl Board {
    /// Load from ~/.config/civicboard/config.toml, creating a commented
    /// default file on first run. `CIVICBOARD_*` environment variables
    /// override file values (e.g. `CIVICBOARD_DATA_DIR`).
    pub fn load() -> BoardResult<Self> {
        let config_path = BoardConfig::config_path()?;

        if !config_path.exists() {
            BoardConfig::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> BoardResult<Self> {
        let config: BoardConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("CIVICBOARD"))
            .build()
            .map_err(|e| BoardError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BoardError::Config(e.to_string()))?;

        debug!(path = %config_path.display(), data_dir = %config.data_dir.display(), "loaded config");
        Ok(Board { config })
    }

    pub fn from_config(config: BoardConfig) -> Self {
        Board { config }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// The data directory in display-friendly form, keeping `~` unexpanded.
    pub fn display_path(&self) -> PathBuf {
        self.config.data_dir.clone()
    }

    /// The event collection. Seeds the sample events into an empty
    /// collection when `seed_samples` is on.
    pub fn events(&self) -> BoardResult<JsonFileStore<Event>> {
        let store = JsonFileStore::open(&self.data_path());
        if self.config.seed_samples && !store.path().exists() {
            seed_sample_events(&store)?;
        }
        Ok(store)
    }

    pub fn media(&self) -> JsonFileStore<Media> {
        JsonFileStore::open(&self.data_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_in(dir: &Path, seed_samples: bool) -> Board {
        Board::from_config(BoardConfig {
            data_dir: dir.to_path_buf(),
            seed_samples,
            ..Default::default()
        })
    }

    #[test]
    fn test_seeds_fresh_board_once() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(dir.path(), true);

        let events = board.events().unwrap();
        assert_eq!(events.list().unwrap().len(), 2);

        // Deleting everything must not bring the samples back
        for event in events.list().unwrap() {
            events.delete(&event.id).unwrap();
        }
        assert!(board.events().unwrap().list().unwrap().is_empty());
    }

    #[test]
    fn test_no_seed_when_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let board = board_in(dir.path(), false);
        assert!(board.events().unwrap().list().unwrap().is_empty());
        assert!(board.media().list().unwrap().is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = \"/tmp/board\"\ndefault_sort = \"date-asc\"\n").unwrap();

        let board = Board::load_from(&path).unwrap();
        assert_eq!(board.data_path(), PathBuf::from("/tmp/board"));
        assert_eq!(board.config().default_sort, crate::filter::SortKey::DateAsc);
        assert!(board.config().seed_samples);
    }

    #[test]
    fn test_tilde_expansion() {
        let board = Board::from_config(BoardConfig::default());
        assert_eq!(board.display_path(), PathBuf::from("~/civicboard"));
        assert!(!board.data_path().to_string_lossy().starts_with('~'));
    }
}
