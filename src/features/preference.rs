//! User preferences
//!
//! [`Preference`] names the slots; [`Preferences`] is the JSON file backed
//! key-value store behind them.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sort::{SortAlbumOption, SortArtistOption, SortSongOption};

/// Preference key registry
pub struct Preference;

impl Preference {
    pub const LANGUAGE: &'static str = "language";
    pub const UI_MODE: &'static str = "ui_mode";
    pub const SORT_SONG_OPTION: &'static str = "sort_song_option";
    pub const SORT_ALBUM_OPTION: &'static str = "sort_album_option";
    pub const SORT_ARTIST_OPTION: &'static str = "sort_artist_option";

    /// Every registered key
    pub const ALL: [&'static str; 5] = [
        Self::LANGUAGE,
        Self::UI_MODE,
        Self::SORT_SONG_OPTION,
        Self::SORT_ALBUM_OPTION,
        Self::SORT_ARTIST_OPTION,
    ];
}

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Indonesian,
}

impl Language {
    /// Get language display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Indonesian => "Bahasa Indonesia",
        }
    }

    /// Get language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Indonesian => "in",
        }
    }

    /// All available languages
    pub fn all() -> &'static [Language] {
        &[Language::English, Language::Indonesian]
    }
}

/// Light/dark appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UiMode {
    Light,
    Dark,
    /// Follow the platform setting
    #[default]
    System,
}

/// Errors that can occur with preferences
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Key-value preference store persisted as a flat JSON object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Preferences {
    values: BTreeMap<String, Value>,
}

impl Preferences {
    /// Get the preferences file path
    pub fn file_path() -> PathBuf {
        crate::utils::config_dir().join("preferences.json")
    }

    /// Load preferences from file, or return defaults if missing or corrupt
    pub fn load() -> Self {
        let path = Self::file_path();
        match Self::load_from_file(&path) {
            Ok(prefs) => prefs,
            Err(PreferenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring preferences at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load preferences from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, PreferenceError> {
        let content = std::fs::read_to_string(path)?;
        let values = serde_json::from_str(&content)?;
        Ok(Self { values })
    }

    /// Save preferences to the default file
    pub fn save(&self) -> Result<(), PreferenceError> {
        self.save_to_file(&Self::file_path())
    }

    /// Save preferences to a specific file
    pub fn save_to_file(&self, path: &Path) -> Result<(), PreferenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Read a slot, `None` when unset or holding an incompatible value
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.values.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Preference '{}' has unexpected value: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), PreferenceError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> bool {
        self.values.remove(key).is_some()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn language(&self) -> Language {
        self.get(Preference::LANGUAGE).unwrap_or_default()
    }

    pub fn set_language(&mut self, language: Language) -> Result<(), PreferenceError> {
        self.set(Preference::LANGUAGE, language)
    }

    pub fn ui_mode(&self) -> UiMode {
        self.get(Preference::UI_MODE).unwrap_or_default()
    }

    pub fn set_ui_mode(&mut self, mode: UiMode) -> Result<(), PreferenceError> {
        self.set(Preference::UI_MODE, mode)
    }

    pub fn sort_song_option(&self) -> SortSongOption {
        self.get(Preference::SORT_SONG_OPTION).unwrap_or_default()
    }

    pub fn set_sort_song_option(&mut self, option: SortSongOption) -> Result<(), PreferenceError> {
        self.set(Preference::SORT_SONG_OPTION, option)
    }

    pub fn sort_album_option(&self) -> SortAlbumOption {
        self.get(Preference::SORT_ALBUM_OPTION).unwrap_or_default()
    }

    pub fn set_sort_album_option(
        &mut self,
        option: SortAlbumOption,
    ) -> Result<(), PreferenceError> {
        self.set(Preference::SORT_ALBUM_OPTION, option)
    }

    pub fn sort_artist_option(&self) -> SortArtistOption {
        self.get(Preference::SORT_ARTIST_OPTION).unwrap_or_default()
    }

    pub fn set_sort_artist_option(
        &mut self,
        option: SortArtistOption,
    ) -> Result<(), PreferenceError> {
        self.set(Preference::SORT_ARTIST_OPTION, option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sort::SortType;

    #[test]
    fn keys_are_stable() {
        assert_eq!(Preference::LANGUAGE, "language");
        assert_eq!(Preference::UI_MODE, "ui_mode");
        assert_eq!(Preference::SORT_SONG_OPTION, "sort_song_option");
        assert_eq!(Preference::SORT_ALBUM_OPTION, "sort_album_option");
        assert_eq!(Preference::SORT_ARTIST_OPTION, "sort_artist_option");
    }

    #[test]
    fn sort_types_map_to_their_keys() {
        let keys: Vec<_> = SortType::all().iter().map(|t| t.preference_key()).collect();
        assert_eq!(keys, &Preference::ALL[2..]);
    }

    #[test]
    fn unset_slots_fall_back_to_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language(), Language::English);
        assert_eq!(prefs.ui_mode(), UiMode::System);
        assert_eq!(prefs.sort_song_option(), SortSongOption::SongName);
    }

    #[test]
    fn wrong_type_reads_as_default() {
        let mut prefs = Preferences::default();
        prefs.set(Preference::UI_MODE, 12).unwrap();
        assert_eq!(prefs.ui_mode(), UiMode::System);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut prefs = Preferences::default();
        prefs.set_language(Language::Indonesian).unwrap();
        prefs.set_ui_mode(UiMode::Dark).unwrap();
        prefs.set_sort_album_option(SortAlbumOption::Artist).unwrap();
        prefs.save_to_file(&path).unwrap();

        let loaded = Preferences::load_from_file(&path).unwrap();
        assert_eq!(loaded, prefs);
        assert_eq!(loaded.language(), Language::Indonesian);
        assert_eq!(loaded.sort_album_option(), SortAlbumOption::Artist);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["ui_mode"], "dark");
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Preferences::load_from_file(&path),
            Err(PreferenceError::Parse(_))
        ));
    }
}
