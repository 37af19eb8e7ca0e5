use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::core::Theme;

/// Store key holding the best score as a decimal string.
pub const HIGH_SCORE_KEY: &str = "blockfit_highscore";

/// Store key holding the theme name (`"light"` or `"dark"`).
pub const THEME_KEY: &str = "blockfit_theme";

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum StoreError {
    #[display("failed to access preference file {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[display("malformed preference file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// String key-value storage that outlives a game.
pub trait KeyValueStore: fmt::Debug {
    /// Returns the stored value, or `None` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Store that lives only as long as the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// The file is read on every access and rewritten on every write. A missing
/// file reads as an empty store; parent directories are created on first write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(&entries).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))
    }
}

/// Best-effort persistence of the high score and theme.
///
/// Storage failures never reach the game: reads fall back to defaults and
/// failed writes are logged and dropped.
#[derive(Debug)]
pub struct Preferences {
    store: Box<dyn KeyValueStore>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl Preferences {
    pub fn new<S>(store: S) -> Self
    where
        S: KeyValueStore + 'static,
    {
        Self {
            store: Box::new(store),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("failed to read preference {key}: {e}");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            log::warn!("failed to save preference {key}: {e}");
        }
    }

    /// Returns the stored high score, or 0 when it is missing or unreadable.
    #[must_use]
    pub fn load_high_score(&self) -> usize {
        let Some(value) = self.read(HIGH_SCORE_KEY) else {
            return 0;
        };
        value.trim().parse().unwrap_or_else(|e| {
            log::warn!("ignoring invalid stored high score {value:?}: {e}");
            0
        })
    }

    pub fn save_high_score(&mut self, score: usize) {
        self.write(HIGH_SCORE_KEY, &score.to_string());
    }

    /// Returns the stored theme, or the default theme when it is missing or unknown.
    #[must_use]
    pub fn load_theme(&self) -> Theme {
        let Some(value) = self.read(THEME_KEY) else {
            return Theme::default();
        };
        value.parse().unwrap_or_else(|_| {
            log::warn!("ignoring unknown stored theme {value:?}");
            Theme::default()
        })
    }

    pub fn save_theme(&mut self, theme: Theme) {
        self.write(THEME_KEY, &theme.to_string());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::env;

    use super::*;

    /// Store whose every access fails.
    #[derive(Debug)]
    pub(crate) struct BrokenStore;

    impl BrokenStore {
        fn error() -> StoreError {
            StoreError::Io {
                path: PathBuf::from("/nonexistent/prefs.json"),
                source: io::Error::other("storage unavailable"),
            }
        }
    }

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(Self::error())
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(Self::error())
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir()
            .join(format!("blockfit-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let prefs = Preferences::in_memory();
        assert_eq!(prefs.load_high_score(), 0);
        assert_eq!(prefs.load_theme(), Theme::Light);
    }

    #[test]
    fn test_values_round_trip_through_store() {
        let mut prefs = Preferences::in_memory();
        prefs.save_high_score(420);
        prefs.save_theme(Theme::Dark);
        assert_eq!(prefs.load_high_score(), 420);
        assert_eq!(prefs.load_theme(), Theme::Dark);
    }

    #[test]
    fn test_store_key_names() {
        let mut prefs = Preferences::in_memory();
        prefs.save_high_score(9);
        prefs.save_theme(Theme::Dark);
        assert_eq!(
            prefs.store.get("blockfit_highscore").unwrap().as_deref(),
            Some("9")
        );
        assert_eq!(
            prefs.store.get("blockfit_theme").unwrap().as_deref(),
            Some("dark")
        );
        assert_eq!(prefs.store.get("blockflow_highscore").unwrap(), None);
    }

    #[test]
    fn test_values_are_stored_as_strings() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "77").unwrap();
        store.set(THEME_KEY, "dark").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_high_score(), 77);
        assert_eq!(prefs.load_theme(), Theme::Dark);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let mut store = MemoryStore::new();
        store.set(HIGH_SCORE_KEY, "lots").unwrap();
        store.set(THEME_KEY, "sepia").unwrap();
        let prefs = Preferences::new(store);
        assert_eq!(prefs.load_high_score(), 0);
        assert_eq!(prefs.load_theme(), Theme::Light);
    }

    #[test]
    fn test_broken_store_is_silent() {
        let mut prefs = Preferences::new(BrokenStore);
        prefs.save_high_score(10);
        prefs.save_theme(Theme::Dark);
        assert_eq!(prefs.load_high_score(), 0);
        assert_eq!(prefs.load_theme(), Theme::Light);
    }

    #[test]
    fn test_json_file_store() {
        let path = temp_path("file-store/prefs.json");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);

        store.set(HIGH_SCORE_KEY, "123").unwrap();
        store.set(THEME_KEY, "dark").unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get(HIGH_SCORE_KEY).unwrap().as_deref(), Some("123"));
        assert_eq!(reopened.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_json_file_store_rejects_malformed_file() {
        let path = temp_path("malformed/prefs.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.get(THEME_KEY).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));

        // Preferences treat the unreadable file as empty.
        assert_eq!(Preferences::new(store).load_theme(), Theme::Light);
        fs::remove_file(&path).unwrap();
    }
}
