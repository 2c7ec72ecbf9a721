use crate::consts;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A minimal durable string-to-string store
pub(crate) trait KeyValueStore: fmt::Debug {
    /// Return the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, LoadError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError>;
}

/// A [`KeyValueStore`] kept as a JSON object in a file on disk.  The file is
/// read afresh on every access, and a missing file is treated as empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(path: PathBuf) -> JsonFileStore {
        JsonFileStore { path }
    }

    fn read(&self) -> Result<BTreeMap<String, String>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.read()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        // An unreadable store is replaced rather than left blocking every save
        let mut entries = self.read().unwrap_or_default();
        entries.insert(key.to_owned(), value);
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// A [`KeyValueStore`] that only lasts as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(BTreeMap<String, String>);

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Forwarding impl so that the application can choose a store at runtime
impl KeyValueStore for Box<dyn KeyValueStore> {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), SaveError> {
        (**self).set(key, value)
    }
}

/// The best score ever achieved, backed by a [`KeyValueStore`].
///
/// The value is read once, when the `BestScore` is created, and written back
/// only when a game ends with a higher score.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BestScore<S> {
    store: S,
    best: u32,
}

impl<S: KeyValueStore> BestScore<S> {
    /// Read the best score from `store`.  A missing or malformed value, or a
    /// store that can't be read, counts as zero.
    pub(crate) fn load(store: S) -> BestScore<S> {
        let best = match store.get(consts::BEST_SCORE_KEY) {
            Ok(Some(s)) => s.trim().parse::<u32>().unwrap_or_else(|_| {
                warn!("Ignoring invalid stored best score {s:?}");
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!("{:?}", anyhow::Error::new(e));
                0
            }
        };
        BestScore { store, best }
    }

    pub(crate) fn get(&self) -> u32 {
        self.best
    }

    /// Record the final score of a game.  If it beats the best score, the best
    /// score is updated and saved, and `true` is returned.
    ///
    /// A failure to save is logged; the new best is still kept in memory.
    pub(crate) fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        info!("New best score: {score} (previously {})", self.best);
        self.best = score;
        if let Err(e) = self.store.set(consts::BEST_SCORE_KEY, score.to_string()) {
            warn!("{:?}", anyhow::Error::new(e));
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn store(&self) -> &S {
        &self.store
    }
}

#[derive(Debug, Error)]
#[error("Failed to save best score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize store")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read best score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read store file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize store")]
    Deserialize(#[source] serde_json::Error),
}
