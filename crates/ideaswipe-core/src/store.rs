//! Client-local persistence: stats and favorites, each written in full on
//! every change.
//!
//! The two files load independently. A file that fails to parse is renamed to
//! `<file>.corrupt` and that part alone starts from its default, so the next
//! save never overwrites data that could not be read.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::{FavoriteEntry, Stats};

const STATS_FILE: &str = "stats.json";
const FAVORITES_FILE: &str = "favorites.json";
const CORRUPT_SUFFIX: &str = "corrupt";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt data in {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the client keeps between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Persisted {
    pub stats: Stats,
    pub favorites: Vec<FavoriteEntry>,
}

/// Storage port for the client. Loaded once at startup, saved after each mutation.
pub trait ClientStore {
    fn load(&self) -> Result<Persisted, StoreError>;
    fn save(&self, data: &Persisted) -> Result<(), StoreError>;
}

impl<T: ClientStore + ?Sized> ClientStore for std::sync::Arc<T> {
    fn load(&self) -> Result<Persisted, StoreError> {
        (**self).load()
    }

    fn save(&self, data: &Persisted) -> Result<(), StoreError> {
        (**self).save(data)
    }
}

/// JSON files in a directory (defaults to ~/.ideaswipe/).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_data_dir() -> Self {
        Self::new(crate::data_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_or_default<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T, StoreError> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(T::default());
        }
        let raw = fs::read_to_string(&path).map_err(io_err(&path))?;
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(source) => {
                let aside = path.with_extension(format!("json.{CORRUPT_SUFFIX}"));
                fs::rename(&path, &aside).map_err(io_err(&aside))?;
                warn!(
                    "Corrupt data in {}: {source}; moved to {} and starting from defaults",
                    path.display(),
                    aside.display()
                );
                Ok(T::default())
            }
        }
    }

    /// Atomic write (temp file + rename) so a crash never leaves a truncated file.
    fn write<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let path = self.dir.join(file);
        let tmp = self.dir.join(format!(".{file}.tmp"));
        let json = serde_json::to_string_pretty(value).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;
        fs::write(&tmp, json).map_err(io_err(&tmp))?;
        fs::rename(&tmp, &path).map_err(io_err(&path))
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

impl ClientStore for FileStore {
    fn load(&self) -> Result<Persisted, StoreError> {
        Ok(Persisted {
            stats: self.read_or_default(STATS_FILE)?,
            favorites: self.read_or_default(FAVORITES_FILE)?,
        })
    }

    fn save(&self, data: &Persisted) -> Result<(), StoreError> {
        self.write(STATS_FILE, &data.stats)?;
        self.write(FAVORITES_FILE, &data.favorites)
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Persisted>,
    saves: Mutex<usize>,
}

impl MemoryStore {
    pub fn new(initial: Persisted) -> Self {
        Self {
            data: Mutex::new(initial),
            saves: Mutex::new(0),
        }
    }

    pub fn snapshot(&self) -> Persisted {
        self.data.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of `save` calls so far.
    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ClientStore for MemoryStore {
    fn load(&self) -> Result<Persisted, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, data: &Persisted) -> Result<(), StoreError> {
        *self.data.lock().unwrap_or_else(|e| e.into_inner()) = data.clone();
        *self.saves.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
