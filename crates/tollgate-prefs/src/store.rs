use crate::models::Prefs;
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to resolve the local data directory")]
    DataDir,
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only view of the preference file.
///
/// Every query re-reads the file, so edits made by the settings app are
/// picked up on the next blocking decision.
#[derive(Debug, Clone)]
pub struct PrefStore {
    path: PathBuf,
}

impl PrefStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store at its default location under the platform data dir.
    ///
    /// # Errors
    ///
    /// Returns an error if the local data directory cannot be determined.
    pub fn open_default() -> Result<Self, PrefsError> {
        let mut path = dirs::data_local_dir().ok_or(PrefsError::DataDir)?;
        path.push("tollgate");
        path.push("prefs.json");
        Ok(Self { path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the preference file. A missing file is not an error and yields
    /// the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Prefs, PrefsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                return Ok(Prefs::default());
            }
            Err(source) => {
                return Err(PrefsError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| PrefsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Load, falling back to the defaults on any error.
    #[must_use]
    pub fn load_or_default(&self) -> Prefs {
        match self.load() {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("using default preferences: {e}");
                Prefs::default()
            }
        }
    }

    /// Current blocklist, re-read from disk.
    #[must_use]
    pub fn blocklist(&self) -> HashSet<String> {
        self.load_or_default().blocked_packages
    }

    /// Current task list, re-read from disk.
    #[must_use]
    pub fn tasks(&self) -> Vec<String> {
        self.load_or_default().tasks
    }

    /// Current countdown duration in seconds, re-read from disk.
    #[must_use]
    pub fn duration_secs(&self) -> u32 {
        self.load_or_default().duration_secs
    }
}
