//! On-disk persistence for the command line host.
//!
//! The CLI keeps one resource's [`LocalState`] in a JSON file between
//! invocations and reads the desired configuration from another.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use xconnect_common::{DesiredConfig, LocalState};

/// Errors reading or writing the state and desired-config files.
#[derive(Debug, Error)]
pub enum StateFileError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StateFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }

    fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.display().to_string(),
            source,
        }
    }
}

/// JSON file holding the local state of one port.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads state, returning empty state if the file does not exist.
    pub fn load(&self) -> Result<LocalState, StateFileError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| StateFileError::json(&self.path, e))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No state file at {}", self.path.display());
                Ok(LocalState::new())
            }
            Err(e) => Err(StateFileError::io(&self.path, e)),
        }
    }

    /// Writes state as pretty-printed JSON.
    pub fn save(&self, state: &LocalState) -> Result<(), StateFileError> {
        let content =
            serde_json::to_string_pretty(state).map_err(|e| StateFileError::json(&self.path, e))?;
        fs::write(&self.path, content).map_err(|e| StateFileError::io(&self.path, e))?;
        info!("Saved port state to {}", self.path.display());
        Ok(())
    }

    /// Removes the file. A missing file is not an error.
    pub fn remove(&self) -> Result<(), StateFileError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed port state {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StateFileError::io(&self.path, e)),
        }
    }
}

/// Reads a desired configuration from a JSON file.
pub fn read_desired(path: impl AsRef<Path>) -> Result<DesiredConfig, StateFileError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| StateFileError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| StateFileError::json(path, e))
}
