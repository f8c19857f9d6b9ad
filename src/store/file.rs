use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

use super::{AvailabilityState, StateStore};

/// Keeps the state as a pretty-printed JSON file, the same format as an export.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn load(&self) -> Result<Option<AvailabilityState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let state = AvailabilityState::from_json(&json)?;
        debug!(path = %self.path.display(), you = state.you.len(), them = state.them.len(), "loaded state");
        Ok(Some(state))
    }

    fn save(&self, state: &AvailabilityState) -> Result<()> {
        fs::write(&self.path, state.to_json_pretty()?)?;
        debug!(path = %self.path.display(), "saved state");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
