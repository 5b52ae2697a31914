use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::CatalogCache;
use crate::error::Result;
use crate::models::{MealCandidate, PlannerState};

/// Load planner state from a JSON file.
pub fn load_state<P: AsRef<Path>>(path: P) -> Result<PlannerState> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save planner state to a JSON file.
pub fn save_state<P: AsRef<Path>>(path: P, state: &PlannerState) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

/// Candidate-pool cache backed by a single JSON file.
///
/// Both directions are best effort: an unreadable cache behaves as absent and
/// a failed write leaves the previous snapshot in place.
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Drop the cached pool so the next lookup rebuilds it.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

impl CatalogCache for FileCache {
    fn get(&self) -> Option<Vec<MealCandidate>> {
        let content = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn put(&self, candidates: &[MealCandidate]) {
        match serde_json::to_string_pretty(candidates) {
            Ok(json) => {
                if let Err(err) = fs::write(&self.path, json) {
                    debug!(%err, "candidate cache write failed");
                }
            }
            Err(err) => debug!(%err, "candidate cache serialization failed"),
        }
    }
}
