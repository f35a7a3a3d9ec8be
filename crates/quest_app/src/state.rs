use std::path::Path;

use quest_core::JobStatus;
use quest_engine::StateFile;
use quest_logging::{quest_error, quest_info, quest_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".search_quest_state.ron";

/// What a later run needs to resume where this one stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersistedState {
    pub pc_cursor: usize,
    pub mobile_cursor: usize,
    #[serde(default)]
    pub last_run_utc: Option<String>,
    #[serde(default)]
    pub last_status: Option<JobStatus>,
}

fn state_file(state_dir: &Path) -> StateFile {
    StateFile::new(state_dir, STATE_FILENAME)
}

/// Missing or unreadable state means starting from scratch.
pub fn load_state(state_dir: &Path) -> PersistedState {
    let file = state_file(state_dir);
    let content = match file.load() {
        Ok(Some(text)) => text,
        Ok(None) => return PersistedState::default(),
        Err(err) => {
            quest_warn!("Failed to read saved state from {:?}: {}", file.path(), err);
            return PersistedState::default();
        }
    };

    match ron::from_str(&content) {
        Ok(state) => {
            quest_info!("Loaded saved state from {:?}", file.path());
            state
        }
        Err(err) => {
            quest_warn!("Failed to parse saved state from {:?}: {}", file.path(), err);
            PersistedState::default()
        }
    }
}

pub fn save_state(state_dir: &Path, state: &PersistedState) {
    let file = state_file(state_dir);
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(state, pretty) {
        Ok(text) => text,
        Err(err) => {
            quest_error!("Failed to serialize state: {}", err);
            return;
        }
    };

    if let Err(err) = file.store(&content) {
        quest_error!("Failed to write state to {:?}: {}", file.path(), err);
    }
}
