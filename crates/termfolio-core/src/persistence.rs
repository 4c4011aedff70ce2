use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing::warn;

use crate::profile::Roster;

pub const STATE_FILE: &str = "state.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub active_profile: String,
    pub selected_profile: String,
}

impl PersistedState {
    pub fn for_profile(profile_id: &str) -> Self {
        Self {
            active_profile: profile_id.to_string(),
            selected_profile: profile_id.to_string(),
        }
    }
}

/// Remembers which profile was active between runs.
///
/// Reads and writes never fail loudly: a broken store only costs the user
/// their last selection.
#[derive(Debug)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn open(dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(STATE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> std::io::Result<Option<PersistedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&self.path)?;
        let state = serde_json::from_slice::<PersistedState>(&bytes)
            .map_err(|err| std::io::Error::other(format!("parse state: {err}")))?;
        Ok(Some(state))
    }

    pub fn write(&self, state: &PersistedState) -> std::io::Result<()> {
        let encoded = serde_json::to_vec_pretty(state)
            .map_err(|err| std::io::Error::other(format!("serialize state: {err}")))?;
        std::fs::write(&self.path, encoded)
    }

    /// Profile to start with: the stored one when it still exists in the
    /// roster, otherwise the roster default.
    pub fn load_active_profile(&self, roster: &Roster) -> String {
        let fallback = roster.default_profile().id.clone();
        match self.read() {
            Ok(Some(state)) if roster.contains(&state.active_profile) => state.active_profile,
            Ok(Some(state)) => {
                warn!(profile = %state.active_profile, "stored profile no longer exists");
                fallback
            }
            Ok(None) => fallback,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable state");
                fallback
            }
        }
    }

    pub fn save_active_profile(&self, profile_id: &str) {
        if let Err(err) = self.write(&PersistedState::for_profile(profile_id)) {
            warn!(path = %self.path.display(), error = %err, "could not save state");
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::profile::profile;

    fn roster() -> Roster {
        Roster::new(vec![profile("ann"), profile("bob")]).expect("roster")
    }

    #[test]
    fn saved_profile_is_restored() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::open(dir.path()).expect("open");
        store.save_active_profile("bob");

        let reopened = StateStore::open(dir.path()).expect("reopen");
        assert_eq!(reopened.load_active_profile(&roster()), "bob");
        assert_eq!(
            reopened.read().expect("read"),
            Some(PersistedState::for_profile("bob"))
        );
    }

    #[test]
    fn file_holds_exactly_two_keys() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::open(dir.path()).expect("open");
        store.save_active_profile("ann");

        let raw = std::fs::read_to_string(store.path()).expect("state file");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["active_profile", "selected_profile"]);
    }

    #[test]
    fn missing_corrupt_or_stale_state_falls_back_to_default() {
        let dir = tempdir().expect("tempdir");
        let store = StateStore::open(dir.path().join("nested")).expect("open");
        assert_eq!(store.load_active_profile(&roster()), "ann");

        std::fs::write(store.path(), b"{not json").expect("write");
        assert_eq!(store.load_active_profile(&roster()), "ann");

        store.save_active_profile("carol");
        assert_eq!(store.load_active_profile(&roster()), "ann");
    }
}
