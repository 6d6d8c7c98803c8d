//! JSON-file profile store.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use bastion_core::constants::PROFILE_SCHEMA_VERSION;
use bastion_core::error::ProfileError;
use bastion_core::profile::PlayerProfile;
use bastion_sim::ProfileStore;

/// Stores the profile as pretty-printed JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&mut self) -> Result<Option<PlayerProfile>, ProfileError> {
        if !self.path.exists() {
            debug!("no profile at {}", self.path.display());
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;
        let profile: PlayerProfile = serde_json::from_str(&json)?;
        if profile.schema_version > PROFILE_SCHEMA_VERSION {
            warn!(
                "profile schema {} is newer than {}, loading known fields only",
                profile.schema_version, PROFILE_SCHEMA_VERSION
            );
        }
        Ok(Some(profile))
    }

    fn save(&mut self, profile: &PlayerProfile) -> Result<(), ProfileError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(profile)?;
        // Write then rename so a crash never leaves a truncated profile.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bastion_core::enums::AchievementId;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join("bastion_profile_tests").join(name)
    }

    #[test]
    fn missing_file_loads_none() {
        let mut store = FileProfileStore::new(temp_path("missing/profile.json"));
        let _ = fs::remove_dir_all(temp_path("missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_and_load_file() {
        let dir = temp_path("save_load");
        let _ = fs::remove_dir_all(&dir);
        let mut store = FileProfileStore::new(dir.join("profile.json"));

        let mut profile = PlayerProfile::default();
        profile.lifetime.total_kills = 42;
        profile.unlocked_achievements.push(AchievementId::FirstBlood);
        store.save(&profile).unwrap();
        assert!(store.path().exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.lifetime.total_kills, 42);
        assert_eq!(loaded.unlocked_achievements, vec![AchievementId::FirstBlood]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_is_format_error() {
        let dir = temp_path("corrupt");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileProfileStore::new(path);
        assert!(matches!(store.load(), Err(ProfileError::Format(_))));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = temp_path("partial");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("profile.json");
        fs::write(&path, r#"{"lifetime": {"total_kills": 7}}"#).unwrap();

        let loaded = FileProfileStore::new(path).load().unwrap().unwrap();
        assert_eq!(loaded.lifetime.total_kills, 7);
        assert!(loaded.unlocked_achievements.is_empty());

        let _ = fs::remove_dir_all(&dir);
    }
}
