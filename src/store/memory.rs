/// In-memory profile store
///
/// Same contract as the file store, without touching disk.

use crate::error::{OnboardError, Result};
use crate::store::{validate_user_id, Profile, ProfileStore};
use std::collections::HashMap;
use std::sync::RwLock;

/// Profile store backed by a `HashMap`
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with a stored profile
    pub fn len(&self) -> usize {
        self.profiles.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ProfileStore for MemoryProfileStore {
    fn read(&self, user_id: &str) -> Result<Profile> {
        validate_user_id(user_id)?;

        let profiles = self.profiles.read().unwrap_or_else(|e| e.into_inner());

        profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| OnboardError::ProfileNotFound(user_id.to_string()))
    }

    fn write(&self, user_id: &str, profile: &Profile) -> Result<()> {
        validate_user_id(user_id)?;

        let mut profiles = self.profiles.write().unwrap_or_else(|e| e.into_inner());

        profiles.insert(user_id.to_string(), profile.clone());
        Ok(())
    }
}
