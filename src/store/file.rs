/// Filesystem profile store
///
/// Writes one pretty-printed JSON document per user at
/// `<profiles_dir>/<user_id>/profile.json`.

use crate::error::{OnboardError, Result};
use crate::store::{validate_user_id, Profile, ProfileStore};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROFILE_FILENAME: &str = "profile.json";

/// Profile store rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    root: PathBuf,
}

impl FileProfileStore {
    /// Create a store rooted at `root`
    ///
    /// Nothing is created until the first write.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of a user's profile document
    pub fn profile_path(&self, user_id: &str) -> Result<PathBuf> {
        validate_user_id(user_id)?;
        Ok(self.root.join(user_id).join(PROFILE_FILENAME))
    }
}

impl ProfileStore for FileProfileStore {
    fn read(&self, user_id: &str) -> Result<Profile> {
        let path = self.profile_path(user_id)?;

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(OnboardError::ProfileNotFound(user_id.to_string()));
            }
            Err(e) => return Err(OnboardError::Io(e)),
        };

        serde_json::from_str(&data).map_err(|source| OnboardError::CorruptProfile {
            user_id: user_id.to_string(),
            source,
        })
    }

    fn write(&self, user_id: &str, profile: &Profile) -> Result<()> {
        let path = self.profile_path(user_id)?;

        // Create the user directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_string_pretty(profile)?;
        fs::write(&path, data)?;

        debug!(user_id, path = %path.display(), "profile written");
        Ok(())
    }
}
