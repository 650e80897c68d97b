/// Profile storage
///
/// Profiles are persisted per user behind the [`ProfileStore`] trait so the
/// pipeline can run against the filesystem or an in-memory double.

pub mod file;
pub mod memory;
pub mod models;

pub use file::FileProfileStore;
pub use memory::MemoryProfileStore;
pub use models::*;

use crate::error::{OnboardError, Result};

/// Per-user profile persistence
///
/// Implementations keep each user's profile isolated. There is no locking:
/// concurrent writes for the same user resolve as last writer wins.
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile.
    ///
    /// # Returns
    /// * `Err(OnboardError::ProfileNotFound)` - nothing stored for this user
    /// * `Err(OnboardError::CorruptProfile)` - stored data does not parse
    fn read(&self, user_id: &str) -> Result<Profile>;

    /// Store a profile, replacing any previous one for the user
    fn write(&self, user_id: &str, profile: &Profile) -> Result<()>;
}

/// Check that a user id can key its own storage location
///
/// Rejects empty ids and anything that could leave the user's directory.
pub fn validate_user_id(user_id: &str) -> Result<()> {
    let trimmed = user_id.trim();
    let escapes = trimmed == "."
        || trimmed == ".."
        || user_id.contains('/')
        || user_id.contains('\\')
        || user_id.contains('\0');

    if trimmed.is_empty() || escapes {
        return Err(OnboardError::InvalidUserId(user_id.to_string()));
    }

    Ok(())
}
