/// history-onboard library
///
/// Learns a usage profile from shell history and generates agent configs from it.

pub mod config;
pub mod error;
pub mod history;
pub mod intelligence;
pub mod logger;
pub mod store;

// Re-exports for convenience
pub use config::Settings;
pub use error::{OnboardError, Result};
pub use intelligence::{ConfigGenerator, OnboardResponse, Onboarder};
pub use store::{FileProfileStore, MemoryProfileStore, ProfileStore};
