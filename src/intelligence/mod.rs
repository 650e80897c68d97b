/// Intelligence module
///
/// Turns command history into a usage profile and an agent config.

pub mod classifier;
pub mod config_generator;
pub mod onboarder;
pub mod preferences;
pub mod tool_detector;

pub use classifier::{ClassificationRule, PatternClassifier, CLASSIFICATION_WINDOW};
pub use config_generator::ConfigGenerator;
pub use onboarder::{ErrorRecord, OnboardReport, OnboardResponse, OnboardStatus, Onboarder};
pub use preferences::{InferenceContext, PreferenceInferencer, PreferenceRule};
pub use tool_detector::{ToolDetector, KNOWN_TOOLS};
