/// Onboarding pipeline
///
/// Runs ingestion, classification, preference inference and tool detection,
/// stores the resulting profile, then derives the agent config from what was
/// stored. Everything happens synchronously in the calling thread.

use crate::config::Settings;
use crate::error::Result;
use crate::history::{HistoryIngestor, ShellDetector};
use crate::intelligence::{ConfigGenerator, PatternClassifier, PreferenceInferencer, ToolDetector};
use crate::store::{
    validate_user_id, AgentConfig, CommandRecord, FileProfileStore, Profile, ProfileStore,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Main onboarding orchestrator
pub struct Onboarder {
    store: Arc<dyn ProfileStore>,
    ingestor: HistoryIngestor,
    classifier: PatternClassifier,
    config_generator: ConfigGenerator,
    history_path: Option<PathBuf>,
}

impl Onboarder {
    /// Create an onboarder writing to the given store
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        let config_generator = ConfigGenerator::new(Arc::clone(&store));

        Self {
            store,
            ingestor: HistoryIngestor::new(),
            classifier: PatternClassifier::new(),
            config_generator,
            history_path: None,
        }
    }

    /// Build an onboarder from resolved settings, backed by the file store
    pub fn from_settings(settings: &Settings) -> Self {
        let store = Arc::new(FileProfileStore::new(&settings.profiles_dir));

        let mut onboarder = Self::new(store)
            .with_ingestor(HistoryIngestor::new().with_lossy_utf8(settings.lossy_utf8));
        onboarder.history_path = settings.history_file.clone();
        onboarder
    }

    pub fn with_ingestor(mut self, ingestor: HistoryIngestor) -> Self {
        self.ingestor = ingestor;
        self
    }

    /// Transcript to read when the caller doesn't pass one
    pub fn with_history_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.history_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Onboard a user from their default history transcript
    ///
    /// Never fails: errors come back as [`OnboardResponse::Failed`].
    pub fn onboard(&self, user_id: &str) -> OnboardResponse {
        let path = match &self.history_path {
            Some(path) => Ok(path.clone()),
            None => ShellDetector::default_history_path(),
        };

        match path {
            Ok(path) => self.onboard_from(user_id, &path),
            Err(e) => Self::failed(user_id, e),
        }
    }

    /// Onboard a user from an explicit transcript
    pub fn onboard_from(&self, user_id: &str, history_path: &Path) -> OnboardResponse {
        match self.try_onboard(user_id, history_path) {
            Ok(report) => OnboardResponse::Onboarded(report),
            Err(e) => Self::failed(user_id, e),
        }
    }

    /// Run the full pipeline, returning errors instead of an error record
    pub fn try_onboard(&self, user_id: &str, history_path: &Path) -> Result<OnboardReport> {
        validate_user_id(user_id)?;

        let records = self.ingestor.ingest(history_path)?;
        let profile = self.build_profile(user_id, &records);

        self.store.write(user_id, &profile)?;
        let agent_config = self.config_generator.generate(user_id)?;

        info!(
            user_id,
            commands = profile.command_count,
            classified = profile.patterns.len(),
            tools = profile.tools.len(),
            "user onboarded"
        );

        Ok(OnboardReport {
            status: OnboardStatus::Onboarded,
            user_id: user_id.to_string(),
            message: format!("Learned from {} commands", profile.command_count),
            profile,
            agent_config,
        })
    }

    /// Assemble a profile from ingested records without touching storage
    pub fn build_profile(&self, user_id: &str, records: &[CommandRecord]) -> Profile {
        let (patterns, unclassified) = self.classifier.partition(records);
        let preferences = PreferenceInferencer::infer_with_unclassified(&patterns, &unclassified);
        let tools = ToolDetector::detect(records);

        Profile {
            user_id: user_id.to_string(),
            command_count: records.len(),
            patterns,
            preferences,
            tools,
        }
    }

    /// Regenerate the agent config from the stored profile
    pub fn generate_config(&self, user_id: &str) -> Result<AgentConfig> {
        validate_user_id(user_id)?;
        self.config_generator.generate(user_id)
    }

    /// Load the stored profile
    pub fn profile(&self, user_id: &str) -> Result<Profile> {
        validate_user_id(user_id)?;
        self.store.read(user_id)
    }

    fn failed(user_id: &str, e: crate::error::OnboardError) -> OnboardResponse {
        warn!(user_id, kind = e.kind(), error = %e, "onboarding failed");
        OnboardResponse::Failed(ErrorRecord::from(&e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardStatus {
    Onboarded,
}

/// Successful onboarding result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardReport {
    pub status: OnboardStatus,
    pub user_id: String,
    pub profile: Profile,
    pub agent_config: AgentConfig,
    pub message: String,
}

/// Structured error handed back instead of a raised error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
    pub kind: String,
}

impl From<&crate::error::OnboardError> for ErrorRecord {
    fn from(e: &crate::error::OnboardError) -> Self {
        Self {
            error: e.user_message(),
            kind: e.kind().to_string(),
        }
    }
}

/// What the entry point returns to its caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OnboardResponse {
    Onboarded(OnboardReport),
    Failed(ErrorRecord),
}

impl OnboardResponse {
    pub fn is_onboarded(&self) -> bool {
        matches!(self, OnboardResponse::Onboarded(_))
    }
}
