/// Agent config generation
///
/// Turns a stored profile into prompts and workflow templates for the agent.
/// Output depends only on the profile, so regenerating never drifts.

use crate::error::Result;
use crate::store::{
    AgentConfig, AgentPreferences, CustomPrompt, Editor, Profile, ProfileStore, WorkflowTemplate,
};
use std::sync::Arc;

/// A git workflow template needs strictly more commands than this
const MIN_GIT_COMMANDS_FOR_TEMPLATE: usize = 3;

/// How many trailing git commands become template steps
const WORKFLOW_STEP_COUNT: usize = 3;

/// Config generator
pub struct ConfigGenerator {
    store: Arc<dyn ProfileStore>,
}

impl ConfigGenerator {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Generate the agent config for a user from their stored profile
    ///
    /// # Returns
    /// * `Err(OnboardError::ProfileNotFound)` - onboarding has not run for this user
    /// * `Err(OnboardError::CorruptProfile)` - the stored profile is unreadable
    pub fn generate(&self, user_id: &str) -> Result<AgentConfig> {
        let profile = self.store.read(user_id)?;
        Ok(Self::from_profile(&profile))
    }

    /// Pure projection of a profile into an agent config
    pub fn from_profile(profile: &Profile) -> AgentConfig {
        let prefs = &profile.preferences;

        AgentConfig {
            user_id: profile.user_id.clone(),
            agent_preferences: AgentPreferences {
                editor: prefs.preferred_editor,
                git_workflow: prefs.git_style,
                api_tool: prefs.api_tool,
            },
            suggested_tools: profile.tools.iter().cloned().collect(),
            custom_prompts: Self::custom_prompts(profile),
            workflow_templates: Self::workflow_templates(profile),
        }
    }

    fn custom_prompts(profile: &Profile) -> Vec<CustomPrompt> {
        let mut prompts = Vec::new();

        if profile.tools.contains("git") {
            prompts.push(CustomPrompt {
                trigger: "version_control".to_string(),
                prompt: format!(
                    "Use {} workflow for git operations",
                    profile.preferences.git_style
                ),
            });
        }

        if profile.preferences.preferred_editor != Editor::Unknown {
            prompts.push(CustomPrompt {
                trigger: "edit_file".to_string(),
                prompt: format!("Open files in {}", profile.preferences.preferred_editor),
            });
        }

        prompts
    }

    fn workflow_templates(profile: &Profile) -> Vec<WorkflowTemplate> {
        let git = &profile.patterns.git_workflow;

        if git.len() <= MIN_GIT_COMMANDS_FOR_TEMPLATE {
            return Vec::new();
        }

        // Last few git commands, oldest first
        let steps = git[git.len() - WORKFLOW_STEP_COUNT..].to_vec();

        vec![WorkflowTemplate {
            name: "user_git_workflow".to_string(),
            steps,
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OnboardError;
    use crate::store::{
        Category, CategorizedCommands, GitStyle, MemoryProfileStore, Preferences, ToolSet,
    };

    fn profile_with_git(count: usize) -> Profile {
        let mut patterns = CategorizedCommands::default();
        for i in 0..count {
            patterns.push(Category::GitWorkflow, format!("git commit -m {}", i));
        }

        Profile {
            user_id: "dev123".to_string(),
            command_count: count,
            patterns,
            preferences: Preferences::default(),
            tools: ToolSet::new(),
        }
    }

    #[test]
    fn test_template_with_four_git_commands() {
        let config = ConfigGenerator::from_profile(&profile_with_git(4));

        assert_eq!(config.workflow_templates.len(), 1);
        assert_eq!(config.workflow_templates[0].name, "user_git_workflow");
        assert_eq!(
            config.workflow_templates[0].steps,
            vec!["git commit -m 1", "git commit -m 2", "git commit -m 3"]
        );
    }

    #[test]
    fn test_no_template_with_three_git_commands() {
        let config = ConfigGenerator::from_profile(&profile_with_git(3));
        assert!(config.workflow_templates.is_empty());
    }

    #[test]
    fn test_prompts_in_order() {
        let mut profile = profile_with_git(1);
        profile.tools.insert("git".to_string());
        profile.tools.insert("vim".to_string());
        profile.preferences.preferred_editor = Editor::Vim;
        profile.preferences.git_style = GitStyle::GithubCli;

        let config = ConfigGenerator::from_profile(&profile);

        assert_eq!(config.custom_prompts.len(), 2);
        assert_eq!(config.custom_prompts[0].trigger, "version_control");
        assert_eq!(
            config.custom_prompts[0].prompt,
            "Use github_cli workflow for git operations"
        );
        assert_eq!(config.custom_prompts[1].trigger, "edit_file");
        assert_eq!(config.custom_prompts[1].prompt, "Open files in vim");
        assert_eq!(config.suggested_tools, vec!["git", "vim"]);
    }

    #[test]
    fn test_prompts_are_independent() {
        let mut profile = profile_with_git(0);
        profile.preferences.preferred_editor = Editor::Vscode;

        let config = ConfigGenerator::from_profile(&profile);
        assert_eq!(config.custom_prompts.len(), 1);
        assert_eq!(config.custom_prompts[0].trigger, "edit_file");

        let mut profile = profile_with_git(0);
        profile.tools.insert("git".to_string());

        let config = ConfigGenerator::from_profile(&profile);
        assert_eq!(config.custom_prompts.len(), 1);
        assert_eq!(
            config.custom_prompts[0].prompt,
            "Use unknown workflow for git operations"
        );
    }

    #[test]
    fn test_empty_profile() {
        let config = ConfigGenerator::from_profile(&profile_with_git(0));

        assert!(config.custom_prompts.is_empty());
        assert!(config.workflow_templates.is_empty());
        assert!(config.suggested_tools.is_empty());
        assert_eq!(config.agent_preferences.editor, Editor::Unknown);
    }

    #[test]
    fn test_generate_missing_profile() {
        let generator = ConfigGenerator::new(Arc::new(MemoryProfileStore::new()));

        match generator.generate("nobody") {
            Err(OnboardError::ProfileNotFound(id)) => assert_eq!(id, "nobody"),
            other => panic!("Expected ProfileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_is_idempotent() {
        let store = Arc::new(MemoryProfileStore::new());
        let mut profile = profile_with_git(5);
        profile.tools.insert("git".to_string());
        store.write("dev123", &profile).unwrap();

        let generator = ConfigGenerator::new(store);
        let first = serde_json::to_string(&generator.generate("dev123").unwrap()).unwrap();
        let second = serde_json::to_string(&generator.generate("dev123").unwrap()).unwrap();

        assert_eq!(first, second);
    }
}
