/// Data models for profiles and agent configs
///
/// Everything here is plain serde data. Field order matches the JSON
/// documents written to disk and handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One line of a history transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub raw_text: String,
    pub extracted_command: String,
}

impl CommandRecord {
    /// Build a record from a normalized transcript line.
    ///
    /// A leading `"<timestamp>  "` is stripped from the command; any other
    /// line keeps its full text, double spaces included.
    /// Returns `None` for blank lines.
    pub fn from_line(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let extracted_command = match line.split_once("  ") {
            Some((prefix, command)) if looks_like_timestamp(prefix) => command.to_string(),
            _ => line.to_string(),
        };

        Some(Self {
            raw_text: line.to_string(),
            extracted_command,
        })
    }
}

// Dates and times only: "2024-01-01 10:00", "1704103200", "01/02/24 9:15:00.5"
fn looks_like_timestamp(prefix: &str) -> bool {
    prefix.chars().any(|c| c.is_ascii_digit())
        && prefix
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | '/' | '.' | ' ' | 'T'))
}

/// Closed set of command categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    GitWorkflow,
    DevTools,
    ApiUsage,
    FileOps,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::GitWorkflow,
        Category::DevTools,
        Category::ApiUsage,
        Category::FileOps,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::GitWorkflow => "git_workflow",
            Category::DevTools => "dev_tools",
            Category::ApiUsage => "api_usage",
            Category::FileOps => "file_ops",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classified commands, one ordered list per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizedCommands {
    pub git_workflow: Vec<String>,
    pub dev_tools: Vec<String>,
    pub api_usage: Vec<String>,
    pub file_ops: Vec<String>,
}

impl CategorizedCommands {
    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::GitWorkflow => &self.git_workflow,
            Category::DevTools => &self.dev_tools,
            Category::ApiUsage => &self.api_usage,
            Category::FileOps => &self.file_ops,
        }
    }

    pub fn push(&mut self, category: Category, command: String) {
        let bucket = match category {
            Category::GitWorkflow => &mut self.git_workflow,
            Category::DevTools => &mut self.dev_tools,
            Category::ApiUsage => &mut self.api_usage,
            Category::FileOps => &mut self.file_ops,
        };
        bucket.push(command);
    }

    /// Total number of classified commands across all categories
    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.get(*c).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All classified commands, category by category
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        Category::ALL.into_iter().flat_map(move |c| self.get(c).iter())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Editor {
    Vscode,
    Vim,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GitStyle {
    GithubCli,
    CommandLine,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiTool {
    Curl,
    Httpie,
    #[default]
    Unknown,
}

/// Declared in the profile shape but no rule populates it yet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellStyle {
    #[default]
    Unknown,
}

impl fmt::Display for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Editor::Vscode => "vscode",
            Editor::Vim => "vim",
            Editor::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for GitStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            GitStyle::GithubCli => "github_cli",
            GitStyle::CommandLine => "command_line",
            GitStyle::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ApiTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApiTool::Curl => "curl",
            ApiTool::Httpie => "httpie",
            ApiTool::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}

/// Inferred user preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub preferred_editor: Editor,
    pub git_style: GitStyle,
    pub api_tool: ApiTool,
    pub shell_style: ShellStyle,
}

/// Recognized developer tools, kept sorted
pub type ToolSet = BTreeSet<String>;

/// Usage profile built from one onboarding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: String,
    pub command_count: usize,
    pub patterns: CategorizedCommands,
    pub preferences: Preferences,
    pub tools: ToolSet,
}

/// Preference projection exposed to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentPreferences {
    pub editor: Editor,
    pub git_workflow: GitStyle,
    pub api_tool: ApiTool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomPrompt {
    pub trigger: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub name: String,
    pub steps: Vec<String>,
}

/// Agent configuration derived from a stored profile. Never edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    pub user_id: String,
    pub agent_preferences: AgentPreferences,
    pub suggested_tools: Vec<String>,
    pub custom_prompts: Vec<CustomPrompt>,
    pub workflow_templates: Vec<WorkflowTemplate>,
}
