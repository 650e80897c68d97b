/// Preference inference
///
/// Each preference has its own ordered rule list. The first rule whose
/// predicate holds sets the value; if none does, the preference stays
/// `unknown`. Rules never see commands outside the classification window.

use crate::store::{
    ApiTool, CategorizedCommands, Editor, GitStyle, Preferences, ShellStyle,
};

/// More git commands than this (without `gh`) means plain command-line git
const COMMAND_LINE_GIT_THRESHOLD: usize = 5;

/// What the rules get to look at
pub struct InferenceContext<'a> {
    pub patterns: &'a CategorizedCommands,
    /// Every classified command joined by single spaces, in category order
    pub text: String,
    /// Windowed commands no category took, joined the same way
    pub unclassified: String,
}

impl<'a> InferenceContext<'a> {
    pub fn new(patterns: &'a CategorizedCommands) -> Self {
        Self::with_unclassified(patterns, &[])
    }

    pub fn with_unclassified(patterns: &'a CategorizedCommands, unclassified: &[String]) -> Self {
        let text = patterns
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            patterns,
            text,
            unclassified: unclassified.join(" "),
        }
    }

    /// Search the classified commands only
    pub fn mentions_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.text.contains(n))
    }

    /// Search the classified commands and the unclassified ones
    pub fn window_mentions_any(&self, needles: &[&str]) -> bool {
        self.mentions_any(needles) || needles.iter().any(|n| self.unclassified.contains(n))
    }
}

/// A candidate value and the predicate that selects it
pub struct PreferenceRule<T> {
    pub value: T,
    pub matches: fn(&InferenceContext<'_>) -> bool,
}

// Editors are usually launched by commands no category takes
fn mentions_vscode(ctx: &InferenceContext<'_>) -> bool {
    ctx.window_mentions_any(&["code", "vscode"])
}

fn mentions_vim(ctx: &InferenceContext<'_>) -> bool {
    ctx.window_mentions_any(&["vim", "nvim"])
}

fn uses_github_cli(ctx: &InferenceContext<'_>) -> bool {
    ctx.mentions_any(&["gh "])
}

fn uses_plain_git(ctx: &InferenceContext<'_>) -> bool {
    ctx.patterns.git_workflow.len() > COMMAND_LINE_GIT_THRESHOLD
}

fn mentions_curl(ctx: &InferenceContext<'_>) -> bool {
    ctx.mentions_any(&["curl"])
}

fn mentions_http(ctx: &InferenceContext<'_>) -> bool {
    ctx.mentions_any(&["http"])
}

pub const EDITOR_RULES: &[PreferenceRule<Editor>] = &[
    PreferenceRule {
        value: Editor::Vscode,
        matches: mentions_vscode,
    },
    PreferenceRule {
        value: Editor::Vim,
        matches: mentions_vim,
    },
];

pub const GIT_STYLE_RULES: &[PreferenceRule<GitStyle>] = &[
    PreferenceRule {
        value: GitStyle::GithubCli,
        matches: uses_github_cli,
    },
    PreferenceRule {
        value: GitStyle::CommandLine,
        matches: uses_plain_git,
    },
];

pub const API_TOOL_RULES: &[PreferenceRule<ApiTool>] = &[
    PreferenceRule {
        value: ApiTool::Curl,
        matches: mentions_curl,
    },
    PreferenceRule {
        value: ApiTool::Httpie,
        matches: mentions_http,
    },
];

// Nothing sets shell_style yet
pub const SHELL_STYLE_RULES: &[PreferenceRule<ShellStyle>] = &[];

/// Value of the first matching rule, or the type's `unknown` default
pub fn first_match<T: Copy + Default>(rules: &[PreferenceRule<T>], ctx: &InferenceContext<'_>) -> T {
    rules
        .iter()
        .find(|rule| (rule.matches)(ctx))
        .map(|rule| rule.value)
        .unwrap_or_default()
}

/// Infers preferences from classified commands
pub struct PreferenceInferencer;

impl PreferenceInferencer {
    pub fn infer(patterns: &CategorizedCommands) -> Preferences {
        Self::infer_from(&InferenceContext::new(patterns))
    }

    /// Like [`infer`](Self::infer), with the window's unmatched commands
    /// visible to the editor rules. Git and API rules ignore them.
    pub fn infer_with_unclassified(
        patterns: &CategorizedCommands,
        unclassified: &[String],
    ) -> Preferences {
        Self::infer_from(&InferenceContext::with_unclassified(patterns, unclassified))
    }

    fn infer_from(ctx: &InferenceContext<'_>) -> Preferences {
        Preferences {
            preferred_editor: first_match(EDITOR_RULES, ctx),
            git_style: first_match(GIT_STYLE_RULES, ctx),
            api_tool: first_match(API_TOOL_RULES, ctx),
            shell_style: first_match(SHELL_STYLE_RULES, ctx),
        }
    }
}
