// Buckets recent commands into categories
//
// Rules are checked in order and the first one that matches wins, so a
// "git" command never also shows up as file_ops. Matching is plain
// substring search: "rapidjson" counts as api_usage. Known and kept.

use crate::store::{CategorizedCommands, Category, CommandRecord};

// Only the most recent commands say anything about how someone works today
pub const CLASSIFICATION_WINDOW: usize = 100;

const API_MARKERS: &[&str] = &["curl", "http", "api"];
const DEV_TOOL_MARKERS: &[&str] = &["python", "node", "npm", "cargo"];
const FILE_OP_MARKERS: &[&str] = &["cd", "ls", "mkdir", "cp", "mv"];

/// A single classification rule: a label plus the predicate that earns it
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub category: Category,
    pub matches: fn(&str) -> bool,
}

impl ClassificationRule {
    pub fn applies(&self, command: &str) -> bool {
        (self.matches)(command)
    }
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("category", &self.category)
            .finish()
    }
}

fn contains_any(command: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| command.contains(m))
}

/// Text after the first two-space gap, or the whole line without one
pub fn command_text(raw: &str) -> &str {
    raw.split_once("  ").map_or(raw, |(_, command)| command)
}

fn is_git(command: &str) -> bool {
    command.starts_with("git")
}

fn is_api(command: &str) -> bool {
    contains_any(command, API_MARKERS)
}

fn is_dev_tool(command: &str) -> bool {
    contains_any(command, DEV_TOOL_MARKERS)
}

fn is_file_op(command: &str) -> bool {
    contains_any(command, FILE_OP_MARKERS)
}

/// Evaluated top to bottom
pub const DEFAULT_RULES: [ClassificationRule; 4] = [
    ClassificationRule {
        category: Category::GitWorkflow,
        matches: is_git,
    },
    ClassificationRule {
        category: Category::ApiUsage,
        matches: is_api,
    },
    ClassificationRule {
        category: Category::DevTools,
        matches: is_dev_tool,
    },
    ClassificationRule {
        category: Category::FileOps,
        matches: is_file_op,
    },
];

pub struct PatternClassifier {
    rules: Vec<ClassificationRule>,
}

impl PatternClassifier {
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Use a custom rule list, evaluated in the order given
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    // Main function - sorts the last CLASSIFICATION_WINDOW commands into buckets
    pub fn classify(&self, records: &[CommandRecord]) -> CategorizedCommands {
        self.partition(records).0
    }

    /// Like [`classify`](Self::classify), also returning the windowed
    /// commands no rule matched, in order
    pub fn partition(&self, records: &[CommandRecord]) -> (CategorizedCommands, Vec<String>) {
        let mut patterns = CategorizedCommands::default();
        let mut unclassified = Vec::new();

        for record in Self::window(records) {
            let command = command_text(&record.raw_text);
            if command.trim().is_empty() {
                continue;
            }

            match self.categorize(command) {
                Some(category) => patterns.push(category, command.to_string()),
                None => unclassified.push(command.to_string()),
            }
        }

        (patterns, unclassified)
    }

    /// First matching category, or `None` if no rule applies
    pub fn categorize(&self, command: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|rule| rule.applies(command))
            .map(|rule| rule.category)
    }

    /// The bounded suffix of records that classification looks at
    pub fn window(records: &[CommandRecord]) -> &[CommandRecord] {
        let start = records.len().saturating_sub(CLASSIFICATION_WINDOW);
        &records[start..]
    }
}

impl Default for PatternClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(lines: &[&str]) -> Vec<CommandRecord> {
        lines
            .iter()
            .filter_map(|l| CommandRecord::from_line(l))
            .collect()
    }

    #[test]
    fn test_rules_in_isolation() {
        assert!(is_git("git push"));
        assert!(is_git("gitk"));
        assert!(!is_git("lazygit"));

        assert!(is_api("curl -s example.com"));
        assert!(is_api("http GET :8080"));
        assert!(is_api("rg rapidjson"));

        assert!(is_dev_tool("python3 manage.py"));
        assert!(is_dev_tool("cargo test"));
        assert!(!is_dev_tool("make"));

        assert!(is_file_op("mkdir -p out"));
        assert!(is_file_op("mv a b"));
        assert!(!is_file_op("echo hi"));
    }

    #[test]
    fn test_first_match_wins() {
        let classifier = PatternClassifier::new();

        // git beats everything
        assert_eq!(classifier.categorize("git clone https://x/y"), Some(Category::GitWorkflow));
        // api beats dev tools
        assert_eq!(classifier.categorize("npm view api"), Some(Category::ApiUsage));
        // dev tools beat file ops
        assert_eq!(classifier.categorize("cd app && npm install"), Some(Category::DevTools));
        assert_eq!(classifier.categorize("ls -la"), Some(Category::FileOps));
        assert_eq!(classifier.categorize("make"), None);
    }

    #[test]
    fn test_classify_scenario() {
        let classifier = PatternClassifier::new();
        let patterns = classifier.classify(&records(&[
            "2024-01-01 10:00  git commit -m x",
            "2024-01-01 10:01  git push",
            "2024-01-01 10:02  code .",
        ]));

        assert_eq!(patterns.git_workflow, vec!["git commit -m x", "git push"]);
        assert!(patterns.dev_tools.is_empty());
        assert!(patterns.api_usage.is_empty());
        // "code ." matches nothing
        assert!(patterns.file_ops.is_empty());
    }

    #[test]
    fn test_mutual_exclusivity() {
        let classifier = PatternClassifier::new();
        let input = records(&[
            "git log",
            "curl http://localhost/api",
            "cargo build",
            "cd ..",
            "python -m http.server",
            "ls",
            "htop",
        ]);

        let patterns = classifier.classify(&input);

        let mut seen = std::collections::HashSet::new();
        for command in patterns.iter() {
            assert!(seen.insert(command.clone()), "{} bucketed twice", command);
        }
        // htop is dropped
        assert_eq!(patterns.len(), 6);
    }

    #[test]
    fn test_window_is_bounded() {
        let classifier = PatternClassifier::new();

        let mut lines: Vec<String> = (0..16_000).map(|i| format!("git commit -m {}", i)).collect();
        for i in 0..CLASSIFICATION_WINDOW {
            lines.push(format!("ls dir{}", i));
        }
        let input: Vec<CommandRecord> = lines
            .iter()
            .filter_map(|l| CommandRecord::from_line(l))
            .collect();

        let patterns = classifier.classify(&input);

        assert!(patterns.git_workflow.is_empty());
        assert_eq!(patterns.file_ops.len(), CLASSIFICATION_WINDOW);
        assert_eq!(PatternClassifier::window(&input).len(), CLASSIFICATION_WINDOW);
    }

    #[test]
    fn test_partition_keeps_unmatched() {
        let classifier = PatternClassifier::new();
        let (patterns, unclassified) =
            classifier.partition(&records(&["git push", "code .", "make", "ls"]));

        assert_eq!(patterns.len(), 2);
        assert_eq!(unclassified, vec!["code .", "make"]);
    }

    #[test]
    fn test_splits_at_first_gap() {
        assert_eq!(command_text("2024-01-01 10:00  git push"), "git push");
        assert_eq!(command_text("git commit -m 'fix  typo'"), "typo'");
        assert_eq!(command_text("make"), "make");

        let classifier = PatternClassifier::new();
        let (patterns, unclassified) =
            classifier.partition(&records(&["git commit -m 'fix  typo'", "docker run  ls /tmp"]));
        assert_eq!(patterns.file_ops, vec!["ls /tmp"]);
        assert_eq!(unclassified, vec!["typo'"]);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let classifier = PatternClassifier::new();
        let patterns = classifier.classify(&records(&["git add .", "ls", "git commit", "git push"]));

        assert_eq!(patterns.git_workflow, vec!["git add .", "git commit", "git push"]);
    }

    #[test]
    fn test_custom_rules() {
        let classifier = PatternClassifier::with_rules(vec![ClassificationRule {
            category: Category::FileOps,
            matches: |c: &str| c.starts_with("rsync"),
        }]);

        assert_eq!(classifier.categorize("rsync -a src dst"), Some(Category::FileOps));
        assert_eq!(classifier.categorize("git push"), None);
        assert_eq!(classifier.rules().len(), 1);
    }
}
