/// Tool detection
///
/// Looks at the first word of every command in the history (no window) and
/// keeps the ones that are well-known developer tools.

use crate::store::{CommandRecord, ToolSet};

/// Registry of developer tools we recognize
pub const KNOWN_TOOLS: [&str; 17] = [
    "git", "gh", "curl", "wget", "docker", "kubectl", "python", "node", "npm", "yarn", "cargo",
    "go", "code", "vim", "nvim", "tmux", "screen",
];

/// Tool detector
pub struct ToolDetector;

impl ToolDetector {
    /// Collect every known tool that leads a command
    pub fn detect(records: &[CommandRecord]) -> ToolSet {
        records
            .iter()
            .filter_map(|record| Self::leading_token(record))
            .filter(|token| Self::is_known(token))
            .map(str::to_string)
            .collect()
    }

    /// Check a token against the registry (exact, case-sensitive)
    pub fn is_known(token: &str) -> bool {
        KNOWN_TOOLS.contains(&token)
    }

    /// First word of the line, skipping a leading timestamp if there is one
    fn leading_token(record: &CommandRecord) -> Option<&str> {
        record.extracted_command.split_whitespace().next()
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
    fn test_detect_known_tools() {
        let tools = ToolDetector::detect(&records(&[
            "2024-01-01 10:00  git commit -m x",
            "2024-01-01 10:01  git push",
            "2024-01-01 10:02  code .",
        ]));

        let expected: ToolSet = ["git", "code"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tools, expected);
    }

    #[test]
    fn test_double_spaced_commands_keep_their_tool() {
        let tools = ToolDetector::detect(&records(&[
            "git commit -m 'fix  typo'",
            "docker run  -it ubuntu",
        ]));
        let expected: ToolSet = ["docker", "git"].iter().map(|s| s.to_string()).collect();
        assert_eq!(tools, expected);
    }

    #[test]
    fn test_unknown_tokens_dropped() {
        let tools = ToolDetector::detect(&records(&["htop", "make build", "sudo docker ps", "Git status", "docker-compose up"]));
        assert!(tools.is_empty());
    }

    #[test]
    fn test_output_is_subset_of_registry() {
        let lines: Vec<String> = KNOWN_TOOLS
            .iter()
            .map(|t| format!("{} --version", t))
            .chain(["ls", "cat x", "rustc", "gitk"].iter().map(|s| s.to_string()))
            .collect();
        let input: Vec<CommandRecord> = lines
            .iter()
            .filter_map(|l| CommandRecord::from_line(l))
            .collect();

        let tools = ToolDetector::detect(&input);

        assert_eq!(tools.len(), KNOWN_TOOLS.len());
        assert!(tools.iter().all(|t| ToolDetector::is_known(t)));
    }

    #[test]
    fn test_not_windowed() {
        let mut lines = vec!["docker ps".to_string()];
        lines.extend((0..500).map(|i| format!("echo {}", i)));
        let input: Vec<CommandRecord> = lines
            .iter()
            .filter_map(|l| CommandRecord::from_line(l))
            .collect();

        assert!(ToolDetector::detect(&input).contains("docker"));
    }
}
