//! Progressive prefix matching of a command against an [`AllowSet`].
//!
//! A command is split on runs of whitespace. Candidate prefixes are the
//! first `n`, `n - 1`, ..., `1` tokens joined by single spaces. The command
//! is admitted when any candidate `p` appears in the set as `Bash(p)` or
//! `Bash(p:*)`.

use crate::security::allowlist::{exact_pattern, wildcard_pattern, AllowSet};

/// The pattern that admitted a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Leading tokens of the command that matched
    pub prefix: String,
    /// Allow-list entry that matched the prefix
    pub pattern: String,
}

/// Whether `command` is admitted by `allow_set`
pub fn is_allowed(command: &str, allow_set: &AllowSet) -> bool {
    find_match(command, allow_set).is_some()
}

/// Find the longest whole-token prefix of `command` admitted by `allow_set`
pub fn find_match(command: &str, allow_set: &AllowSet) -> Option<Match> {
    let tokens: Vec<&str> = command.split_whitespace().collect();

    for len in (1..=tokens.len()).rev() {
        let prefix = tokens[..len].join(" ");

        for pattern in [exact_pattern(&prefix), wildcard_pattern(&prefix)] {
            if allow_set.contains(&pattern) {
                tracing::debug!(command, %prefix, %pattern, "command admitted");
                return Some(Match { prefix, pattern });
            }
        }
    }

    tracing::debug!(command, "no allow pattern matched");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_set(patterns: &[&str]) -> AllowSet {
        patterns.iter().copied().collect()
    }

    fn sample() -> AllowSet {
        allow_set(&[
            "Bash(echo)",
            "Bash(ls)",
            "Bash(pwd:*)",
            "Bash(git status)",
            "Bash(npm run test:*)",
        ])
    }

    #[test]
    fn test_exact_matches() {
        let set = sample();
        assert!(is_allowed("echo", &set));
        assert!(is_allowed("ls", &set));
        assert!(is_allowed("git status", &set));
    }

    #[test]
    fn test_wildcard_matches() {
        let set = sample();
        assert!(is_allowed("pwd", &set));
        assert!(is_allowed("pwd /some/path", &set));
        assert!(is_allowed("npm run test extra-args", &set));
        assert!(is_allowed("npm run test --watch --coverage", &set));
    }

    #[test]
    fn test_progressive_prefix_matching() {
        let set = sample();
        assert!(is_allowed("git status --porcelain", &set));
        assert!(is_allowed("git status -s", &set));
        assert!(is_allowed("echo hello world", &set));
        assert!(is_allowed("ls -la", &set));
    }

    #[test]
    fn test_denied_commands() {
        let set = sample();
        assert!(!is_allowed("rm", &set));
        assert!(!is_allowed("cat /etc/passwd", &set));
        assert!(!is_allowed("git push", &set));
        assert!(!is_allowed("npm run build", &set));
        assert!(!is_allowed("npm run", &set));
    }

    #[test]
    fn test_exact_pattern_rejects_siblings_and_parents() {
        let set = allow_set(&["Bash(git status)"]);
        assert!(is_allowed("git status", &set));
        assert!(!is_allowed("git", &set));
        assert!(!is_allowed("git stash", &set));
    }

    #[test]
    fn test_exact_pattern_requires_whole_tokens() {
        let set = allow_set(&["Bash(make build)"]);
        assert!(is_allowed("make build", &set));
        assert!(!is_allowed("make build-all", &set));
        assert!(!is_allowed("make", &set));
    }

    #[test]
    fn test_empty_command() {
        let set = sample();
        assert!(!is_allowed("", &set));
        assert!(!is_allowed("   \t ", &set));
    }

    #[test]
    fn test_empty_allow_set() {
        let set = AllowSet::new();
        assert!(!is_allowed("echo", &set));
        assert!(!is_allowed("ls -la", &set));
    }

    #[test]
    fn test_whitespace_runs_collapse_into_candidates() {
        let set = allow_set(&["Bash(git status)"]);
        assert!(is_allowed("  git   status  ", &set));
        assert!(is_allowed("git\tstatus", &set));
    }

    #[test]
    fn test_candidates_are_whole_tokens() {
        let set = allow_set(&["Bash(ec:*)", "Bash(git stat:*)"]);
        assert!(!is_allowed("echo hi", &set));
        assert!(!is_allowed("git status", &set));
    }

    #[test]
    fn test_other_tools_never_admit_shell_commands() {
        let set = allow_set(&["Read(echo)", "echo", "Bash"]);
        assert!(!is_allowed("echo", &set));
    }

    #[test]
    fn test_find_match_prefers_longest_prefix() {
        let set = allow_set(&["Bash(git:*)", "Bash(git log:*)"]);
        let found = find_match("git log --oneline", &set).unwrap();
        assert_eq!(found.prefix, "git log");
        assert_eq!(found.pattern, "Bash(git log:*)");
    }

    #[test]
    fn test_find_match_prefers_exact_form_for_same_prefix() {
        let set = allow_set(&["Bash(echo)", "Bash(echo:*)"]);
        let found = find_match("echo", &set).unwrap();
        assert_eq!(found.pattern, "Bash(echo)");
    }

    #[test]
    fn test_wildcard_property_holds_for_many_prefixes() {
        let prefixes = ["ls", "git log", "cargo test --release", "npm run test"];
        for prefix in prefixes {
            let set = allow_set(&[wildcard_pattern(prefix).as_str()]);
            assert!(is_allowed(prefix, &set), "prefix itself: {}", prefix);
            assert!(
                is_allowed(&format!("{} --flag value", prefix), &set),
                "extended: {}",
                prefix
            );
        }
    }

    #[test]
    fn test_exact_pattern_reached_through_shorter_candidates() {
        // Shorter candidates are always tried, so an exact entry also admits
        // longer commands whose leading tokens equal it.
        let prefixes = ["ls", "git log", "cargo test --release"];
        for prefix in prefixes {
            let set = allow_set(&[exact_pattern(prefix).as_str()]);
            assert!(is_allowed(prefix, &set), "prefix itself: {}", prefix);
            assert!(is_allowed(&format!("{} extra", prefix), &set), "extended: {}", prefix);
            assert!(!is_allowed(&format!("{}x", prefix), &set), "glued: {}", prefix);
        }
    }
}
