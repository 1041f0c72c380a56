//! Blocks destructive shell commands before they run.

use std::sync::LazyLock;

use crate::protocol::{HookInput, HookOutcome};
use crate::rules::{truncate_chars, RuleSet};

/// Characters of the offending command echoed back in the message
const COMMAND_ECHO_CHARS: usize = 100;

/// Destructive operations, checked in order; the first match wins.
pub const DANGEROUS_PATTERNS: &[(&str, &str)] = &[
    (r"rm\s+-rf\s+/", "Recursive delete from root"),
    (r"rm\s+-rf\s+~", "Recursive delete from home"),
    (r"rm\s+-rf\s+\*", "Recursive delete wildcard"),
    (r"git\s+push.*--force.*main", "Force push to main"),
    (r"git\s+push.*--force.*master", "Force push to master"),
    (r"git\s+push\s+-f.*main", "Force push to main"),
    (r"git\s+push\s+-f.*master", "Force push to master"),
    (r"DROP\s+DATABASE", "Drop database"),
    (r"DROP\s+TABLE", "Drop table"),
    (r"TRUNCATE\s+TABLE", "Truncate table"),
    (r"DELETE\s+FROM\s+\w+\s*;?\s*$", "Delete all rows without WHERE"),
    (r"chmod\s+-R\s+777", "Recursive chmod 777"),
    (r":\(\)\s*\{\s*:\|:&\s*\};\s*:", "Fork bomb"),
    (r"mkfs\.", "Format filesystem"),
    (r"dd\s+if=.*of=/dev/", "Direct disk write"),
];

static DANGEROUS_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(DANGEROUS_PATTERNS).expect("dangerous command patterns are valid")
});

pub fn default_rules() -> &'static RuleSet {
    &DANGEROUS_RULES
}

pub fn run(input: &HookInput) -> HookOutcome {
    check_command(input.tool_input.command(), default_rules())
}

/// Block `command` if any rule matches it.
pub fn check_command(command: &str, rules: &RuleSet) -> HookOutcome {
    let Some(rule) = rules.first_match(command) else {
        return HookOutcome::allow();
    };

    tracing::debug!(rule = rule.label(), "dangerous command");
    HookOutcome::block(format!(
        "BLOCKED: Dangerous command detected - {}. Command: '{}...' \
         This operation could cause irreversible damage and must be run manually if needed.",
        rule.label(),
        truncate_chars(command, COMMAND_ECHO_CHARS)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Verdict;

    fn check(command: &str) -> HookOutcome {
        check_command(command, default_rules())
    }

    fn blocked_as(command: &str, label: &str) {
        let outcome = check(command);
        assert_eq!(outcome.verdict, Verdict::Block, "{command}");
        let feedback = outcome.feedback().unwrap();
        assert!(
            feedback.contains(&format!("Dangerous command detected - {label}.")),
            "{command}: {feedback}"
        );
    }

    #[test]
    fn test_recursive_delete_from_root() {
        blocked_as("rm -rf /", "Recursive delete from root");
        blocked_as("sudo rm  -rf   /var/lib", "Recursive delete from root");
    }

    #[test]
    fn test_recursive_delete_variants() {
        blocked_as("rm -rf ~", "Recursive delete from home");
        blocked_as("rm -rf *", "Recursive delete wildcard");
    }

    #[test]
    fn test_force_push_to_protected_branches() {
        blocked_as("git push --force origin main", "Force push to main");
        blocked_as("git push origin --force master", "Force push to master");
        blocked_as("git push -f origin main", "Force push to main");
    }

    #[test]
    fn test_destructive_sql_is_case_insensitive() {
        blocked_as("psql -c 'drop database prod'", "Drop database");
        blocked_as("DROP TABLE users", "Drop table");
        blocked_as("truncate table logs", "Truncate table");
        blocked_as("DELETE FROM users;", "Delete all rows without WHERE");
    }

    #[test]
    fn test_system_level_damage() {
        blocked_as("chmod -R 777 .", "Recursive chmod 777");
        blocked_as(":(){ :|:& };:", "Fork bomb");
        blocked_as("mkfs.ext4 /dev/sda1", "Format filesystem");
        blocked_as("dd if=/dev/zero of=/dev/sda", "Direct disk write");
    }

    #[test]
    fn test_safe_commands_are_allowed() {
        for command in [
            "ls -la",
            "rm -rf build",
            "git push origin feature/login",
            "git push --force origin feature/login",
            "DELETE FROM users WHERE id = 1",
            "flutter test",
            "",
        ] {
            assert_eq!(check(command), HookOutcome::allow(), "{command}");
        }
    }

    #[test]
    fn test_command_echo_is_truncated() {
        let command = format!("rm -rf /{}", "a".repeat(300));
        let feedback = check(&command).feedback().unwrap().to_string();
        let echoed = truncate_chars(&command, COMMAND_ECHO_CHARS);
        assert!(feedback.contains(&format!("Command: '{echoed}...'")));
        assert!(!feedback.contains(&"a".repeat(150)));
    }

    #[test]
    fn test_first_rule_wins() {
        // matches both "Drop table" and "Recursive delete from root"
        blocked_as("rm -rf / && DROP TABLE x", "Recursive delete from root");
    }

    #[test]
    fn test_injected_rules() {
        let rules = RuleSet::compile(&[(r"flutter\s+clean", "Cache wipe")]).unwrap();
        let outcome = check_command("flutter clean", &rules);
        assert_eq!(outcome.verdict, Verdict::Block);
        assert_eq!(check_command("rm -rf /", &rules), HookOutcome::allow());
    }

    #[test]
    fn test_missing_command_is_allowed() {
        assert_eq!(run(&HookInput::default()), HookOutcome::allow());
    }
}
