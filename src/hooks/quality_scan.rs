//! Flags code-quality smells in content about to be written.

use std::sync::LazyLock;

use crate::protocol::{HookInput, HookOutcome, HookResponse, Verdict};
use crate::rules::{summarize, RuleSet};

const MAX_REPORTED: usize = 3;

pub const QUALITY_PATTERNS: &[(&str, &str)] = &[
    // backward compatibility leftovers
    (
        r"//\s*(?:TODO|FIXME):\s*remove\s+(?:after|when|in)",
        "Backward compatibility TODO found",
    ),
    (r"//\s*backward\s*compat", "Backward compatibility comment found"),
    (r"//\s*legacy", "Legacy code comment found"),
    (r"@deprecated.*temporary", "Temporary deprecated code found"),
    // unresolved markers
    (r"//\s*TODO:", "Unresolved TODO comment"),
    (r"//\s*FIXME:", "Unresolved FIXME comment"),
    (r"//\s*HACK:", "HACK comment found"),
    (r"//\s*XXX:", "XXX comment found"),
    // dead code
    (r"if\s*\(\s*false\s*\)", "Dead code: if (false)"),
    (r"while\s*\(\s*false\s*\)", "Dead code: while (false)"),
    // debug artifacts
    (r#"\bprint\s*\(\s*['"]DEBUG"#, "Debug print statement"),
    (r"console\.log\s*\(", "Console.log found (use proper logging)"),
];

static QUALITY_RULES: LazyLock<RuleSet> = LazyLock::new(|| {
    RuleSet::compile(QUALITY_PATTERNS).expect("quality patterns are valid")
});

pub fn default_rules() -> &'static RuleSet {
    &QUALITY_RULES
}

pub fn run(input: &HookInput, strict: bool) -> HookOutcome {
    let content = input.tool_input.new_content();
    if content.is_empty() {
        return HookOutcome::allow();
    }
    scan(content, default_rules(), strict)
}

/// Warn on any violation; in strict mode, block instead.
pub fn scan(content: &str, rules: &RuleSet, strict: bool) -> HookOutcome {
    let violations = rules.matching_labels(content);
    if violations.is_empty() {
        return HookOutcome::allow();
    }

    let verdict = if strict {
        Verdict::Block
    } else {
        Verdict::Warning
    };
    HookOutcome::new(
        verdict,
        HookResponse::feedback(format!(
            "Quality warnings: {}",
            summarize(&violations, MAX_REPORTED)
        ))
        .with_block(strict),
    )
}
