//! Scans Dart sources for hardcoded credentials and risky code.
//!
//! Findings come in two tiers. Critical findings (live keys, tokens,
//! embedded private keys) block the write; warnings (injection-prone
//! interpolation, plain HTTP, weak hashes) are reported without blocking.
//! Test fixtures, mocks and examples are skipped entirely, as is content
//! carrying an explicit `// ignore:` marker.

use regex::Regex;
use std::sync::LazyLock;

use crate::protocol::{HookInput, HookOutcome};
use crate::rules::{dedup_labels, summarize, RuleSet};

const MAX_REPORTED: usize = 3;

/// Only files with this extension are scanned
pub const SCANNED_EXTENSION: &str = ".dart";

pub const CRITICAL_PATTERNS: &[(&str, &str)] = &[
    (
        r#"["']sk[-_]live[-_][a-zA-Z0-9]{20,}["']"#,
        "Hardcoded Stripe live key",
    ),
    (
        r#"["']pk[-_]live[-_][a-zA-Z0-9]{20,}["']"#,
        "Hardcoded Stripe publishable key",
    ),
    (r#"["']AIza[a-zA-Z0-9_-]{35}["']"#, "Hardcoded Google API key"),
    (r#"["']ghp_[a-zA-Z0-9]{36}["']"#, "Hardcoded GitHub token"),
    (r#"["']gho_[a-zA-Z0-9]{36}["']"#, "Hardcoded GitHub OAuth token"),
    (r#"["']xox[baprs]-[a-zA-Z0-9-]{10,}["']"#, "Hardcoded Slack token"),
    (r"AKIA[A-Z0-9]{16}", "Hardcoded AWS access key"),
    (
        r#"["'][a-f0-9]{32}["'].*(?:api|key|secret|token)"#,
        "Possible hardcoded secret",
    ),
    (r#"["']1:[0-9]+:android:[a-f0-9]+["']"#, "Hardcoded Firebase app ID"),
    (
        r"-----BEGIN (RSA |EC |DSA |OPENSSH )?PRIVATE KEY-----",
        "Embedded private key",
    ),
    (r"-----BEGIN CERTIFICATE-----", "Embedded certificate"),
];

/// Label of the plain-HTTP rule, which has a local-address exemption
pub const INSECURE_HTTP: &str = "Insecure HTTP URL (use HTTPS)";

pub const WARNING_PATTERNS: &[(&str, &str)] = &[
    // SQL injection
    (
        r"\$\{.*\}.*(?:SELECT|INSERT|UPDATE|DELETE|DROP)",
        "Potential SQL injection - use parameterized queries",
    ),
    (
        r#"["'].*\s+(?:SELECT|INSERT|UPDATE|DELETE)\s+.*\$"#,
        "SQL with string interpolation",
    ),
    (r#"query\s*\(\s*["'].*\$\{"#, "Raw query with interpolation"),
    // command injection
    (
        r"Process\.run\s*\([^)]*\$",
        "Process.run with interpolation - use list arguments",
    ),
    (
        r"Process\.start\s*\([^)]*\$",
        "Process.start with interpolation",
    ),
    (
        r"shell:\s*true",
        "Shell execution enabled - potential command injection",
    ),
    // transport
    (r"http://", INSECURE_HTTP),
    (r"verify\s*:\s*false", "SSL verification disabled"),
    (r"allowInsecure\s*:\s*true", "Insecure connection allowed"),
    // leaking secrets
    (
        r"debugPrint\s*\(.*(?:password|secret|token|key)",
        "Sensitive data in debug output",
    ),
    (
        r"print\s*\(.*(?:password|secret|token|key)",
        "Sensitive data in print",
    ),
    (
        r"log\s*\(.*(?:password|secret|token|key)",
        "Sensitive data in logs",
    ),
    // path traversal
    (
        r"File\s*\([^)]*\$\{",
        "File path with interpolation - validate path",
    ),
    (
        r"Directory\s*\([^)]*\$\{",
        "Directory path with interpolation",
    ),
    // XSS
    (r"innerHTML\s*=", "Direct innerHTML assignment - sanitize first"),
    (r"dangerouslySetInnerHTML", "Dangerous HTML injection"),
    // weak crypto
    (r"MD5\s*\(", "MD5 is cryptographically weak"),
    (r"SHA1\s*\(", "SHA1 is deprecated for security"),
    // hardcoded credentials
    (
        r#"password\s*[=:]\s*["'][^"']+["']"#,
        "Possible hardcoded password",
    ),
    (
        r#"secret\s*[=:]\s*["'][^"']+["']"#,
        "Possible hardcoded secret",
    ),
];

/// Markers in the content that opt out of scanning
pub const IGNORE_CONTENT_PATTERNS: &[(&str, &str)] = &[(r"//\s*ignore:", "Explicit ignore comment")];

/// Path fragments of files that legitimately hold fake credentials
pub const IGNORE_PATH_PATTERNS: &[(&str, &str)] = &[
    (r"test/", "Test directory"),
    (r"_test\.dart", "Test file"),
    (r"mock", "Mock"),
    (r"example", "Example"),
    (r"\.env\.example", "Environment example"),
];

static LOCAL_HTTP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http://(localhost|127\.0\.0\.1|10\.|192\.168\.)")
        .expect("local http pattern is valid")
});

/// Compiled rule tables for the scanner.
#[derive(Debug, Clone)]
pub struct SecurityRules {
    pub critical: RuleSet,
    pub warning: RuleSet,
    pub ignore_content: RuleSet,
    pub ignore_path: RuleSet,
}

impl SecurityRules {
    pub fn compile() -> Result<Self, regex::Error> {
        Ok(Self {
            critical: RuleSet::compile(CRITICAL_PATTERNS)?,
            warning: RuleSet::compile(WARNING_PATTERNS)?,
            ignore_content: RuleSet::compile(IGNORE_CONTENT_PATTERNS)?,
            ignore_path: RuleSet::compile(IGNORE_PATH_PATTERNS)?,
        })
    }
}

static SECURITY_RULES: LazyLock<SecurityRules> =
    LazyLock::new(|| SecurityRules::compile().expect("security patterns are valid"));

pub fn default_rules() -> &'static SecurityRules {
    &SECURITY_RULES
}

/// Deduplicated findings per tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub critical: Vec<&'static str>,
    pub warnings: Vec<&'static str>,
}

pub fn run(input: &HookInput) -> HookOutcome {
    let tool_input = &input.tool_input;
    let file_path = tool_input.file_path();
    if !file_path.ends_with(SCANNED_EXTENSION) {
        return HookOutcome::allow();
    }

    let content = tool_input.new_content();
    if content.is_empty() {
        return HookOutcome::allow();
    }

    outcome_for(&scan_content(content, file_path, default_rules()))
}

/// Whether the file or content is exempt from scanning.
pub fn should_ignore(content: &str, file_path: &str, rules: &SecurityRules) -> bool {
    rules.ignore_path.any_match(file_path) || rules.ignore_content.any_match(content)
}

pub fn scan_content(content: &str, file_path: &str, rules: &SecurityRules) -> Findings {
    if should_ignore(content, file_path, rules) {
        tracing::debug!(file_path, "security scan skipped");
        return Findings::default();
    }

    let local_http = LOCAL_HTTP.is_match(content);
    let warnings = dedup_labels(
        rules
            .warning
            .iter()
            .filter(|rule| rule.is_match(content))
            .map(|rule| rule.label())
            .filter(|label| !(local_http && *label == INSECURE_HTTP)),
    );

    Findings {
        critical: rules.critical.matching_labels(content),
        warnings,
    }
}

/// Critical findings block; warnings alone only warn.
pub fn outcome_for(findings: &Findings) -> HookOutcome {
    if !findings.critical.is_empty() {
        return HookOutcome::block(format!(
            "SECURITY CRITICAL: {}",
            summarize(&findings.critical, MAX_REPORTED)
        ));
    }

    if !findings.warnings.is_empty() {
        return HookOutcome::warn(format!(
            "Security warnings: {}",
            summarize(&findings.warnings, MAX_REPORTED)
        ));
    }

    HookOutcome::allow()
}
