//! Validation of user-supplied names that end up in file paths.

use anyhow::{bail, Result};

/// Maximum allowed length for a project name.
pub const MAX_NAME_LENGTH: usize = 128;

/// Reserved names that cannot be used as directory names (case-insensitive).
const RESERVED_NAMES: &[&str] = &[
    ".", "..", "con", "prn", "aux", "nul", "com1", "com2", "com3", "com4", "com5", "com6", "com7",
    "com8", "com9", "lpt1", "lpt2", "lpt3", "lpt4", "lpt5", "lpt6", "lpt7", "lpt8", "lpt9",
];

/// Validates that a project name is safe to use as a directory name.
///
/// A name is valid if it is non-empty, at most [`MAX_NAME_LENGTH`]
/// characters, made only of ASCII alphanumerics, dashes and underscores,
/// and not a reserved system name.
///
/// ```
/// use rampart::validation::validate_project_name;
///
/// assert!(validate_project_name("my_app").is_ok());
/// assert!(validate_project_name("../etc").is_err());
/// ```
pub fn validate_project_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Project name cannot be empty");
    }

    if name.len() > MAX_NAME_LENGTH {
        bail!(
            "Project name too long: {} characters (max {})",
            name.len(),
            MAX_NAME_LENGTH
        );
    }

    let valid_chars = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid_chars {
        bail!("Project name '{name}' contains invalid characters. Use only alphanumeric characters, dashes (-), and underscores (_)");
    }

    if RESERVED_NAMES.contains(&name.to_lowercase().as_str()) {
        bail!("Project name '{name}' uses a reserved name");
    }

    Ok(())
}
