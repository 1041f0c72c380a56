use anyhow::{bail, Context, Result};

const DELIMITER: &str = "---";

/// Whether `content` opens with a `---` line.
pub fn has_frontmatter_delimiter(content: &str) -> bool {
    content.starts_with(DELIMITER)
}

/// Raw text between the opening and closing `---` lines.
///
/// # Errors
///
/// Returns an error if the opening or closing delimiter is missing.
pub fn extract_frontmatter_block(content: &str) -> Result<String> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.is_empty() || !lines[0].trim().starts_with(DELIMITER) {
        bail!("No frontmatter delimiter found at start of content");
    }

    // Only a delimiter at the opening indentation closes the block, so an
    // indented `---` inside a block scalar is kept as content.
    let opening_indent = lines[0].len() - lines[0].trim_start().len();
    let end_idx = lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| {
            let trimmed = line.trim_start();
            trimmed.starts_with(DELIMITER) && line.len() - trimmed.len() == opening_indent
        })
        .map(|(idx, _)| idx)
        .ok_or_else(|| anyhow::anyhow!("Frontmatter not properly closed with ---"))?;

    Ok(lines[1..end_idx].join("\n"))
}

/// Parse a frontmatter block as YAML; a blank block is an empty mapping.
///
/// ```text
/// description: Riverpod conventions
/// globs: ["lib/**/*.dart"]
/// ```
///
/// # Errors
///
/// Returns an error if the block is not valid YAML.
pub fn parse_yaml_block(block: &str) -> Result<serde_yaml::Value> {
    if block.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(serde_yaml::Mapping::new()));
    }

    serde_yaml::from_str(block).context("Failed to parse YAML frontmatter")
}
