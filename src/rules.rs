//! Ordered `(pattern, label)` rule tables.
//!
//! Each hook owns a static table of pattern specs. Tables are compiled once
//! into a [`RuleSet`] and handed to the matching functions, so tests can
//! substitute their own rules.

use regex::{Regex, RegexBuilder};

/// A compiled pattern and the message reported when it matches.
#[derive(Debug, Clone)]
pub struct Rule {
    pattern: Regex,
    label: &'static str,
}

impl Rule {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// An immutable ordered list of rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile case-insensitive rules in table order.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn compile(specs: &[(&str, &'static str)]) -> Result<Self, regex::Error> {
        let rules = specs
            .iter()
            .map(|(pattern, label)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|pattern| Rule {
                        pattern,
                        label: *label,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// First rule (in table order) matching `text`.
    pub fn first_match(&self, text: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.is_match(text))
    }

    pub fn any_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// Labels of every matching rule, deduplicated in first-seen order.
    pub fn matching_labels(&self, text: &str) -> Vec<&'static str> {
        dedup_labels(
            self.rules
                .iter()
                .filter(|rule| rule.is_match(text))
                .map(Rule::label),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Drop repeated labels, keeping the first occurrence of each.
pub fn dedup_labels<I>(labels: I) -> Vec<&'static str>
where
    I: IntoIterator<Item = &'static str>,
{
    let mut seen = Vec::new();
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

/// Join at most `limit` messages with `", "`.
pub fn summarize<S: AsRef<str>>(messages: &[S], limit: usize) -> String {
    messages
        .iter()
        .take(limit)
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The first `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
