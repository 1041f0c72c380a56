//! Validation results and their text rendering.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::counts::Category;

/// Actual versus documented count for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryCount {
    pub category: Category,
    pub actual: usize,
    /// `None` when the registry has no row for the category
    pub documented: Option<usize>,
}

impl CategoryCount {
    pub fn matches(&self) -> bool {
        self.documented == Some(self.actual)
    }

    /// Mismatch issue, only when the registry documents a different count.
    pub fn mismatch(&self) -> Option<String> {
        let documented = self.documented?;
        (documented != self.actual).then(|| {
            format!(
                "{} count mismatch: actual={}, registry={documented}",
                self.category, self.actual
            )
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub counts: Vec<CategoryCount>,
    /// Problems that fail validation
    pub issues: Vec<String>,
    /// Problems worth fixing that do not fail validation
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Build the count section and its mismatch issues.
    pub fn from_counts(
        actual: &BTreeMap<Category, usize>,
        documented: &BTreeMap<Category, usize>,
    ) -> Self {
        let counts: Vec<CategoryCount> = Category::ALL
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                actual: actual.get(category).copied().unwrap_or(0),
                documented: documented.get(category).copied(),
            })
            .collect();
        let issues = counts.iter().filter_map(CategoryCount::mismatch).collect();

        Self {
            counts,
            issues,
            warnings: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.warnings.is_empty()
    }

    /// 2 with issues, 1 with warnings only, 0 when clean.
    pub fn exit_code(&self) -> u8 {
        if !self.issues.is_empty() {
            2
        } else if !self.warnings.is_empty() {
            1
        } else {
            0
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "=== Project Validation Report ===")?;
        writeln!(out)?;

        for count in &self.counts {
            let status = if count.matches() { "[OK]" } else { "[X]" };
            let documented = count
                .documented
                .map_or_else(|| "?".to_string(), |n| n.to_string());
            writeln!(
                out,
                "{status} {}: {} (registry: {documented})",
                count.category, count.actual
            )?;
        }
        writeln!(out)?;

        if !self.issues.is_empty() {
            writeln!(out, "Issues Found:")?;
            for issue in &self.issues {
                writeln!(out, "  [X] {issue}")?;
            }
            writeln!(out)?;
        }

        if !self.warnings.is_empty() {
            writeln!(out, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(out, "  [!] {warning}")?;
            }
            writeln!(out)?;
        }

        writeln!(
            out,
            "Total: {} errors, {} warnings",
            self.issues.len(),
            self.warnings.len()
        )?;
        writeln!(out)?;
        writeln!(out, "=== Validation Complete ===")
    }
}
