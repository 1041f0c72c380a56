use std::fmt;

/// Outcome of a hook, ordered by severity: `Allow < Warning < Block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    /// Operation proceeds
    Allow,
    /// Operation proceeds, feedback is shown
    Warning,
    /// Operation is refused
    Block,
}

impl Verdict {
    /// Process exit status the assistant interprets.
    pub fn exit_code(self) -> u8 {
        match self {
            Verdict::Allow => 0,
            Verdict::Warning => 1,
            Verdict::Block => 2,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allow => write!(f, "allow"),
            Verdict::Warning => write!(f, "warning"),
            Verdict::Block => write!(f, "block"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Verdict::Allow.exit_code(), 0);
        assert_eq!(Verdict::Warning.exit_code(), 1);
        assert_eq!(Verdict::Block.exit_code(), 2);
    }

    #[test]
    fn test_severity_order() {
        assert!(Verdict::Allow < Verdict::Warning);
        assert!(Verdict::Warning < Verdict::Block);
        assert_eq!(
            [Verdict::Warning, Verdict::Block, Verdict::Allow].iter().max(),
            Some(&Verdict::Block)
        );
    }
}
