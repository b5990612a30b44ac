//! ntfy priority levels
//!
//! ntfy accepts 1 (min) to 5 (max) in the `Priority` header:
//! - MAX: security alerts, releases, direct mentions
//! - HIGH: pull requests, failing checks, review requests
//! - DEFAULT: issues, discussions, everything unclassified
//! - LOW: commit comments

/// Priority level for a pushed notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Min = 1,
    Low = 2,
    Default = 3,
    High = 4,
    Max = 5,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Min => "min",
            Priority::Low => "low",
            Priority::Default => "default",
            Priority::High => "high",
            Priority::Max => "max",
        }
    }

    /// Numeric level, as sent in the `Priority` header
    pub fn level(&self) -> u8 {
        *self as u8
    }

    pub fn header_value(&self) -> String {
        self.level().to_string()
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Default
    }
}
