/// Escalation stage that produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Base,
    SourceSuffix,
    Numeric,
}

impl Tier {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::SourceSuffix => "source-suffix",
            Self::Numeric => "numeric",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a lifecycle hook did to the record's slug column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugOutcome {
    /// A fresh slug was resolved and written to the target column.
    Generated(String),
    /// The existing slug was left untouched.
    Kept,
}

impl SlugOutcome {
    /// Returns the generated slug, if one was written.
    #[must_use]
    pub fn generated(&self) -> Option<&str> {
        match self {
            Self::Generated(slug) => Some(slug),
            Self::Kept => None,
        }
    }
}
