/// Attribute the resolved slug is written to when no column is configured.
pub const DEFAULT_SLUG_COLUMN: &str = "slug";

/// Separator placed between slug words when no replacement is configured.
pub const DEFAULT_REPLACEMENT: &str = "-";

/// Separator between a candidate and its numeric counter (`nguyen-1`).
pub const NUMERIC_SUFFIX_SEPARATOR: char = '-';

/// Upper bound on numeric-suffix probes for a single resolution.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10_000;
