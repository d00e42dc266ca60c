//! Validated SQL identifiers for dynamically named tables and columns.

use std::fmt;

use crate::error::{DbError, DbResult};

/// A table or column name, optionally schema-qualified (`public.category`).
///
/// Each dot-separated part must start with an ASCII letter or underscore and
/// contain only ASCII letters, digits, and underscores. Rendered double-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    parts: Vec<String>,
}

impl Identifier {
    /// ## Summary
    /// Parses and validates an identifier.
    ///
    /// ## Errors
    /// Returns [`DbError::InvalidIdentifier`] if any part is empty or contains
    /// characters outside `[A-Za-z0-9_]`, or starts with a digit.
    pub fn parse(raw: &str) -> DbResult<Self> {
        let parts = raw
            .split('.')
            .map(|part| {
                if is_valid_part(part) {
                    Ok(part.to_owned())
                } else {
                    Err(DbError::InvalidIdentifier(raw.to_owned()))
                }
            })
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Self { parts })
    }
}

fn is_valid_part(part: &str) -> bool {
    let mut chars = part.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, part) in self.parts.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "\"{part}\"")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_simple_name() {
        let ident = Identifier::parse("category").expect("valid");
        assert_eq!(ident.to_string(), "\"category\"");
    }

    #[test]
    fn quotes_each_schema_part() {
        let ident = Identifier::parse("public.category").expect("valid");
        assert_eq!(ident.to_string(), "\"public\".\"category\"");
    }

    #[test]
    fn rejects_injection_attempts() {
        for raw in [
            "",
            "slug; DROP TABLE category",
            "slug\"",
            "1slug",
            "public.",
            "sl ug",
            "slüg",
        ] {
            assert!(
                matches!(Identifier::parse(raw), Err(DbError::InvalidIdentifier(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
