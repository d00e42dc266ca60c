//! Slug generation utilities for human-readable record identifiers.
//!
//! ## Summary
//! Turns an ordered list of attribute values into a URL-safe slug. Output is
//! deterministic for a given input and set of [`TransformOptions`]: no I/O, no
//! randomness, no dependence on stored data.

use std::collections::HashMap;

use icu::casemap::CaseMapper;
use regex::Regex;

use crate::error::{SlugError, SlugResult};
use crate::options::TransformOptions;
use crate::util::symbols;

/// Compiled, validated form of [`TransformOptions`].
#[derive(Debug, Clone)]
pub struct Slugifier {
    lower: bool,
    replacement: String,
    symbols: bool,
    remove: Option<Regex>,
    charmap: HashMap<char, String>,
    // Longest key first so overlapping keys resolve greedily.
    multicharmap: Vec<(String, String)>,
}

impl Default for Slugifier {
    fn default() -> Self {
        let defaults = TransformOptions::default();
        Self {
            lower: defaults.lower,
            replacement: defaults.replacement,
            symbols: defaults.symbols,
            remove: None,
            charmap: HashMap::new(),
            multicharmap: Vec::new(),
        }
    }
}

impl Slugifier {
    /// ## Summary
    /// Validates and compiles transform options.
    ///
    /// ## Errors
    /// Returns [`SlugError::Transform`] if the removal pattern does not compile, a
    /// `charmap` key is not exactly one character, a `multicharmap` key is empty,
    /// or the replacement contains letters or digits.
    pub fn new(options: &TransformOptions) -> SlugResult<Self> {
        if options.replacement.chars().any(char::is_alphanumeric) {
            return Err(SlugError::Transform(format!(
                "replacement {:?} must not contain letters or digits",
                options.replacement
            )));
        }

        let remove = options
            .remove
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| SlugError::Transform(format!("invalid remove pattern: {e}")))?;

        let mut charmap = HashMap::with_capacity(options.charmap.len());
        for (from, to) in &options.charmap {
            let mut chars = from.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => {
                    charmap.insert(ch, to.clone());
                }
                _ => {
                    return Err(SlugError::Transform(format!(
                        "charmap key {from:?} must be exactly one character"
                    )));
                }
            }
        }

        if options.multicharmap.keys().any(String::is_empty) {
            return Err(SlugError::Transform(
                "multicharmap keys must not be empty".to_owned(),
            ));
        }
        let mut multicharmap: Vec<(String, String)> = options
            .multicharmap
            .iter()
            .map(|(from, to)| (from.clone(), to.clone()))
            .collect();
        multicharmap.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));

        Ok(Self {
            lower: options.lower,
            replacement: options.replacement.clone(),
            symbols: options.symbols,
            remove,
            charmap,
            multicharmap,
        })
    }

    /// Joins `values` with a single space and slugifies the result.
    #[must_use]
    pub fn slugify<I, S>(&self, values: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|value| value.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(" ");
        self.slugify_str(&joined)
    }

    /// Slugifies a single string.
    #[must_use]
    pub fn slugify_str(&self, input: &str) -> String {
        let stripped = match &self.remove {
            Some(pattern) => pattern.replace_all(input, ""),
            None => std::borrow::Cow::Borrowed(input),
        };
        let substituted = self.substitute(&self.apply_multicharmap(&stripped));
        // Characters with no ASCII spelling become separators.
        let transliterated = deunicode::deunicode_with_tofu(&substituted, " ");

        let cased = if self.lower {
            CaseMapper::new().fold_string(&transliterated).into_owned()
        } else {
            transliterated
        };

        cased
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(&self.replacement)
    }

    fn apply_multicharmap(&self, input: &str) -> String {
        if self.multicharmap.is_empty() {
            return input.to_owned();
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        'scan: while let Some(ch) = rest.chars().next() {
            for (from, to) in &self.multicharmap {
                if let Some(tail) = rest.strip_prefix(from.as_str()) {
                    out.push_str(to);
                    rest = tail;
                    continue 'scan;
                }
            }
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
        out
    }

    fn substitute(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for ch in input.chars() {
            if let Some(mapped) = self.charmap.get(&ch) {
                out.push_str(mapped);
            } else if let Some(word) = symbols::word(ch) {
                out.push(' ');
                if self.symbols {
                    out.push_str(word);
                    out.push(' ');
                }
            } else {
                out.push(ch);
            }
        }
        out
    }
}

/// ## Summary
/// Slugifies `values` with the given options.
///
/// ## Errors
/// Returns [`SlugError::Transform`] if the options are malformed.
pub fn slugify<I, S>(values: I, options: &TransformOptions) -> SlugResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(Slugifier::new(options)?.slugify(values))
}

/// Generate a URL-safe slug from a name using the default options.
///
/// Examples:
/// - "My Calendar" -> "my-calendar"
/// - "John Doe's Contacts" -> "john-doe-s-contacts"
/// - "Email & Tasks" -> "email-and-tasks"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    Slugifier::default().slugify_str(name)
}
