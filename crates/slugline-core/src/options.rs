//! Per-model slug configuration.
//!
//! ## Summary
//! A [`SlugConfig`] is supplied once per record type and never changes afterwards.
//! It can be declared in code through [`SlugConfig::builder`] or deserialized from
//! a `[models.<name>]` table in `config.toml`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_REPLACEMENT, DEFAULT_SLUG_COLUMN};
use crate::error::{SlugError, SlugResult};

/// Options consumed by the [`Slugifier`](crate::util::slug::Slugifier).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    /// Case-fold the slug.
    pub lower: bool,
    /// Separator placed between words.
    pub replacement: String,
    /// Spell out common symbols (`&` becomes `and`) instead of dropping them.
    pub symbols: bool,
    /// Regular expression; every match is deleted from the input.
    pub remove: Option<String>,
    /// Single-character substitutions, applied before transliteration.
    pub charmap: BTreeMap<String, String>,
    /// Multi-character substitutions, applied before `charmap`.
    pub multicharmap: BTreeMap<String, String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            lower: true,
            replacement: DEFAULT_REPLACEMENT.to_owned(),
            symbols: true,
            remove: None,
            charmap: BTreeMap::new(),
            multicharmap: BTreeMap::new(),
        }
    }
}

/// Slug configuration for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SlugConfig {
    /// Attributes whose values seed the base slug, in order.
    #[serde(alias = "source")]
    pub source_fields: Vec<String>,
    /// Attributes appended one at a time when the base slug collides.
    #[serde(default, alias = "suffix_source")]
    pub suffix_fields: Vec<String>,
    #[serde(default, alias = "slug_options")]
    pub transform: TransformOptions,
    /// Regenerate an existing slug when a source attribute changes.
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
    /// Attribute the resolved slug is written to.
    #[serde(default = "default_column")]
    pub column: String,
    /// Ceiling on numeric-suffix probes before giving up.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

const fn default_overwrite() -> bool {
    true
}

fn default_column() -> String {
    DEFAULT_SLUG_COLUMN.to_owned()
}

const fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl SlugConfig {
    /// Starts a configuration seeded from the given source attributes.
    #[must_use]
    pub fn builder<I, S>(source_fields: I) -> SlugConfigBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SlugConfigBuilder {
            config: Self {
                source_fields: source_fields.into_iter().map(Into::into).collect(),
                suffix_fields: Vec::new(),
                transform: TransformOptions::default(),
                overwrite: default_overwrite(),
                column: default_column(),
                max_attempts: default_max_attempts(),
            },
        }
    }

    /// ## Summary
    /// Checks the structural requirements of the configuration.
    ///
    /// ## Errors
    /// Returns [`SlugError::Configuration`] if no source attribute is named, an
    /// attribute name is blank, the target column is blank, or `max_attempts` is zero.
    pub fn validate(&self) -> SlugResult<()> {
        if self.source_fields.is_empty() {
            return Err(SlugError::Configuration(
                "at least one source field is required".to_owned(),
            ));
        }

        if let Some(blank) = self
            .source_fields
            .iter()
            .chain(&self.suffix_fields)
            .find(|field| field.trim().is_empty())
        {
            return Err(SlugError::Configuration(format!(
                "field names must not be blank (got {blank:?})"
            )));
        }

        if self.column.trim().is_empty() {
            return Err(SlugError::Configuration(
                "target column must not be blank".to_owned(),
            ));
        }

        if self.max_attempts == 0 {
            return Err(SlugError::Configuration(
                "max_attempts must be greater than zero".to_owned(),
            ));
        }

        Ok(())
    }
}

/// Typed builder for [`SlugConfig`].
#[derive(Debug, Clone)]
pub struct SlugConfigBuilder {
    config: SlugConfig,
}

impl SlugConfigBuilder {
    #[must_use]
    pub fn suffix_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.suffix_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: TransformOptions) -> Self {
        self.config.transform = transform;
        self
    }

    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.config.column = column.into();
        self
    }

    #[must_use]
    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.config.max_attempts = max_attempts;
        self
    }

    /// ## Summary
    /// Finishes the builder.
    ///
    /// ## Errors
    /// Returns [`SlugError::Configuration`] if the configuration is invalid.
    pub fn build(self) -> SlugResult<SlugConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = SlugConfig::builder(["name"]).build().expect("valid config");

        assert_eq!(config.source_fields, vec!["name".to_owned()]);
        assert!(config.suffix_fields.is_empty());
        assert!(config.overwrite);
        assert_eq!(config.column, "slug");
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert!(config.transform.lower);
        assert_eq!(config.transform.replacement, "-");
    }

    #[test]
    fn empty_source_fields_rejected() {
        let err = SlugConfig::builder(Vec::<String>::new())
            .build()
            .expect_err("empty source must fail");
        assert!(matches!(err, SlugError::Configuration(_)));
    }

    #[test]
    fn blank_suffix_field_rejected() {
        let err = SlugConfig::builder(["name"])
            .suffix_fields(["city", " "])
            .build()
            .expect_err("blank suffix must fail");
        assert!(matches!(err, SlugError::Configuration(_)));
    }

    #[test]
    fn blank_column_rejected() {
        let err = SlugConfig::builder(["name"])
            .column("")
            .build()
            .expect_err("blank column must fail");
        assert!(matches!(err, SlugError::Configuration(_)));
    }

    #[test]
    fn zero_attempts_rejected() {
        let err = SlugConfig::builder(["name"])
            .max_attempts(0)
            .build()
            .expect_err("zero attempts must fail");
        assert!(matches!(err, SlugError::Configuration(_)));
    }
}
