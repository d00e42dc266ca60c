//! Suffix escalation: resolves a slug that no stored record holds.
//!
//! ## Summary
//! Candidates are tried in three tiers, strictly one probe at a time:
//!
//! 1. the base slug built from the source attributes;
//! 2. the base widened by the suffix attributes, one more attribute per step;
//! 3. the last candidate from the previous tier with a numeric counter (`-1`, `-2`, …).
//!
//! The first candidate the oracle reports as unique wins. Every candidate is
//! probed before it is accepted, including a widened candidate that happens to
//! equal the base.
//!
//! ## Concurrency
//! The check-then-write scheme is optimistic. Two concurrent resolutions for the
//! same source values can both observe a candidate as free; a unique index on the
//! target column is the authoritative backstop and its rejection should be
//! surfaced to the caller as a retryable conflict.

use crate::change::needs_regeneration;
use crate::constants::NUMERIC_SUFFIX_SEPARATOR;
use crate::error::{SlugError, SlugResult};
use crate::options::SlugConfig;
use crate::oracle::UniquenessOracle;
use crate::record::{SlugRecord, attribute_values};
use crate::types::{SlugOutcome, Tier};
use crate::util::slug::Slugifier;

#[derive(Debug)]
pub struct SlugEngine<O> {
    config: SlugConfig,
    slugifier: Slugifier,
    oracle: O,
}

impl<O: UniquenessOracle> SlugEngine<O> {
    /// ## Summary
    /// Builds an engine for one record type.
    ///
    /// ## Errors
    /// Returns [`SlugError::Configuration`] if the configuration is invalid, or
    /// [`SlugError::Transform`] if its transform options are malformed.
    pub fn new(config: SlugConfig, oracle: O) -> SlugResult<Self> {
        config.validate()?;
        let slugifier = Slugifier::new(&config.transform)?;

        Ok(Self {
            config,
            slugifier,
            oracle,
        })
    }

    #[must_use]
    pub const fn config(&self) -> &SlugConfig {
        &self.config
    }

    #[must_use]
    pub const fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The base slug for `record`, without consulting storage.
    #[must_use]
    pub fn slugify_record<R: SlugRecord + ?Sized>(&self, record: &R) -> String {
        self.slugifier
            .slugify(attribute_values(record, &self.config.source_fields))
    }

    /// ## Summary
    /// Resolves a slug for `record` that no stored record currently holds.
    ///
    /// ## Errors
    /// - [`SlugError::Transform`] if the source attributes slugify to an empty string.
    /// - [`SlugError::OracleUnavailable`] if a probe fails. Failed probes are not retried.
    /// - [`SlugError::Unresolvable`] if `max_attempts` numeric candidates all collide.
    #[tracing::instrument(skip(self, record), fields(column = %self.config.column))]
    pub async fn resolve<R: SlugRecord + ?Sized>(&self, record: &R) -> SlugResult<String> {
        let source = attribute_values(record, &self.config.source_fields);
        let base = self.slugifier.slugify(&source);
        if base.is_empty() {
            return Err(SlugError::Transform(format!(
                "source fields {:?} produce an empty slug",
                self.config.source_fields
            )));
        }

        if self.probe(Tier::Base, &base).await? {
            return Ok(base);
        }

        let mut stem = base;
        if !self.config.suffix_fields.is_empty() {
            let suffix = attribute_values(record, &self.config.suffix_fields);
            tracing::debug!(
                %stem,
                widths = suffix.len(),
                "Base slug taken, widening with suffix fields"
            );

            for width in 1..=suffix.len() {
                let candidate = self
                    .slugifier
                    .slugify(source.iter().chain(&suffix[..width]));

                if self.probe(Tier::SourceSuffix, &candidate).await? {
                    return Ok(candidate);
                }
                stem = candidate;
            }
        }

        // The fully widened candidate already collided; start counting from it.
        self.resolve_numeric(&stem).await
    }

    async fn resolve_numeric(&self, stem: &str) -> SlugResult<String> {
        tracing::debug!(stem, "Escalating to numeric suffixes");

        for counter in 1..=self.config.max_attempts {
            let candidate = format!("{stem}{NUMERIC_SUFFIX_SEPARATOR}{counter}");

            if self.probe(Tier::Numeric, &candidate).await? {
                return Ok(candidate);
            }
        }

        tracing::debug!(
            stem,
            attempts = self.config.max_attempts,
            "Numeric escalation exhausted"
        );

        Err(SlugError::Unresolvable {
            column: self.config.column.clone(),
            base: stem.to_owned(),
            attempts: self.config.max_attempts,
        })
    }

    async fn probe(&self, tier: Tier, candidate: &str) -> SlugResult<bool> {
        let unique = self
            .oracle
            .is_unique(&self.config.column, candidate)
            .await?;

        tracing::trace!(%tier, candidate, unique, "Probed slug candidate");

        Ok(unique)
    }

    /// ## Summary
    /// Generates a slug for `record` if it needs one and writes it to the target column.
    ///
    /// The record is left untouched when its existing slug is kept or when
    /// resolution fails.
    ///
    /// ## Errors
    /// Propagates any error from [`Self::resolve`].
    pub async fn apply<R: SlugRecord + ?Sized>(&self, record: &mut R) -> SlugResult<SlugOutcome> {
        let existing = record.attribute(&self.config.column);

        if !needs_regeneration(
            &*record,
            &self.config.source_fields,
            existing.as_deref(),
            self.config.overwrite,
        ) {
            tracing::trace!(column = %self.config.column, "Keeping existing slug");
            return Ok(SlugOutcome::Kept);
        }

        let slug = self.resolve(&*record).await?;
        record.set_attribute(&self.config.column, slug.clone());

        tracing::debug!(column = %self.config.column, slug = %slug, "Slug generated");

        Ok(SlugOutcome::Generated(slug))
    }
}
