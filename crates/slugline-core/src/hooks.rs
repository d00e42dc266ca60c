//! Lifecycle hooks: wires the slug engine into record creation and update.
//!
//! ## Summary
//! A model opts in by implementing [`SluggableModel`]. Registration builds a
//! [`SlugEngine`] from the model's configuration and hands back [`SlugHooks`],
//! which the persistence layer calls before inserting (and optionally before
//! updating) a record.

use crate::engine::SlugEngine;
use crate::error::{SlugError, SlugResult};
use crate::options::SlugConfig;
use crate::oracle::UniquenessOracle;
use crate::record::SlugRecord;
use crate::types::SlugOutcome;

/// Model-level accessor for slug configuration.
pub trait SluggableModel {
    /// Slug configuration for this model. `None` means the model has not been configured.
    fn slug_config() -> Option<SlugConfig> {
        None
    }
}

#[derive(Debug)]
pub struct SlugHooks<O> {
    engine: SlugEngine<O>,
    regenerate_on_update: bool,
}

impl<O: UniquenessOracle> SlugHooks<O> {
    /// ## Summary
    /// Registers slug hooks for model `M`.
    ///
    /// ## Errors
    /// Returns [`SlugError::Configuration`] if `M` provides no configuration or the
    /// configuration is invalid, and [`SlugError::Transform`] if its transform
    /// options are malformed.
    pub fn register<M: SluggableModel>(oracle: O) -> SlugResult<Self> {
        let config = M::slug_config().ok_or_else(|| {
            SlugError::Configuration(format!(
                "no slug configuration for model {}",
                std::any::type_name::<M>()
            ))
        })?;

        Self::with_config(config, oracle)
    }

    /// ## Summary
    /// Registers slug hooks from an explicit configuration.
    ///
    /// ## Errors
    /// Same as [`SlugEngine::new`].
    pub fn with_config(config: SlugConfig, oracle: O) -> SlugResult<Self> {
        Ok(Self {
            engine: SlugEngine::new(config, oracle)?,
            regenerate_on_update: false,
        })
    }

    /// Also regenerate slugs before updates. Off by default.
    #[must_use]
    pub fn regenerate_on_update(mut self, enabled: bool) -> Self {
        self.regenerate_on_update = enabled;
        self
    }

    #[must_use]
    pub const fn engine(&self) -> &SlugEngine<O> {
        &self.engine
    }

    /// ## Summary
    /// Runs before a record is inserted.
    ///
    /// ## Errors
    /// Propagates slug resolution errors; the insert should be aborted.
    #[tracing::instrument(skip_all)]
    pub async fn before_create<R: SlugRecord + ?Sized>(
        &self,
        record: &mut R,
    ) -> SlugResult<SlugOutcome> {
        self.engine.apply(record).await
    }

    /// ## Summary
    /// Runs before a record is updated. Keeps the slug unless update
    /// regeneration was enabled at registration.
    ///
    /// ## Errors
    /// Propagates slug resolution errors; the update should be aborted.
    #[tracing::instrument(skip_all)]
    pub async fn before_update<R: SlugRecord + ?Sized>(
        &self,
        record: &mut R,
    ) -> SlugResult<SlugOutcome> {
        if !self.regenerate_on_update {
            return Ok(SlugOutcome::Kept);
        }

        self.engine.apply(record).await
    }
}
