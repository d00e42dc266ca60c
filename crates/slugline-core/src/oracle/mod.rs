//! Uniqueness probes against the storage backend.
//!
//! ## Summary
//! The engine never talks to storage directly. It asks a [`UniquenessOracle`]
//! whether a candidate is free and suspends until the answer arrives. Answers
//! are time-varying, so implementations must query fresh on every call.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::SlugResult;

pub mod memory;

pub type ProbeFuture<'a> = Pin<Box<dyn Future<Output = SlugResult<bool>> + Send + 'a>>;

pub trait UniquenessOracle: Send + Sync {
    /// ## Summary
    /// Resolves to `true` when no stored record has `column == candidate`.
    ///
    /// ## Errors
    /// Resolves to [`SlugError::OracleUnavailable`](crate::error::SlugError::OracleUnavailable)
    /// if the underlying query fails.
    fn is_unique<'a>(&'a self, column: &'a str, candidate: &'a str) -> ProbeFuture<'a>;
}

impl<T: UniquenessOracle + ?Sized> UniquenessOracle for &T {
    fn is_unique<'a>(&'a self, column: &'a str, candidate: &'a str) -> ProbeFuture<'a> {
        (**self).is_unique(column, candidate)
    }
}

impl<T: UniquenessOracle + ?Sized> UniquenessOracle for Arc<T> {
    fn is_unique<'a>(&'a self, column: &'a str, candidate: &'a str) -> ProbeFuture<'a> {
        (**self).is_unique(column, candidate)
    }
}
