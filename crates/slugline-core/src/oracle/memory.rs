//! In-process uniqueness oracle.
//!
//! Backs the engine with a map of column → stored values. Useful for callers
//! that keep records in memory and for exercising the engine without a database.
//! Only a [`MemoryOracle::recording`] oracle keeps a log of individual probes;
//! the default one just counts them.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;

use super::{ProbeFuture, UniquenessOracle};
use crate::error::SlugError;

#[derive(Error, Debug)]
#[error("in-memory store is unavailable")]
pub struct StoreUnavailable;

/// A probe as observed by the oracle, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub column: String,
    pub candidate: String,
}

#[derive(Debug, Default)]
pub struct MemoryOracle {
    values: Mutex<HashMap<String, HashSet<String>>>,
    probe_count: AtomicUsize,
    // `None` unless built with `recording`.
    probes: Option<Mutex<Vec<Probe>>>,
    unavailable: AtomicBool,
}

/// Locks a mutex and recovers from poisoning.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            mutex.clear_poison();
            poisoned.into_inner()
        }
    }
}

impl MemoryOracle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An oracle that also logs every probe, see [`MemoryOracle::probes`].
    #[must_use]
    pub fn recording() -> Self {
        Self {
            probes: Some(Mutex::default()),
            ..Self::default()
        }
    }

    /// Records `value` as stored under `column`. Returns `false` if it was already present.
    pub fn insert(&self, column: &str, value: impl Into<String>) -> bool {
        lock(&self.values)
            .entry(column.to_owned())
            .or_default()
            .insert(value.into())
    }

    /// Forgets a stored value. Returns `false` if it was not present.
    pub fn remove(&self, column: &str, value: &str) -> bool {
        lock(&self.values)
            .get_mut(column)
            .is_some_and(|values| values.remove(value))
    }

    #[must_use]
    pub fn contains(&self, column: &str, value: &str) -> bool {
        lock(&self.values)
            .get(column)
            .is_some_and(|values| values.contains(value))
    }

    /// Number of probes answered (or failed) so far.
    #[must_use]
    pub fn probe_count(&self) -> usize {
        self.probe_count.load(Ordering::SeqCst)
    }

    /// Probes in the order they were issued. Always empty unless the oracle is recording.
    #[must_use]
    pub fn probes(&self) -> Vec<Probe> {
        self.probes
            .as_ref()
            .map(|probes| lock(probes).clone())
            .unwrap_or_default()
    }

    /// Resets the probe counter and log.
    pub fn clear_probes(&self) {
        self.probe_count.store(0, Ordering::SeqCst);
        if let Some(probes) = &self.probes {
            lock(probes).clear();
        }
    }

    /// Makes subsequent probes fail with [`SlugError::OracleUnavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

impl UniquenessOracle for MemoryOracle {
    fn is_unique<'a>(&'a self, column: &'a str, candidate: &'a str) -> ProbeFuture<'a> {
        Box::pin(async move {
            self.probe_count.fetch_add(1, Ordering::SeqCst);
            if let Some(probes) = &self.probes {
                lock(probes).push(Probe {
                    column: column.to_owned(),
                    candidate: candidate.to_owned(),
                });
            }

            if self.unavailable.load(Ordering::SeqCst) {
                return Err(SlugError::oracle(StoreUnavailable));
            }

            Ok(!self.contains(column, candidate))
        })
    }
}
